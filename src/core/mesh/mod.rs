pub mod builder;
pub mod preprocess;

use crate::core::shared::{Cross, NdVector, VertexIdx};

/// An indexed triangle mesh with optional per-vertex normals.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub(crate) positions: Vec<NdVector<3, f64>>,
    pub(crate) faces: Vec<[VertexIdx; 3]>,
    pub(crate) normals: Option<Vec<NdVector<3, f64>>>,
}

impl Mesh {
    pub fn get_positions(&self) -> &[NdVector<3, f64>] {
        &self.positions
    }

    pub fn get_faces(&self) -> &[[VertexIdx; 3]] {
        &self.faces
    }

    pub fn get_normals(&self) -> Option<&[NdVector<3, f64>]> {
        self.normals.as_deref()
    }

    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` for a mesh without vertices.
    pub fn bounding_box(&self) -> Option<(NdVector<3, f64>, NdVector<3, f64>)> {
        let first = *self.positions.first()?;
        let mut min = first;
        let mut max = first;
        for p in &self.positions[1..] {
            for i in 0..3 {
                min.set(i, min.get(i).min(p.get(i)));
                max.set(i, max.get(i).max(p.get(i)));
            }
        }
        Some((min, max))
    }

    /// Area-weighted vertex normals computed from the faces. A vertex whose adjacent faces
    /// cancel out, or that has none, gets the zero vector.
    pub fn vertex_normals(&self) -> Vec<NdVector<3, f64>> {
        let mut out = vec![NdVector::zero(); self.positions.len()];
        for &[a, b, c] in &self.faces {
            let p = self.positions[a];
            // twice the area times the unit normal
            let n = (self.positions[b] - p).cross(self.positions[c] - p);
            for v in [a, b, c] {
                out[v] += n;
            }
        }
        out.into_iter()
            .map(|n| n.normalize().unwrap_or(n))
            .collect()
    }
}
