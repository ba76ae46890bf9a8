//! Quality and topology measurements used to compare a mesh with its decoded version.

use std::collections::HashSet;

use crate::core::mesh::Mesh;
use crate::core::shared::{Dot, NdVector, VertexIdx};

/// One-sided Hausdorff distance: the largest distance from a vertex of 'candidate' to the
/// closest vertex of 'reference'. Returns 0 if either mesh has no vertices.
pub fn hausdorff_distance(reference: &Mesh, candidate: &Mesh) -> f64 {
    if reference.num_vertices() == 0 {
        return 0.0;
    }
    // sorted by 'x' so that the search can stop once the 'x' gap alone exceeds the best distance
    let mut sorted = reference.get_positions().to_vec();
    sorted.sort_unstable_by(|a, b| a.get(0).total_cmp(&b.get(0)));

    candidate.get_positions()
        .iter()
        .map(|&p| closest_distance(&sorted, p))
        .fold(0.0, f64::max)
}

fn closest_distance(sorted: &[NdVector<3, f64>], p: NdVector<3, f64>) -> f64 {
    let start = sorted.partition_point(|q| q.get(0) < p.get(0));
    let mut best = f64::INFINITY;
    let dist2 = |q: NdVector<3, f64>| {
        let d = q - p;
        d.dot(d)
    };
    for &q in &sorted[start..] {
        let dx = q.get(0) - p.get(0);
        if dx * dx > best {
            break;
        }
        best = best.min(dist2(q));
    }
    for &q in sorted[..start].iter().rev() {
        let dx = p.get(0) - q.get(0);
        if dx * dx > best {
            break;
        }
        best = best.min(dist2(q));
    }
    best.sqrt()
}

/// Topological summary of a mesh. Two meshes related by a renumbering of their vertices and
/// triangles have equal statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeshStats {
    pub num_triangles: usize,
    pub num_vertices: usize,
    pub num_edges: usize,
    pub euler_characteristic: isize,
    /// Number of distinct neighbors of each vertex, sorted.
    pub degrees: Vec<usize>,
}

impl MeshStats {
    pub fn of(mesh: &Mesh) -> Self {
        let mut edges = HashSet::new();
        for &[a, b, c] in mesh.get_faces() {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                edges.insert((u.min(v), u.max(v)));
            }
        }
        let mut degrees = vec![0; mesh.num_vertices()];
        for &(u, v) in &edges {
            degrees[u] += 1;
            degrees[v] += 1;
        }
        degrees.sort_unstable();

        Self {
            num_triangles: mesh.num_faces(),
            num_vertices: mesh.num_vertices(),
            num_edges: edges.len(),
            euler_characteristic: mesh.num_vertices() as isize - edges.len() as isize + mesh.num_faces() as isize,
            degrees,
        }
    }

    /// Number of vertices with the given degree.
    pub fn count_degree(&self, degree: usize) -> usize {
        self.degrees.iter().filter(|&&d| d == degree).count()
    }
}

/// Index of the vertex of 'mesh' closest to 'p'. Meant for matching vertices across meshes
/// in tests and diagnostics.
pub fn closest_vertex(mesh: &Mesh, p: NdVector<3, f64>) -> Option<VertexIdx> {
    mesh.get_positions()
        .iter()
        .enumerate()
        .map(|(v, &q)| (v, (q - p).dot(q - p)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(v, _)| v)
}
