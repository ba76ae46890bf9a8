use thiserror::Error;

use crate::core::shared::{NdVector, VertexIdx};
use super::Mesh;

pub struct MeshBuilder {
    positions: Vec<NdVector<3, f64>>,
    faces: Vec<[VertexIdx; 3]>,
    normals: Option<Vec<NdVector<3, f64>>>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            faces: Vec::new(),
            normals: None,
        }
    }

    pub fn set_positions(&mut self, positions: Vec<NdVector<3, f64>>) -> &mut Self {
        self.positions = positions;
        self
    }

    pub fn set_faces(&mut self, faces: Vec<[VertexIdx; 3]>) -> &mut Self {
        self.faces = faces;
        self
    }

    /// Sets one normal per vertex.
    pub fn set_normals(&mut self, normals: Vec<NdVector<3, f64>>) -> &mut Self {
        self.normals = Some(normals);
        self
    }

    pub fn build(self) -> Result<Mesh, Err> {
        self.check_positions_and_faces()?;
        if let Some(normals) = &self.normals {
            if normals.len() != self.positions.len() {
                return Err(Err::NormalCountMismatch(normals.len(), self.positions.len()));
            }
        }
        Ok(
            Mesh {
                positions: self.positions,
                faces: self.faces,
                normals: self.normals,
            }
        )
    }

    /// Checks if there are enough positions for the faces, and that all positions are finite.
    fn check_positions_and_faces(&self) -> Result<(), Err> {
        let max_idx = self.faces.iter().flat_map(|face| face.iter()).copied().max();
        if let Some(max_idx) = max_idx {
            if max_idx >= self.positions.len() {
                return Err(Err::PositionAndConnectivityNotCompatible(max_idx, self.positions.len()));
            }
        }
        if let Some(v) = self.positions.iter().position(|p| p.as_array().iter().any(|x| !x.is_finite())) {
            return Err(Err::NonFinitePosition(v));
        }
        Ok(())
    }
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}


#[remain::sorted]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Err {
    #[error("Vertex {0} has a non-finite position.")]
    NonFinitePosition(VertexIdx),

    #[error("There are {0} normals for {1} vertices.")]
    NormalCountMismatch(usize, usize),

    #[error("The faces and the positions are not compatible; the faces have a maximum index of {0} and there are {1} positions.")]
    PositionAndConnectivityNotCompatible(usize, usize),
}
