use crate::core::shared::{CornerIdx, FaceIdx, VertexIdx};

/// Navigation over a triangulated surface stored corner by corner.
/// Corner `c` belongs to face `c / 3`, and the corners of a face are laid out
/// consecutively, so `next` and `previous` are pure index arithmetic.
pub trait GenericCornerTable {
    fn num_corners(&self) -> usize;
    fn num_vertices(&self) -> usize;
    fn vertex(&self, corner: CornerIdx) -> VertexIdx;
    fn opposite(&self, corner: CornerIdx) -> Option<CornerIdx>;

    fn num_faces(&self) -> usize {
        self.num_corners() / 3
    }

    #[inline]
    fn face(&self, corner: CornerIdx) -> FaceIdx {
        corner / 3
    }

    #[inline]
    fn next(&self, corner: CornerIdx) -> CornerIdx {
        next(corner)
    }

    #[inline]
    fn previous(&self, corner: CornerIdx) -> CornerIdx {
        previous(corner)
    }

    /// The corner across the edge opposite to `next(corner)`.
    #[inline]
    fn right(&self, corner: CornerIdx) -> Option<CornerIdx> {
        self.opposite(self.next(corner))
    }

    /// The corner across the edge opposite to `previous(corner)`.
    #[inline]
    fn left(&self, corner: CornerIdx) -> Option<CornerIdx> {
        self.opposite(self.previous(corner))
    }
}

#[inline]
pub(crate) fn next(corner: CornerIdx) -> CornerIdx {
    if corner % 3 == 2 {
        corner - 2
    } else {
        corner + 1
    }
}

#[inline]
pub(crate) fn previous(corner: CornerIdx) -> CornerIdx {
    if corner % 3 == 0 {
        corner + 2
    } else {
        corner - 1
    }
}


#[derive(Debug, Clone, PartialEq)]
pub struct CornerTable {
    /// corner to vertex map.
    vertices: Vec<VertexIdx>,

    /// Records the opposite corner for each corner.
    /// `None` if the edge facing the corner is a boundary edge.
    opposites: Vec<Option<CornerIdx>>,

    num_vertices: usize,
}

#[remain::sorted]
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Err {
    #[error("Face {face} refers to the same vertex more than once: {vertices:?}.")]
    DegenerateFace { face: FaceIdx, vertices: [VertexIdx; 3] },
    #[error("The edge {vertices:?} is traversed in the same direction by two faces; the mesh is not consistently oriented.")]
    InconsistentOrientation { vertices: [VertexIdx; 2] },
    #[error("The edge {vertices:?} is shared by {incidence} faces.")]
    NonManifoldEdge { vertices: [VertexIdx; 2], incidence: usize },
    #[error("Face {face} refers to vertex {vertex}, but there are only {num_vertices} vertices.")]
    VertexOutOfRange { face: FaceIdx, vertex: VertexIdx, num_vertices: usize },
}

impl CornerTable {
    /// Builds the table of a triangle soup. Every undirected edge must be shared by at most
    /// two faces, and two faces sharing an edge must traverse it in opposite directions.
    pub fn from_faces(faces: &[[VertexIdx; 3]], num_vertices: usize) -> Result<Self, Err> {
        for (face, &f) in faces.iter().enumerate() {
            if let Some(&vertex) = f.iter().find(|&&v| v >= num_vertices) {
                return Err(Err::VertexOutOfRange { face, vertex, num_vertices });
            }
            if f[0] == f[1] || f[1] == f[2] || f[2] == f[0] {
                return Err(Err::DegenerateFace { face, vertices: f });
            }
        }

        let vertices = faces.iter().flatten().copied().collect::<Vec<_>>();
        let mut out = Self {
            opposites: vec![None; vertices.len()],
            vertices,
            num_vertices,
        };
        out.compute_opposites()?;
        Ok(out)
    }

    /// Assembles a table whose opposite links are already known.
    pub(crate) fn from_parts(vertices: Vec<VertexIdx>, opposites: Vec<Option<CornerIdx>>, num_vertices: usize) -> Self {
        debug_assert_eq!(vertices.len(), opposites.len());
        Self { vertices, opposites, num_vertices }
    }

    /// Pairs up the corners facing the same undirected edge.
    fn compute_opposites(&mut self) -> Result<(), Err> {
        // (smaller endpoint, larger endpoint, corner facing the edge)
        let mut edges = (0..self.num_corners())
            .map(|c| {
                let [a, b] = self.facing_edge(c);
                (a.min(b), a.max(b), c)
            })
            .collect::<Vec<_>>();
        edges.sort_unstable();

        let mut i = 0;
        while i < edges.len() {
            let (lo, hi, c) = edges[i];
            let mut j = i + 1;
            while j < edges.len() && edges[j].0 == lo && edges[j].1 == hi {
                j += 1;
            }
            match j - i {
                1 => {}, // boundary edge
                2 => {
                    let d = edges[i + 1].2;
                    if self.facing_edge(c) == self.facing_edge(d) {
                        return Err(Err::InconsistentOrientation { vertices: self.facing_edge(c) });
                    }
                    self.opposites[c] = Some(d);
                    self.opposites[d] = Some(c);
                },
                incidence => return Err(Err::NonManifoldEdge { vertices: [lo, hi], incidence }),
            }
            i = j;
        }
        Ok(())
    }

    /// The directed edge facing `c`, i.e. from the vertex of `next(c)` to the vertex of `previous(c)`.
    fn facing_edge(&self, c: CornerIdx) -> [VertexIdx; 2] {
        [self.vertex(self.next(c)), self.vertex(self.previous(c))]
    }

    /// Returns a flag per vertex telling whether the vertex lies on a boundary edge.
    pub fn boundary_vertices(&self) -> Vec<bool> {
        let mut out = vec![false; self.num_vertices];
        for c in (0..self.num_corners()).filter(|&c| self.opposites[c].is_none()) {
            for v in self.facing_edge(c) {
                out[v] = true;
            }
        }
        out
    }

    pub fn num_boundary_edges(&self) -> usize {
        self.opposites.iter().filter(|o| o.is_none()).count()
    }

    /// Returns the faces as vertex triples, in corner order.
    pub fn faces(&self) -> Vec<[VertexIdx; 3]> {
        self.vertices
            .chunks_exact(3)
            .map(|f| [f[0], f[1], f[2]])
            .collect()
    }

    /// Number of undirected edges.
    pub fn num_edges(&self) -> usize {
        let interior = self.num_corners() - self.num_boundary_edges();
        interior / 2 + self.num_boundary_edges()
    }

    /// `V - E + F`.
    pub fn euler_characteristic(&self) -> isize {
        self.num_vertices as isize - self.num_edges() as isize + self.num_faces() as isize
    }
}

impl GenericCornerTable for CornerTable {
    #[inline]
    fn num_corners(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    #[inline]
    fn vertex(&self, corner: CornerIdx) -> VertexIdx {
        self.vertices[corner]
    }

    #[inline]
    fn opposite(&self, corner: CornerIdx) -> Option<CornerIdx> {
        self.opposites[corner]
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_table() {
        let faces = vec![[0, 1, 2], [2, 1, 3]];
        let corner_table = CornerTable::from_faces(&faces, 4).unwrap();
        assert_eq!(corner_table.num_faces(), 2);
        assert_eq!(corner_table.num_corners(), 6);
        assert_eq!(corner_table.num_vertices(), 4);
        assert_eq!(corner_table.face(0), 0);
        assert_eq!(corner_table.face(2), 0);
        assert_eq!(corner_table.face(3), 1);
        assert_eq!(corner_table.face(5), 1);
        assert_eq!(corner_table.opposite(0), Some(5));
        assert_eq!(corner_table.opposite(1), None);
        assert_eq!(corner_table.opposite(2), None);
        assert_eq!(corner_table.opposite(3), None);
        assert_eq!(corner_table.opposite(4), None);
        assert_eq!(corner_table.opposite(5), Some(0));
        assert_eq!(corner_table.previous(0), 2);
        assert_eq!(corner_table.previous(1), 0);
        assert_eq!(corner_table.previous(2), 1);
        assert_eq!(corner_table.next(0), 1);
        assert_eq!(corner_table.next(1), 2);
        assert_eq!(corner_table.next(2), 0);
        assert_eq!(corner_table.right(4), Some(0));
        assert_eq!(corner_table.left(4), None);
        assert_eq!(corner_table.left(1), Some(5));
        assert_eq!(corner_table.num_boundary_edges(), 4);
        assert_eq!(corner_table.boundary_vertices(), vec![true; 4]);
    }

    #[test]
    fn test_triangle() {
        let corner_table = CornerTable::from_faces(&[[0, 1, 2]], 3).unwrap();
        assert_eq!(corner_table.num_faces(), 1);
        assert_eq!(corner_table.num_edges(), 3);
        assert_eq!(corner_table.euler_characteristic(), 1);
        assert!((0..3).all(|c| corner_table.opposite(c).is_none()));
    }

    #[test]
    fn test_tetrahedron() {
        let faces = vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];
        let corner_table = CornerTable::from_faces(&faces, 4).unwrap();
        assert_eq!(corner_table.num_boundary_edges(), 0);
        assert_eq!(corner_table.num_edges(), 6);
        assert_eq!(corner_table.euler_characteristic(), 2);
        assert_eq!(corner_table.boundary_vertices(), vec![false; 4]);
        for c in 0..corner_table.num_corners() {
            let o = corner_table.opposite(c).unwrap();
            assert_eq!(corner_table.opposite(o), Some(c));
            assert_ne!(corner_table.face(o), corner_table.face(c));
        }
    }

    #[test]
    fn test_non_manifold() {
        let faces = vec![[0, 1, 2], [1, 0, 3], [0, 1, 4]];
        assert_eq!(
            CornerTable::from_faces(&faces, 5),
            Err(Err::NonManifoldEdge { vertices: [0, 1], incidence: 3 })
        );
    }

    #[test]
    fn test_inconsistent_orientation() {
        let faces = vec![[0, 1, 2], [0, 1, 3]];
        assert_eq!(
            CornerTable::from_faces(&faces, 4),
            Err(Err::InconsistentOrientation { vertices: [0, 1] })
        );
    }

    #[test]
    fn test_invalid_faces() {
        assert_eq!(
            CornerTable::from_faces(&[[0, 1, 3]], 3),
            Err(Err::VertexOutOfRange { face: 0, vertex: 3, num_vertices: 3 })
        );
        assert_eq!(
            CornerTable::from_faces(&[[0, 1, 2], [1, 1, 2]], 3),
            Err(Err::DegenerateFace { face: 1, vertices: [1, 1, 2] })
        );
    }
}
