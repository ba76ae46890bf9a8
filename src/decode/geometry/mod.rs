use crate::core::corner_table::{CornerTable, GenericCornerTable};
use crate::core::shared::{CornerIdx, NdVector, VertexIdx};
use crate::shared::attribute::prediction_scheme::{delta_prediction, mesh_parallelogram_prediction};
use crate::shared::attribute::prediction_transform::{difference::Difference, PredictionTransform};

#[remain::sorted]
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Err {
    #[error("Expected {expected} corrections, one per vertex, but got {found}.")]
    DeltaCountMismatch { expected: usize, found: usize },
    #[error("The corner table has no triangles.")]
    EmptyTable,
    #[error("Vertex {vertex} is not reachable from the seed triangle.")]
    UnreachedVertex { vertex: VertexIdx },
}

/// Replays the traversal of the encoder over a reconstructed table. Vertex ids are expected in
/// discovery order, which is what the connectivity decoder produces.
struct GeometryDecoder<'table, 'deltas, T> {
    table: &'table CornerTable,

    deltas: &'deltas [NdVector<3, f64>],

    transform: &'deltas T,

    /// index of the next correction to consume. Each vertex consumes exactly one.
    next_delta: usize,

    positions: Vec<NdVector<3, f64>>,

    /// The 'i'th entry is true once the position of the 'i'th vertex is known.
    marked: Vec<bool>,

    /// The 'i'th entry is true once the 'i'th face has been traversed.
    flagged: Vec<bool>,
}

/// Computes the vertex positions of 'table' from the corrections produced by the encoder.
/// Corner 1 of face 0 plays the role of the encoder's start corner.
pub fn decompress_geometry(table: &CornerTable, deltas: &[NdVector<3, f64>]) -> Result<Vec<NdVector<3, f64>>, Err> {
    decompress_geometry_with(table, deltas, &Difference)
}

/// Like [`decompress_geometry`], for corrections produced by 'transform'.
pub(crate) fn decompress_geometry_with<T: PredictionTransform>(
    table: &CornerTable,
    deltas: &[NdVector<3, f64>],
    transform: &T,
) -> Result<Vec<NdVector<3, f64>>, Err> {
    if table.num_faces() == 0 {
        return Err(Err::EmptyTable);
    }
    if deltas.len() != table.num_vertices() {
        return Err(Err::DeltaCountMismatch { expected: table.num_vertices(), found: deltas.len() });
    }

    let mut decoder = GeometryDecoder {
        table,
        deltas,
        transform,
        next_delta: 0,
        positions: vec![NdVector::zero(); table.num_vertices()],
        marked: vec![false; table.num_vertices()],
        flagged: vec![false; table.num_faces()],
    };
    decoder.decode_seed(1);
    decoder.traverse(1);

    if let Some(vertex) = decoder.marked.iter().position(|&m| !m) {
        return Err(Err::UnreachedVertex { vertex });
    }
    Ok(decoder.positions)
}

impl<T: PredictionTransform> GeometryDecoder<'_, '_, T> {
    fn decode_seed(&mut self, start: CornerIdx) {
        let first = self.table.vertex(self.table.previous(start));
        self.decode_vertex(first, NdVector::zero());
        for c in [start, self.table.next(start)] {
            let predicted = delta_prediction::predict(self.table, c, &self.positions);
            self.decode_vertex(self.table.vertex(c), predicted);
        }
        self.flagged[self.table.face(start)] = true;
    }

    fn traverse(&mut self, start: CornerIdx) {
        let mut stack = vec![start];
        while let Some(mut gate) = stack.pop() {
            while let Some(c) = self.table.opposite(gate) {
                let face = self.table.face(c);
                if self.flagged[face] {
                    break;
                }
                self.flagged[face] = true;

                let v = self.table.vertex(c);
                if !self.marked[v] {
                    let predicted = mesh_parallelogram_prediction::predict(self.table, c, gate, &self.positions);
                    self.decode_vertex(v, predicted);
                    gate = self.table.next(c);
                    continue;
                }

                match (self.is_traversed(self.table.right(c)), self.is_traversed(self.table.left(c))) {
                    (true, true) => break,
                    (true, false) => gate = self.table.previous(c),
                    (false, true) => gate = self.table.next(c),
                    (false, false) => {
                        stack.push(self.table.previous(c));
                        gate = self.table.next(c);
                    },
                }
            }
        }
    }

    /// Only called for unmarked vertices, so no more corrections are consumed than there are vertices.
    fn decode_vertex(&mut self, v: VertexIdx, predicted: NdVector<3, f64>) {
        self.positions[v] = self.transform.inverse(predicted, self.deltas[self.next_delta]);
        self.next_delta += 1;
        self.marked[v] = true;
    }

    fn is_traversed(&self, corner: Option<CornerIdx>) -> bool {
        corner.map_or(true, |c| self.flagged[self.table.face(c)])
    }
}
