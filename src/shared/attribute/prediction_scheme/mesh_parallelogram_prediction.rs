use crate::core::corner_table::GenericCornerTable;
use crate::core::shared::{CornerIdx, NdVector};

/// Predicts the vertex of 'corner' by completing the parallelogram spanned by the face
/// across the edge facing it. 'gate' is the corner of that face opposite to 'corner'.
pub(crate) fn predict<T: GenericCornerTable>(
    table: &T,
    corner: CornerIdx,
    gate: CornerIdx,
    positions: &[NdVector<3, f64>],
) -> NdVector<3, f64> {
    debug_assert_eq!(table.opposite(corner), Some(gate));
    let a_coord = positions[table.vertex(table.next(corner))];
    let b_coord = positions[table.vertex(table.previous(corner))];
    let diagonal_coord = positions[table.vertex(gate)];
    a_coord + b_coord - diagonal_coord
}
