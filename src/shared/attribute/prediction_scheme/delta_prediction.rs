use crate::core::corner_table::GenericCornerTable;
use crate::core::shared::{CornerIdx, NdVector};

/// Predicts the vertex of 'corner' as the vertex of the corner before it in the same face.
/// Used for the seed face, where no neighboring face is known yet.
pub(crate) fn predict<T: GenericCornerTable>(
    table: &T,
    corner: CornerIdx,
    positions: &[NdVector<3, f64>],
) -> NdVector<3, f64> {
    positions[table.vertex(table.previous(corner))]
}
