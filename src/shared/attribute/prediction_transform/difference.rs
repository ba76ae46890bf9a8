use crate::core::shared::NdVector;
use super::PredictionTransform;

/// Stores the plain difference between a position and its prediction.
pub(crate) struct Difference;

impl PredictionTransform for Difference {
    #[inline]
    fn map(&self, actual: NdVector<3, f64>, predicted: NdVector<3, f64>) -> NdVector<3, f64> {
        actual - predicted
    }

    #[inline]
    fn inverse(&self, predicted: NdVector<3, f64>, correction: NdVector<3, f64>) -> NdVector<3, f64> {
        predicted + correction
    }
}
