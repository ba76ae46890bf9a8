//! Maps a position and its prediction to the correction that is stored, and back.
//! The encoder calls [`PredictionTransform::map`], and both sides reconstruct positions with
//! [`PredictionTransform::inverse`] so that their predictions agree.

pub(crate) mod difference;
pub(crate) mod wrapped_difference;

use crate::core::shared::NdVector;

pub(crate) trait PredictionTransform {
    fn map(&self, actual: NdVector<3, f64>, predicted: NdVector<3, f64>) -> NdVector<3, f64>;

    fn inverse(&self, predicted: NdVector<3, f64>, correction: NdVector<3, f64>) -> NdVector<3, f64>;
}
