use crate::core::shared::NdVector;
use super::PredictionTransform;

/// Difference transform for integral values in '[min, max]'.
/// The prediction is clamped into the range and the difference is wrapped modulo the number of
/// values in it, so every correction lies in '[-modulus / 2, modulus / 2]' however far a
/// parallelogram overshoots.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct WrappedDifference {
    min: f64,
    max: f64,
    modulus: f64,
    min_correction: f64,
    max_correction: f64,
}

impl WrappedDifference {
    pub(crate) fn new(min: f64, max: f64) -> Self {
        debug_assert!(min <= max);
        let modulus = max - min + 1.0;
        let half = (modulus / 2.0).floor();
        let max_correction = if modulus % 2.0 == 0.0 { half - 1.0 } else { half };
        Self {
            min,
            max,
            modulus,
            min_correction: -half,
            max_correction,
        }
    }
}

impl PredictionTransform for WrappedDifference {
    fn map(&self, actual: NdVector<3, f64>, predicted: NdVector<3, f64>) -> NdVector<3, f64> {
        let mut out = NdVector::zero();
        for i in 0..3 {
            let value = actual.get(i) - predicted.get(i).clamp(self.min, self.max);
            let wrapped = if value > self.max_correction {
                value - self.modulus
            } else if value < self.min_correction {
                value + self.modulus
            } else {
                value
            };
            out.set(i, wrapped);
        }
        out
    }

    fn inverse(&self, predicted: NdVector<3, f64>, correction: NdVector<3, f64>) -> NdVector<3, f64> {
        let mut out = NdVector::zero();
        for i in 0..3 {
            let value = predicted.get(i).clamp(self.min, self.max) + correction.get(i);
            let unwrapped = if value > self.max {
                value - self.modulus
            } else if value < self.min {
                value + self.modulus
            } else {
                value
            };
            out.set(i, unwrapped);
        }
        out
    }
}
