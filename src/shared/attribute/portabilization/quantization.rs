use crate::core::shared::NdVector;
use crate::shared::attribute::prediction_transform::wrapped_difference::WrappedDifference;

/// Maps positions inside a bounding box onto an integer grid of `2^(bits-1) - 1` steps per axis,
/// and back. Grid coordinates are kept as integral `f64` values so that the parallelogram
/// predictor can run on them unchanged.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Quantization {
    min: NdVector<3, f64>,
    range: NdVector<3, f64>,
    levels: f64,
}

impl Quantization {
    pub(crate) fn new(quantization_bits: u8, min: [f32; 3], max: [f32; 3]) -> Self {
        let min = NdVector::from(min.map(f64::from));
        let max = NdVector::from(max.map(f64::from));
        Self {
            min,
            range: max - min,
            levels: levels(quantization_bits) as f64,
        }
    }

    pub(crate) fn quantize(&self, position: NdVector<3, f64>) -> NdVector<3, f64> {
        let mut out = NdVector::zero();
        for i in 0..3 {
            let range = self.range.get(i);
            // a flat axis maps to 0
            if range > 0.0 {
                let normalized = (position.get(i) - self.min.get(i)) / range;
                // through an integer so that no '-0.0' reaches the bitwise vertex merge
                let cell = (normalized * self.levels).round().clamp(0.0, self.levels) as i64;
                out.set(i, cell as f64);
            }
        }
        out
    }

    /// The transform that keeps the corrections between grid positions within the grid's
    /// sign-magnitude range.
    pub(crate) fn correction_transform(&self) -> WrappedDifference {
        WrappedDifference::new(0.0, self.levels)
    }

    pub(crate) fn dequantize(&self, grid: NdVector<3, f64>) -> NdVector<3, f64> {
        if self.levels == 0.0 {
            return self.min;
        }
        let mut out = self.min;
        for i in 0..3 {
            out.set(i, self.min.get(i) + grid.get(i) / self.levels * self.range.get(i));
        }
        out
    }
}

/// Number of grid steps per axis.
pub(crate) fn levels(quantization_bits: u8) -> u64 {
    (1 << (quantization_bits - 1)) - 1
}

/// Packs 'value' as a sign bit followed by 'bits - 1' magnitude bits, or returns `None` if the
/// magnitude does not fit.
pub(crate) fn to_sign_magnitude(value: i64, bits: u8) -> Option<u64> {
    let magnitude_bits = bits - 1;
    let magnitude = value.unsigned_abs();
    if magnitude >> magnitude_bits != 0 {
        return None;
    }
    Some(((value < 0) as u64) << magnitude_bits | magnitude)
}

pub(crate) fn from_sign_magnitude(word: u64, bits: u8) -> i64 {
    let magnitude_bits = bits - 1;
    let magnitude = (word & ((1 << magnitude_bits) - 1)) as i64;
    if (word >> magnitude_bits) & 1 == 1 {
        -magnitude
    } else {
        magnitude
    }
}
