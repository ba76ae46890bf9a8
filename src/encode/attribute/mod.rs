use crate::core::buffer::writer::Writer;
use crate::core::shared::NdVector;
use crate::shared::attribute::portabilization::quantization::to_sign_magnitude;
use crate::shared::attribute::portabilization::spherical::{nearest_index, NORMAL_INDEX_SLOT};

#[remain::sorted]
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Err {
    #[error("Component {axis} of correction {entry} is {value}, which does not fit in {bits} sign-magnitude bits.")]
    CorrectionOutOfRange { entry: usize, axis: usize, value: i64, bits: u8 },
}

/// Writes the position region: three sign-magnitude words of 'quantization_bits' bits per entry.
/// The corrections must be integral.
pub(crate) fn encode_positions(
    deltas: &[NdVector<3, f64>],
    quantization_bits: u8,
    writer: &mut Writer,
) -> Result<(), Err> {
    for (entry, delta) in deltas.iter().enumerate() {
        for axis in 0..3 {
            let value = delta.get(axis) as i64;
            let word = to_sign_magnitude(value, quantization_bits)
                .ok_or(Err::CorrectionOutOfRange { entry, axis, value, bits: quantization_bits })?;
            writer.next((quantization_bits as usize, word));
        }
    }
    Ok(())
}

/// Writes the normal region: one Fibonacci-sphere index per entry.
pub(crate) fn encode_normals(normals: &[NdVector<3, f64>], writer: &mut Writer) {
    for &normal in normals {
        writer.next((NORMAL_INDEX_SLOT, nearest_index(normal)));
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::buffer::Buffer;

    #[test]
    fn position_region() {
        let mut writer = Writer::new();
        let deltas = vec![NdVector::from([3.0, 0.0, 7.0]), NdVector::from([-1.0, -7.0, 2.0])];
        encode_positions(&deltas, 4, &mut writer).unwrap();
        let buffer: Buffer = writer.into();
        assert_eq!(buffer.len(), 24);
        assert_eq!(buffer.get_bits(0, 12), Ok(0b0011_0000_0111));
        assert_eq!(buffer.get_bits(12, 12), Ok(0b1001_1111_0010));

        let mut writer = Writer::new();
        let deltas = vec![NdVector::from([0.0, 0.0, 0.0]), NdVector::from([0.0, 8.0, 0.0])];
        assert_eq!(
            encode_positions(&deltas, 4, &mut writer),
            Err(Err::CorrectionOutOfRange { entry: 1, axis: 1, value: 8, bits: 4 })
        );
    }
}
