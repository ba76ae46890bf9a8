use tracing::debug;

use crate::core::buffer::{self, reader::Reader};
use crate::shared::header::{Header, BOUND_SLOT, NUM_ENTRIES_SLOT, QUANTIZATION_BITS_SLOT};

#[remain::sorted]
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Err {
    #[error("Not enough data to read the header: {0}")]
    BufferError(#[from] buffer::Err),
    #[error("The header declares {0} bits per coordinate; at least one is required.")]
    InvalidQuantizationBits(u8),
}

pub(crate) fn decode_header(reader: &mut Reader<'_>) -> Result<Header, Err> {
    let quantization_bits = reader.next(QUANTIZATION_BITS_SLOT)? as u8;
    if quantization_bits == 0 {
        return Err(Err::InvalidQuantizationBits(quantization_bits));
    }
    let num_entries = reader.next(NUM_ENTRIES_SLOT)? as u32;

    let mut bounds = [0_f32; 6];
    for bound in &mut bounds {
        *bound = f32::from_bits(reader.next(BOUND_SLOT)? as u32);
    }
    let header = Header {
        quantization_bits,
        num_entries,
        min: [bounds[0], bounds[1], bounds[2]],
        max: [bounds[3], bounds[4], bounds[5]],
    };
    debug!(?header, "read header");
    Ok(header)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::buffer::{writer::Writer, Buffer};
    use crate::encode::header::encode_header;
    use crate::shared::header::HEADER_SIZE;

    #[test]
    fn header_layout() {
        let header = Header {
            quantization_bits: 10,
            num_entries: 5,
            min: [-1.0, -2.5, 0.0],
            max: [1.0, 2.5, 3.25],
        };
        let mut writer = Writer::new();
        encode_header(&header, &mut writer);
        let buffer: Buffer = writer.into();
        assert_eq!(buffer.len(), HEADER_SIZE);
        assert_eq!(buffer.get_bits(0, 4), Ok(10));
        assert_eq!(buffer.get_bits(4, 32), Ok(5));
        assert_eq!(buffer.get_bits(36, 32), Ok((-1.0_f32).to_bits() as u64));
        assert_eq!(buffer.get_bits(196, 32), Ok(3.25_f32.to_bits() as u64));

        assert_eq!(decode_header(&mut buffer.reader()), Ok(header));
    }

    #[test]
    fn header_errors() {
        let mut writer = Writer::new();
        writer.next((4, 0));
        writer.next((32, 3));
        let buffer: Buffer = writer.into();
        assert_eq!(decode_header(&mut buffer.reader()), Err(Err::InvalidQuantizationBits(0)));

        let buffer = Buffer::from_bytes(vec![0xa0; 4]);
        assert_eq!(
            decode_header(&mut buffer.reader()),
            Err(Err::BufferError(buffer::Err::NotEnoughData { requested: 32, remaining: 28 }))
        );
    }
}
