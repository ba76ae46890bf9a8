use crate::core::buffer::{self, reader::Reader};
use crate::core::shared::NdVector;
use crate::shared::attribute::portabilization::quantization::from_sign_magnitude;
use crate::shared::attribute::portabilization::spherical::{direction, NORMAL_INDEX_SLOT};
use crate::shared::header::Header;

/// Reads the position region declared by 'header'. The returned corrections are in grid units.
pub(crate) fn decode_positions(reader: &mut Reader<'_>, header: &Header) -> Result<Vec<NdVector<3, f64>>, buffer::Err> {
    let k = header.quantization_bits;
    let n = header.num_entries as usize;
    ensure_remaining(reader, n * header.position_entry_size())?;

    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let mut delta = NdVector::zero();
        for axis in 0..3 {
            let word = reader.next(k as usize)?;
            delta.set(axis, from_sign_magnitude(word, k) as f64);
        }
        out.push(delta);
    }
    Ok(out)
}

/// Reads 'n' Fibonacci-sphere indices and returns the directions they stand for.
pub(crate) fn decode_normals(reader: &mut Reader<'_>, n: usize) -> Result<Vec<NdVector<3, f64>>, buffer::Err> {
    ensure_remaining(reader, n * NORMAL_INDEX_SLOT)?;
    (0..n)
        .map(|_| reader.next(NORMAL_INDEX_SLOT).map(direction))
        .collect()
}

/// Fails early on a truncated stream instead of allocating for a count the stream cannot hold.
fn ensure_remaining(reader: &Reader<'_>, requested: usize) -> Result<(), buffer::Err> {
    if reader.remaining() < requested {
        return Err(buffer::Err::NotEnoughData { requested, remaining: reader.remaining() });
    }
    Ok(())
}
