//! Password-keyed obfuscation of an encoded bitstream.
//!
//! [`scramble`] permutes the position region axis by axis with a seeded list of transpositions,
//! and [`xorify_normals`] masks everything from the normal region to the end of the stream with
//! a seeded bit sequence. Both are reversible permutations keyed by the password. They are not
//! cryptographic primitives.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::core::buffer::{self, Buffer};
use crate::decode::header::{self, decode_header};
use crate::shared::header::{Header, HEADER_SIZE};

const SALT: &str = "salty";

#[remain::sorted]
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Err {
    #[error("Bitstream error: {0}")]
    BufferError(#[from] buffer::Err),
    #[error("Header error: {0}")]
    HeaderError(#[from] header::Err),
}

/// Permutes the X, Y and Z components of the position entries independently.
pub fn scramble(buffer: &mut Buffer, password: &str) -> Result<(), Err> {
    permute_positions(buffer, password, false)
}

/// Undoes [`scramble`] with the same password.
pub fn unscramble(buffer: &mut Buffer, password: &str) -> Result<(), Err> {
    permute_positions(buffer, password, true)
}

/// XORs every bit from the start of the normal region to the end of the buffer with a bit
/// sequence seeded by the password. Applying it twice restores the buffer.
pub fn xorify_normals(buffer: &mut Buffer, password: &str) -> Result<(), Err> {
    let header = read_header(buffer)?;
    let start = header.normal_region_start();
    let mut rng = StdRng::seed_from_u64(seed(password));
    for pos in start..buffer.len() {
        if rng.gen::<bool>() {
            buffer.set_bit(pos, !buffer.get_bit(pos));
        }
    }
    Ok(())
}

fn permute_positions(buffer: &mut Buffer, password: &str, inverse: bool) -> Result<(), Err> {
    let header = read_header(buffer)?;
    let k = header.quantization_bits as usize;
    let n = header.num_entries as usize;
    let slot = |entry: usize, axis: usize| HEADER_SIZE + entry * 3 * k + axis * k;

    for (axis, list) in transpositions(password, n).iter().enumerate() {
        let mut index = (0..n).collect::<Vec<_>>();
        if inverse {
            list.iter().rev().for_each(|&(a, b)| index.swap(a, b));
        } else {
            list.iter().for_each(|&(a, b)| index.swap(a, b));
        }

        let old = (0..n)
            .map(|entry| buffer.get_bits(slot(entry, axis), k))
            .collect::<Result<Vec<_>, _>>()?;
        for (entry, &from) in index.iter().enumerate() {
            buffer.set_bits(slot(entry, axis), k, old[from])?;
        }
    }
    Ok(())
}

/// Reads the header and checks that the position region it declares is present.
fn read_header(buffer: &Buffer) -> Result<Header, Err> {
    let header = decode_header(&mut buffer.reader())?;
    let end = header.normal_region_start();
    if end > buffer.len() {
        return Err(buffer::Err::NotEnoughData {
            requested: end - HEADER_SIZE,
            remaining: buffer.len() - HEADER_SIZE,
        }.into());
    }
    Ok(header)
}

/// One list of 'n' transpositions per axis, drawn in interleaved order.
fn transpositions(password: &str, n: usize) -> [Vec<(usize, usize)>; 3] {
    let mut rng = StdRng::seed_from_u64(seed(password));
    let mut out: [Vec<(usize, usize)>; 3] = Default::default();
    for _ in 0..n {
        for list in &mut out {
            list.push((rng.gen_range(0..n), rng.gen_range(0..n)));
        }
    }
    out
}

/// 64-bit FNV-1a of the password followed by the salt.
fn seed(password: &str) -> u64 {
    password.bytes()
        .chain(SALT.bytes())
        .fold(0xcbf29ce484222325, |hash, byte| (hash ^ byte as u64).wrapping_mul(0x100000001b3))
}
