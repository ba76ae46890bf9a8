use crate::core::buffer::{self, reader::Reader};
use super::Symbol;

/// The binary representations for the CLERS symbols, defined as follows:
/// C: 0
/// L: 100
/// E: 101
/// R: 110
/// S: 111
pub(crate) fn encode_symbol(symbol: Symbol) -> (usize, u64) {
    match symbol {
        Symbol::C => (1, 0),
        Symbol::L => (3, 0b100),
        Symbol::E => (3, 0b101),
        Symbol::R => (3, 0b110),
        Symbol::S => (3, 0b111),
    }
}

pub(crate) fn decode_symbol(reader: &mut Reader<'_>) -> Result<Symbol, buffer::Err> {
    if !reader.next_bit()? {
        return Ok(Symbol::C);
    }
    Ok(
        match reader.next(2)? {
            0b00 => Symbol::L,
            0b01 => Symbol::E,
            0b10 => Symbol::R,
            _ => Symbol::S,
        }
    )
}
