/// Size of the fixed-length header in bits.
pub(crate) const HEADER_SIZE: usize = 228;

pub(crate) const QUANTIZATION_BITS_SLOT: usize = 4;
pub(crate) const NUM_ENTRIES_SLOT: usize = 32;
pub(crate) const BOUND_SLOT: usize = 32;

/// Largest quantization that fits in the 4-bit field.
pub(crate) const MAX_QUANTIZATION_BITS: u8 = (1 << QUANTIZATION_BITS_SLOT) - 1;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Header {
    /// number of bits per quantized coordinate.
    pub(crate) quantization_bits: u8,

    /// number of entries in the position and normal regions, one per vertex.
    pub(crate) num_entries: u32,

    pub(crate) min: [f32; 3],
    pub(crate) max: [f32; 3],
}

impl Header {
    /// Position of the first bit of the normal region.
    pub(crate) fn normal_region_start(&self) -> usize {
        HEADER_SIZE + self.position_entry_size() * self.num_entries as usize
    }

    /// Bits taken by one entry of the position region.
    pub(crate) fn position_entry_size(&self) -> usize {
        3 * self.quantization_bits as usize
    }
}
