use tracing::debug;

use crate::core::buffer::writer::Writer;
use crate::shared::header::{Header, BOUND_SLOT, NUM_ENTRIES_SLOT, QUANTIZATION_BITS_SLOT};

pub(crate) fn encode_header(header: &Header, writer: &mut Writer) {
    debug!(?header, "writing header");
    writer.next((QUANTIZATION_BITS_SLOT, header.quantization_bits as u64));
    writer.next((NUM_ENTRIES_SLOT, header.num_entries as u64));
    for bound in header.min.iter().chain(&header.max) {
        writer.next((BOUND_SLOT, bound.to_bits() as u64));
    }
}
