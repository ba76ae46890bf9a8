use super::{Buffer, Err};

/// Reads the bits of a buffer from front to back. Mostly used by the decoder.
pub struct Reader<'buffer> {
	buffer: &'buffer Buffer,

	/// position of the next bit to be read.
	pos: usize,
}

impl<'buffer> Reader<'buffer> {
	pub(super) fn new(buffer: &'buffer Buffer) -> Self {
		Self { buffer, pos: 0 }
	}

	/// read the 'size' bits of data at the current offset.
	/// the output data is stored in the lowest 'size' bits.
	pub fn next(&mut self, size: usize) -> Result<u64, Err> {
		let out = self.buffer.get_bits(self.pos, size)?;
		self.pos += size;
		Ok(out)
	}

	pub fn next_bit(&mut self) -> Result<bool, Err> {
		Ok(self.next(1)? == 1)
	}

	/// the position of the next bit to be read.
	pub fn position(&self) -> usize {
		self.pos
	}

	pub fn remaining(&self) -> usize {
		self.buffer.len() - self.pos
	}
}
