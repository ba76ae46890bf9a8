use super::Buffer;

/// Appends bits to a buffer. Mostly used by the encoder.
pub struct Writer {
	buffer: Buffer,
}

impl From<Writer> for Buffer {
	fn from(writer: Writer) -> Buffer {
		writer.buffer
	}
}

impl Writer {
	pub fn new() -> Self {
		Self { buffer: Buffer::new() }
	}

	/// write the 'size' bits of data at the current offset.
	/// the input will be taken to be the lowest 'size' bits of 'value', most significant first.
	pub fn next(&mut self, (size, value): (usize, u64)) {
		debug_assert!(size <= 64, "Invalid size: {}", size);
		debug_assert!(size == 64 || value >> size == 0, "{} does not fit in {} bits", value, size);
		let pos = self.buffer.len();
		self.buffer.grow(size);
		for i in 0..size {
			self.buffer.set_bit(pos + i, (value >> (size - 1 - i)) & 1 == 1);
		}
	}

	/// the number of bits written so far.
	pub fn len(&self) -> usize {
		self.buffer.len()
	}

	pub fn is_empty(&self) -> bool {
		self.buffer.is_empty()
	}
}

impl Default for Writer {
	fn default() -> Self {
		Self::new()
	}
}
