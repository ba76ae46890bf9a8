pub mod reader;
pub mod writer;

use std::fmt;

use reader::Reader;

/// A growable sequence of bits, stored most significant bit first within each byte.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Buffer {
	data: Vec<u8>,

	/// length of the buffer, i.e. the number of bits stored in the buffer.
	/// 'data' always holds exactly '(len + 7) / 8' bytes, and the unused tail bits are zero.
	len: usize,
}

#[remain::sorted]
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Err {
	#[error("Attempted to read {requested} bits, but only {remaining} bits remain.")]
	NotEnoughData { requested: usize, remaining: usize },
}

impl Buffer {
	/// constructs an empty buffer
	pub fn new() -> Self {
		Self { data: Vec::new(), len: 0 }
	}

	/// returns the number of bits stored in the buffer.
	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// returns a reader starting at the first bit.
	pub fn reader(&self) -> Reader<'_> {
		Reader::new(self)
	}

	/// Wraps raw bytes. Every bit of every byte counts, so trailing padding is part of the buffer.
	pub fn from_bytes(data: Vec<u8>) -> Self {
		let len = data.len() << 3;
		Self { data, len }
	}

	/// Returns the bytes, with the last byte zero-padded.
	pub fn to_bytes(&self) -> Vec<u8> {
		self.data.clone()
	}

	#[inline]
	pub fn get_bit(&self, pos: usize) -> bool {
		debug_assert!(pos < self.len, "bit {} is out of bounds ({})", pos, self.len);
		self.data[pos >> 3] & (0x80 >> (pos & 7)) != 0
	}

	#[inline]
	pub fn set_bit(&mut self, pos: usize, bit: bool) {
		debug_assert!(pos < self.len, "bit {} is out of bounds ({})", pos, self.len);
		let mask = 0x80 >> (pos & 7);
		if bit {
			self.data[pos >> 3] |= mask;
		} else {
			self.data[pos >> 3] &= !mask;
		}
	}

	/// Reads 'size' bits starting at 'pos'. The first bit read becomes the most significant one.
	pub fn get_bits(&self, pos: usize, size: usize) -> Result<u64, Err> {
		debug_assert!(size <= 64, "Invalid size: {}", size);
		if pos + size > self.len {
			return Err(Err::NotEnoughData { requested: size, remaining: self.len.saturating_sub(pos) });
		}
		Ok((pos..pos + size).fold(0, |acc, p| (acc << 1) | self.get_bit(p) as u64))
	}

	/// Overwrites 'size' bits starting at 'pos' with the lowest 'size' bits of 'value'.
	pub fn set_bits(&mut self, pos: usize, size: usize, value: u64) -> Result<(), Err> {
		debug_assert!(size <= 64, "Invalid size: {}", size);
		if pos + size > self.len {
			return Err(Err::NotEnoughData { requested: size, remaining: self.len.saturating_sub(pos) });
		}
		for i in 0..size {
			self.set_bit(pos + i, (value >> (size - 1 - i)) & 1 == 1);
		}
		Ok(())
	}

	/// Appends 'size' zero bits.
	fn grow(&mut self, size: usize) {
		self.len += size;
		self.data.resize((self.len + 7) >> 3, 0);
	}
}

impl fmt::Debug for Buffer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Buffer({} bits: ", self.len)?;
		for byte in &self.data {
			write!(f, "{:02x} ", byte)?;
		}
		write!(f, ")")
	}
}
