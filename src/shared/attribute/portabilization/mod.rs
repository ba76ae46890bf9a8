//! Conversions between positions and normals and their fixed-width representations in the bitstream.

pub(crate) mod quantization;
pub(crate) mod spherical;
