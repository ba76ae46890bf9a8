// lib.rs

//! EdgeBreaker compression of closed triangle meshes.
//!
//! [`encode::compress`] turns a mesh into a CLERS string and a list of correction vectors,
//! and [`decode::decompress`] rebuilds the mesh from them. [`encode::encode`] and
//! [`decode::decode`] additionally quantize the geometry and pack everything into a bitstream.

/// Contains the interface between `Mesh` objects and obj files.
pub mod io;

/// Contains definitions shared by the encoder and the decoder.
pub mod shared;

/// Defines the encoder.
pub mod encode;

/// Defines the decoder.
pub mod decode;

/// Contains the shared definitions, native objects, and the buffer.
pub mod core;

/// Password-keyed permutation of encoded streams.
pub mod scramble;

/// Distance and topology measurements for comparing meshes.
pub mod eval;


/// Contains the most commonly used traits, types, and objects.
pub mod prelude {
    pub use crate::core::mesh::{Mesh, builder::MeshBuilder, preprocess::preprocess};
    pub use crate::core::corner_table::{CornerTable, GenericCornerTable};
    pub use crate::core::shared::{ConfigType, Cross, DataValue, Dot, NdVector};
    pub use crate::core::buffer::Buffer;
    pub use crate::shared::connectivity::edgebreaker::{Clers, Symbol};
    pub use crate::encode::{self, compress, encode, Compressed};
    pub use crate::encode::connectivity::edgebreaker::StartCorner;
    pub use crate::decode::{self, decode, decompress, decompress_with_normals};
    pub use crate::decode::connectivity::edgebreaker::decompress_connectivity;
    pub use crate::decode::geometry::decompress_geometry;
    pub use crate::eval::{hausdorff_distance, MeshStats};
    pub use crate::io::obj::{load_obj, write_obj};
}
