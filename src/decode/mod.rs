pub mod connectivity;
pub mod geometry;
pub mod header;
pub(crate) mod attribute;

use std::borrow::Cow;

use tracing::info;

use crate::core::buffer::{self, Buffer};
use crate::core::mesh::Mesh;
use crate::core::shared::{ConfigType, NdVector};
use crate::scramble;
use crate::shared::attribute::portabilization::quantization::Quantization;
use crate::shared::attribute::prediction_transform::{difference::Difference, PredictionTransform};
use crate::shared::connectivity::edgebreaker::symbol_encoder::decode_symbol;
use crate::shared::connectivity::edgebreaker::{Clers, CLERS_LENGTH_SLOT};
use connectivity::edgebreaker::decompress_connectivity;
use geometry::decompress_geometry_with;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Must match the password the stream was encoded with.
    pub password: Option<String>,
}

impl ConfigType for Config {
    fn default() -> Self {
        Self { password: None }
    }
}

#[remain::sorted]
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Err {
    #[error("Bitstream error: {0}")]
    BufferError(#[from] buffer::Err),
    #[error("Connectivity decoding error: {0}")]
    ConnectivityError(#[from] connectivity::edgebreaker::Err),
    #[error("Geometry decoding error: {0}")]
    GeometryError(#[from] geometry::Err),
    #[error("Header error: {0}")]
    HeaderError(#[from] header::Err),
    #[error("Expected {expected} normals, one per vertex, but got {found}.")]
    NormalCountMismatch { expected: usize, found: usize },
    #[error("Scramble error: {0}")]
    ScrambleError(#[from] scramble::Err),
    #[error("The header declares {header} vertices, but the CLERS string describes {clers}.")]
    VertexCountMismatch { header: usize, clers: usize },
}

/// Rebuilds a mesh from a CLERS string and its corrections. Vertex 'i' of the result is the
/// 'i'th vertex the encoder visited.
pub fn decompress(clers: &Clers, deltas: &[NdVector<3, f64>]) -> Result<Mesh, Err> {
    decompress_with(clers, deltas, &Difference)
}

fn decompress_with<T: PredictionTransform>(clers: &Clers, deltas: &[NdVector<3, f64>], transform: &T) -> Result<Mesh, Err> {
    info!(symbols = clers.len(), deltas = deltas.len(), "decompressing");
    let table = decompress_connectivity(clers)?;
    let positions = decompress_geometry_with(&table, deltas, transform)?;
    let mesh = Mesh {
        positions,
        faces: table.faces(),
        normals: None,
    };
    info!(vertices = mesh.num_vertices(), triangles = mesh.num_faces(), "decompressed");
    Ok(mesh)
}

/// Like [`decompress`], and attaches 'normals', which must be in the same order as 'deltas'.
pub fn decompress_with_normals(
    clers: &Clers,
    deltas: &[NdVector<3, f64>],
    normals: &[NdVector<3, f64>],
) -> Result<Mesh, Err> {
    if normals.len() != deltas.len() {
        return Err(Err::NormalCountMismatch { expected: deltas.len(), found: normals.len() });
    }
    let mut mesh = decompress(clers, deltas)?;
    mesh.normals = Some(normals.to_vec());
    Ok(mesh)
}

/// Decodes a bitstream produced by [`crate::encode::encode`].
pub fn decode(buffer: &Buffer, cfg: &Config) -> Result<Mesh, Err> {
    info!(bits = buffer.len(), "decoding");
    let buffer = match &cfg.password {
        Some(password) => {
            let mut buffer = buffer.clone();
            scramble::xorify_normals(&mut buffer, password)?;
            scramble::unscramble(&mut buffer, password)?;
            Cow::Owned(buffer)
        },
        None => Cow::Borrowed(buffer),
    };

    let mut reader = buffer.reader();
    let header = header::decode_header(&mut reader)?;
    let deltas = attribute::decode_positions(&mut reader, &header)?;
    let normals = attribute::decode_normals(&mut reader, deltas.len())?;

    let num_symbols = reader.next(CLERS_LENGTH_SLOT)? as usize;
    // every symbol takes at least one bit
    if reader.remaining() < num_symbols {
        return Err(buffer::Err::NotEnoughData { requested: num_symbols, remaining: reader.remaining() }.into());
    }
    let clers = (0..num_symbols)
        .map(|_| decode_symbol(&mut reader))
        .collect::<Result<Vec<_>, _>>()
        .map(Clers::from)?;

    if clers.num_vertices() != deltas.len() {
        return Err(Err::VertexCountMismatch { header: deltas.len(), clers: clers.num_vertices() });
    }

    let quantization = Quantization::new(header.quantization_bits, header.min, header.max);
    let mut mesh = decompress_with(&clers, &deltas, &quantization.correction_transform())?;
    mesh.normals = Some(normals);
    for p in &mut mesh.positions {
        *p = quantization.dequantize(*p);
    }
    info!(vertices = mesh.num_vertices(), triangles = mesh.num_faces(), "decoded");
    Ok(mesh)
}
