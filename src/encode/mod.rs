pub mod connectivity;
pub(crate) mod header;
pub(crate) mod attribute;

use tracing::{debug, info};

use crate::core::buffer::{writer::Writer, Buffer};
use crate::core::mesh::{preprocess::preprocess, Mesh};
use crate::core::shared::{ConfigType, NdVector, VertexIdx};
use crate::scramble;
use crate::shared::attribute::portabilization::quantization::Quantization;
use crate::shared::attribute::prediction_transform::{difference::Difference, PredictionTransform};
use crate::shared::connectivity::edgebreaker::symbol_encoder::encode_symbol;
use crate::shared::connectivity::edgebreaker::{Clers, Symbol, CLERS_LENGTH_SLOT};
use crate::shared::header::{Header, MAX_QUANTIZATION_BITS};
use connectivity::edgebreaker::{self, encode_connectivity, Traversal};

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Bits per quantized coordinate, between 1 and 15.
    pub quantization_bits: u8,

    /// When set, the encoded stream is scrambled with this password.
    pub password: Option<String>,

    pub connectivity: edgebreaker::Config,
}

impl ConfigType for Config {
    fn default() -> Self {
        Self {
            quantization_bits: 10,
            password: None,
            connectivity: edgebreaker::Config::default(),
        }
    }
}

/// Output of [`compress`].
#[derive(Clone, Debug, PartialEq)]
pub struct Compressed {
    pub clers: Clers,

    /// The seed triangle's first position, two differences, and one correction per `C` symbol.
    pub deltas: Vec<NdVector<3, f64>>,

    /// The mesh's normals reordered like 'deltas', if the mesh has normals.
    pub normals: Option<Vec<NdVector<3, f64>>>,

    /// The 'i'th entry is the index in the input mesh of the vertex that decompression numbers 'i'.
    pub vertex_order: Vec<VertexIdx>,
}

#[remain::sorted]
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Err {
    #[error("Attribute encoding error: {0}")]
    AttributeError(#[from] attribute::Err),
    #[error("Connectivity encoding error: {0}")]
    ConnectivityError(#[from] edgebreaker::Err),
    #[error("{0} bits per coordinate is not supported; use 1 to 15.")]
    InvalidQuantizationBits(u8),
    #[error("Scramble error: {0}")]
    ScrambleError(#[from] scramble::Err),
    #[error("{0} vertices do not fit in the header.")]
    TooManyVertices(usize),
}

/// Runs the EdgeBreaker traversal on a closed mesh, or on a single triangle.
pub fn compress(mesh: &Mesh, cfg: &edgebreaker::Config) -> Result<Compressed, Err> {
    compress_with(mesh, cfg, &Difference)
}

fn compress_with<T: PredictionTransform>(mesh: &Mesh, cfg: &edgebreaker::Config, transform: &T) -> Result<Compressed, Err> {
    info!(vertices = mesh.num_vertices(), triangles = mesh.num_faces(), "compressing");
    let Traversal { clers, deltas, vertex_order } = encode_connectivity(mesh, cfg, transform)?;

    debug!(
        c = clers.count(Symbol::C),
        l = clers.count(Symbol::L),
        e = clers.count(Symbol::E),
        r = clers.count(Symbol::R),
        s = clers.count(Symbol::S),
        "symbol histogram"
    );
    let normals = mesh.normals.as_ref()
        .map(|normals| vertex_order.iter().map(|&v| normals[v]).collect());

    info!(symbols = clers.len(), deltas = deltas.len(), "compressed");
    Ok(Compressed { clers, deltas, normals, vertex_order })
}

/// Quantizes, compresses and serializes a closed mesh.
/// Vertices that fall into the same grid cell are merged before compressing.
pub fn encode(mesh: &Mesh, cfg: &Config) -> Result<Buffer, Err> {
    let bits = cfg.quantization_bits;
    if bits == 0 || bits > MAX_QUANTIZATION_BITS {
        return Err(Err::InvalidQuantizationBits(bits));
    }
    let (min, max) = mesh.bounding_box()
        .ok_or(Err::ConnectivityError(edgebreaker::Err::EmptyMesh))?;
    let min = min.as_array().map(|x| x as f32);
    let max = max.as_array().map(|x| x as f32);

    let quantization = Quantization::new(bits, min, max);
    let quantized = preprocess(Mesh {
        positions: mesh.positions.iter().map(|&p| quantization.quantize(p)).collect(),
        faces: mesh.faces.clone(),
        normals: Some(mesh.normals.clone().unwrap_or_else(|| mesh.vertex_normals())),
    });
    let compressed = compress_with(&quantized, &cfg.connectivity, &quantization.correction_transform())?;

    let normals = compressed.normals.unwrap_or_default();
    let num_entries = u32::try_from(compressed.deltas.len())
        .map_err(|_| Err::TooManyVertices(compressed.deltas.len()))?;

    let mut writer = Writer::new();
    header::encode_header(
        &Header { quantization_bits: bits, num_entries, min, max },
        &mut writer
    );
    attribute::encode_positions(&compressed.deltas, bits, &mut writer)?;
    attribute::encode_normals(&normals, &mut writer);
    writer.next((CLERS_LENGTH_SLOT, compressed.clers.len() as u64));
    for symbol in compressed.clers.iter() {
        writer.next(encode_symbol(symbol));
    }

    let mut buffer: Buffer = writer.into();
    if let Some(password) = &cfg.password {
        scramble::scramble(&mut buffer, password)?;
        scramble::xorify_normals(&mut buffer, password)?;
    }
    info!(bits = buffer.len(), "encoded");
    Ok(buffer)
}
