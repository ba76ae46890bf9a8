//! Position predictors shared by the encoder and the decoder. Both sides must evaluate
//! exactly the same floating-point expressions so that decoding reproduces the encoder's
//! reconstruction bit for bit.

pub(crate) mod delta_prediction;
pub(crate) mod mesh_parallelogram_prediction;
