pub(crate) mod prediction_scheme;
pub(crate) mod prediction_transform;
pub(crate) mod portabilization;
