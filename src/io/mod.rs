/// Wavefront OBJ import and export.
pub mod obj;
