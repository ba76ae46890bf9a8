pub mod connectivity;
pub mod attribute;
pub(crate) mod header;
