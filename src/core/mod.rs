pub mod shared;
pub mod corner_table;
pub mod mesh;
pub mod buffer;
