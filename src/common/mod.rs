pub mod bit_matrix;
pub mod bitstream;
pub mod codec;
pub mod ec;
pub mod error;
pub mod galois;
pub mod iter;
pub mod mask;
pub mod metadata;
pub mod poly;
pub mod version_db;
