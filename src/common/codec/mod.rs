pub mod charset;
pub mod encoder;
pub mod types;

pub use charset::*;
pub use encoder::*;
pub use types::*;
