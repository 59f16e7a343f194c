mod block;
mod encoder;

pub use block::*;
pub use encoder::*;
