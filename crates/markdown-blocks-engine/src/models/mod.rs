pub mod block;
pub mod span;

pub use block::*;
pub use span::*;
