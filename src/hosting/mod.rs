mod casino;
mod handle;

pub use casino::*;
pub use handle::*;
