pub mod game;
pub use game::*;

pub mod score;
pub use score::*;
