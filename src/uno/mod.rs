pub mod attribute;
pub use attribute::*;

pub mod behavior;
pub use behavior::*;

pub mod card;
pub use card::*;

pub mod color;
pub use color::*;

pub mod deck;

pub mod game;
pub use game::*;
