mod event;
mod inbox;
mod message;
mod multicast;
mod outbox;
mod player;
mod room;
mod rules;
mod table;
mod timer;
mod turns;

pub use event::*;
pub use inbox::*;
pub use message::*;
pub use multicast::*;
pub use outbox::*;
pub use player::*;
pub use room::*;
pub use rules::*;
pub use table::*;
pub use timer::*;
pub use turns::*;
