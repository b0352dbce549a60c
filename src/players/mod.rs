mod mailbox;
pub use mailbox::*;

#[cfg(feature = "cli")]
mod console;
#[cfg(feature = "cli")]
pub use console::*;
