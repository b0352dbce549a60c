use super::message::*;
use crate::PlayerId;

/// Anything that can be handed a rendered message: a player's DM, a group
/// channel, a terminal.
///
/// Delivery failures are not recovered locally. They propagate to whoever
/// asked for the send, which for a Room means the message stays queued.
#[async_trait::async_trait]
pub trait Recipient: Send + Sync {
    async fn send(&self, message: &Message) -> anyhow::Result<()>;
}

/// A seated participant. Transport-agnostic: the Room does not care whether
/// messages end up in a chat client, a terminal or a test mailbox.
pub trait Player: Recipient {
    /// Identity token, stable for the lifetime of the table.
    fn id(&self) -> PlayerId;
    /// Human readable display name.
    fn name(&self) -> &str;
    /// Reference that addresses the player inside group messages.
    fn mention(&self) -> String {
        format!("<@{}>", self.id())
    }
}
