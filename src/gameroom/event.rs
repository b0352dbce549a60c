use crate::PlayerId;
use serde::Deserialize;
use serde::Serialize;

/// Everything a Room reacts to, delivered over its single inbox.
/// Transports produce the player events; the Ticker produces Tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Inbound {
    /// Free text from a player ("hit", "stay", "3", "draw").
    Text { player: PlayerId, text: String },
    /// Answer to the last prompt presented to the player, zero-based.
    Choice { player: PlayerId, option: usize },
    /// Player left the table.
    Leave(PlayerId),
    /// One countdown unit elapsed.
    Tick,
    /// Tear the room down without a winner.
    Stop,
}

impl Inbound {
    pub fn text(player: PlayerId, text: impl Into<String>) -> Self {
        Self::Text {
            player,
            text: text.into(),
        }
    }
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Inbound::Text { player, .. } => Some(*player),
            Inbound::Choice { player, .. } => Some(*player),
            Inbound::Leave(player) => Some(*player),
            Inbound::Tick | Inbound::Stop => None,
        }
    }
}

impl std::fmt::Display for Inbound {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Inbound::Text { player, text } => write!(f, "P{}: {:?}", player, text),
            Inbound::Choice { player, option } => write!(f, "P{}: #{}", player, option + 1),
            Inbound::Leave(player) => write!(f, "P{}: leaves", player),
            Inbound::Tick => write!(f, "tick"),
            Inbound::Stop => write!(f, "stop"),
        }
    }
}
