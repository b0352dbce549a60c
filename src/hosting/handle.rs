use crate::PlayerId;
use crate::RoomId;
use crate::gameroom::Inbound;
use tokio::sync::mpsc::UnboundedSender;

/// Handle to communicate with a running room.
/// Remembers who sits there so player events can be routed without
/// asking the room.
#[derive(Debug, Clone)]
pub struct RoomHandle {
    pub id: RoomId,
    pub tx: UnboundedSender<Inbound>,
    pub seats: Vec<PlayerId>,
}

impl RoomHandle {
    pub fn seats(&self, player: PlayerId) -> bool {
        self.seats.contains(&player)
    }
    pub fn send(&self, event: Inbound) -> anyhow::Result<()> {
        self.tx
            .send(event)
            .map_err(|_| anyhow::anyhow!("room {} is closed", self.id))
    }
}
