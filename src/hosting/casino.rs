use super::*;
use crate::PlayerId;
use crate::RoomId;
use crate::gameroom::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Manages active game rooms and their lifecycles.
///
/// Every room runs on its own task; the casino only keeps the inbox of each
/// one and the ids seated there. A player sits in at most one room.
pub struct Casino {
    rooms: RwLock<HashMap<RoomId, RoomHandle>>,
    count: AtomicU64,
}

impl Default for Casino {
    fn default() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            count: AtomicU64::new(1),
        }
    }
}

impl Casino {
    /// Seats `players` in a new room and spawns it. The room forgets itself
    /// here once the match is over; the returned task yields the winner.
    pub async fn open<R>(
        self: &Arc<Self>,
        rules: R,
        players: Vec<Arc<dyn Player>>,
        timer: TimerConfig,
    ) -> anyhow::Result<(RoomId, JoinHandle<Option<PlayerId>>)>
    where
        R: Rules + 'static,
    {
        if players.is_empty() {
            anyhow::bail!("cannot open a room without players");
        }
        let mut rooms = self.rooms.write().await;
        if let Some((player, room)) = players.iter().find_map(|p| {
            rooms
                .values()
                .find(|h| h.seats(p.id()))
                .map(|h| (p.id(), h.id))
        }) {
            anyhow::bail!("P{} is already playing in room {}", player, room);
        }
        let id = self.count.fetch_add(1, Ordering::Relaxed);
        let mut room = Room::new(id, rules).with_timer(timer);
        let seats = players.iter().map(|p| p.id()).collect::<Vec<_>>();
        for player in players {
            room.sit(player);
        }
        rooms.insert(
            id,
            RoomHandle {
                id,
                tx: room.sender(),
                seats,
            },
        );
        drop(rooms);
        let casino = self.clone();
        let task = tokio::spawn(async move {
            let winner = room.run().await;
            if let Err(e) = casino.close(id).await {
                log::warn!("[casino] {}", e);
            }
            winner
        });
        log::info!("[casino] opened room {}", id);
        Ok((id, task))
    }

    /// Forwards a player event to the room that seats the player.
    pub async fn route(&self, event: Inbound) -> anyhow::Result<RoomId> {
        let player = event
            .player()
            .ok_or_else(|| anyhow::anyhow!("{} does not come from a player", event))?;
        let mut rooms = self.rooms.write().await;
        let handle = rooms
            .values_mut()
            .find(|h| h.seats(player))
            .ok_or_else(|| anyhow::anyhow!("P{} is not playing anywhere", player))?;
        if let Inbound::Leave(_) = event {
            handle.seats.retain(|p| *p != player);
        }
        handle.send(event).map(|_| handle.id)
    }

    /// Asks a room to end without a winner.
    pub async fn stop(&self, id: RoomId) -> anyhow::Result<()> {
        self.rooms
            .read()
            .await
            .get(&id)
            .ok_or_else(|| anyhow::anyhow!("room {} not found", id))?
            .send(Inbound::Stop)
    }

    /// Closes a room and removes it from the casino.
    pub async fn close(&self, id: RoomId) -> anyhow::Result<()> {
        self.rooms
            .write()
            .await
            .remove(&id)
            .map(|_| log::info!("[casino] closed room {}", id))
            .ok_or_else(|| anyhow::anyhow!("room {} not found", id))
    }

    pub async fn room_of(&self, player: PlayerId) -> Option<RoomId> {
        self.rooms
            .read()
            .await
            .values()
            .find(|h| h.seats(player))
            .map(|h| h.id)
    }

    /// Ids of every running room, ascending.
    pub async fn rooms(&self) -> Vec<RoomId> {
        let mut ids = self.rooms.read().await.keys().copied().collect::<Vec<_>>();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blackjack::Blackjack;
    use crate::players::Mailbox;
    use std::time::Duration;

    fn timer() -> TimerConfig {
        TimerConfig {
            tick: Duration::from_secs(60),
            decision: 20,
        }
    }

    #[tokio::test]
    async fn routes_by_player_and_forgets_finished_rooms() {
        let casino = Arc::new(Casino::default());
        let alice = Mailbox::new(1, "alice");
        let (id, task) = casino
            .open(Blackjack::seeded(5), vec![alice.clone()], timer())
            .await
            .unwrap();
        assert_eq!(casino.rooms().await, vec![id]);
        assert_eq!(casino.room_of(1).await, Some(id));
        assert_eq!(casino.route(Inbound::text(1, "stay")).await.unwrap(), id);
        assert!(casino.route(Inbound::text(2, "stay")).await.is_err());
        assert!(casino.route(Inbound::Tick).await.is_err());
        casino.stop(id).await.unwrap();
        assert_eq!(task.await.unwrap(), None);
        assert!(casino.rooms().await.is_empty());
        assert!(alice.texts().contains(&String::from("You stay")));
    }

    #[tokio::test]
    async fn one_room_per_player() {
        let casino = Arc::new(Casino::default());
        let alice = Mailbox::new(1, "alice");
        let bob = Mailbox::new(2, "bob");
        casino
            .open(Blackjack::seeded(5), vec![alice.clone()], timer())
            .await
            .unwrap();
        let twice = casino
            .open(Blackjack::seeded(6), vec![bob.clone(), alice.clone()], timer())
            .await;
        assert!(twice.is_err());
        assert!(casino.open(Blackjack::seeded(7), vec![], timer()).await.is_err());
        casino.route(Inbound::Leave(1)).await.unwrap();
        assert_eq!(casino.room_of(1).await, None);
        assert!(casino.route(Inbound::text(1, "hit")).await.is_err());
    }
}
