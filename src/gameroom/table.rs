use super::message::*;
use super::multicast::*;
use super::outbox::*;
use super::player::*;
use super::turns::*;
use crate::PlayerId;
use crate::Seat;
use std::sync::Arc;

/// Seated players, turn order and pending output of one room.
///
/// Rule engines get `&mut Table` for every callback. They address players by
/// seat and queue messages; nothing is sent until the Room flushes.
#[derive(Default)]
pub struct Table {
    players: Vec<Arc<dyn Player>>,
    channel: Option<Arc<dyn Recipient>>,
    turns: Turns,
    outbox: Outbox,
    actions: Vec<(String, String)>,
}

impl Table {
    pub fn with_channel(mut self, channel: Arc<dyn Recipient>) -> Self {
        self.channel = Some(channel);
        self
    }
    pub fn sit(&mut self, player: Arc<dyn Player>) -> Seat {
        self.players.push(player);
        self.turns.sit();
        self.players.len() - 1
    }
    /// Removes a seat. Everyone above it moves down by one.
    pub fn stand(&mut self, seat: Seat) -> Option<Arc<dyn Player>> {
        if seat >= self.players.len() {
            return None;
        }
        self.turns.stand(seat);
        Some(self.players.remove(seat))
    }
    pub fn seat_of(&self, id: PlayerId) -> Option<Seat> {
        self.players.iter().position(|p| p.id() == id)
    }
    pub fn player(&self, seat: Seat) -> Option<&Arc<dyn Player>> {
        self.players.get(seat)
    }
    pub fn mention(&self, seat: Seat) -> String {
        self.player(seat)
            .map(|p| p.mention())
            .unwrap_or_else(|| format!("seat {}", seat))
    }
    pub fn name(&self, seat: Seat) -> String {
        self.player(seat)
            .map(|p| p.name().to_string())
            .unwrap_or_else(|| format!("seat {}", seat))
    }
    pub fn len(&self) -> usize {
        self.players.len()
    }
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
    pub fn everyone(&self) -> Multicast {
        Multicast::from(self.players.clone())
    }
    pub fn turns(&self) -> &Turns {
        &self.turns
    }
    pub fn turns_mut(&mut self) -> &mut Turns {
        &mut self.turns
    }
    pub fn outbox(&self) -> &Outbox {
        &self.outbox
    }
    pub fn outbox_mut(&mut self) -> &mut Outbox {
        &mut self.outbox
    }
}

/// Queueing messages.
impl Table {
    pub fn tell(&mut self, seat: Seat, message: Message) {
        if let Some(player) = self.player(seat).cloned() {
            let target = Target::Players(Multicast::from(vec![player]));
            self.outbox.post(target, message);
        }
    }
    /// Everyone except `seat`.
    pub fn others(&mut self, seat: Seat, message: Message) {
        let target = match self.player(seat) {
            Some(player) => self.everyone().excluding(player.id()),
            None => self.everyone(),
        };
        self.outbox.post(Target::Players(target), message);
    }
    /// Every seat, then the group channel if there is one.
    pub fn announce(&mut self, message: Message) {
        if let Some(channel) = self.channel.clone() {
            self.outbox.post(Target::Channel(channel), message.clone());
        }
        self.outbox.post(Target::Players(self.everyone()), message);
    }
}

/// Actions of the turn in flight, each in second and third person:
/// ("draw 2 cards", "draws 2 cards").
impl Table {
    pub fn record(&mut self, you: impl Into<String>, them: impl Into<String>) {
        self.actions.push((you.into(), them.into()));
    }
    pub fn actions(&self) -> &[(String, String)] {
        &self.actions
    }
    /// Sends the recorded actions as "You …" to the actor and as
    /// "<mention> …" to everyone else, then forgets them.
    pub fn publish(&mut self, actor: Seat) {
        if self.actions.is_empty() {
            return;
        }
        let (you, them) = std::mem::take(&mut self.actions)
            .into_iter()
            .unzip::<_, _, Vec<_>, Vec<_>>();
        let mention = self.mention(actor);
        self.tell(actor, Message::text(format!("You {}", crate::human_join(&you))));
        self.others(actor, Message::text(format!("{} {}", mention, crate::human_join(&them))));
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("players", &self.everyone())
            .field("turns", &self.turns)
            .field("outbox", &self.outbox.len())
            .finish()
    }
}
