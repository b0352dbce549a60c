use super::inbox::*;
use super::event::*;
use super::message::*;
use super::player::*;
use super::rules::*;
use super::table::*;
use super::timer::*;
use crate::PlayerId;
use crate::RoomId;
use crate::Seat;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Where a room is in its lifecycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Seats filling, nothing dealt.
    #[default]
    Idle,
    /// A decision is pending and the countdown runs.
    Deciding,
    /// Round resolved, intermission countdown runs.
    Resolving,
    /// Match finished. Every further event is ignored.
    Over,
}

/// Central coordinator for one match.
///
/// Owns the table and the rule set exclusively and processes one inbound
/// event at a time: validate the sender is the pending actor, let the rules
/// resolve the action, advance the turn, then flush everything the
/// transition queued before looking at the next event.
///
/// Room runs a loop over its inbox:
/// - Text / Choice: routed to the rules if it is the sender's turn
/// - Tick: counts down, forcing the default action at zero
/// - Leave: forces the default for a pending actor, then unseats
/// - Stop: ends the match without a winner
pub struct Room<R: Rules> {
    id: RoomId,
    table: Table,
    rules: R,
    timer: TimerConfig,
    phase: Phase,
    winner: Option<PlayerId>,
    inbox: Inbox<Inbound>,
}

impl<R: Rules> Room<R> {
    pub fn new(id: RoomId, rules: R) -> Self {
        Self {
            id,
            rules,
            table: Table::default(),
            timer: TimerConfig::default(),
            phase: Phase::default(),
            winner: None,
            inbox: Inbox::default(),
        }
    }
    pub fn with_timer(mut self, timer: TimerConfig) -> Self {
        self.timer = timer;
        self
    }
    /// Group destination that receives every announcement.
    pub fn with_channel(mut self, channel: Arc<dyn Recipient>) -> Self {
        self.table = self.table.with_channel(channel);
        self
    }
    pub fn sit(&mut self, player: Arc<dyn Player>) -> Seat {
        log::debug!("[room {}] {} sits down", self.id, player.name());
        self.table.sit(player)
    }
    /// Handle for feeding events into this room.
    pub fn sender(&self) -> UnboundedSender<Inbound> {
        self.inbox.sender()
    }
    pub fn id(&self) -> RoomId {
        self.id
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn table(&self) -> &Table {
        &self.table
    }
    pub fn rules(&self) -> &R {
        &self.rules
    }
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }
}

impl<R: Rules> Room<R> {
    /// Plays the match to the end and returns the winner, if any.
    pub async fn run(mut self) -> Option<PlayerId> {
        log::info!(
            "[room {}] {} starts with {} players",
            self.id,
            self.rules.name(),
            self.table.len()
        );
        let ticker = Ticker::spawn(self.timer.tick, self.sender());
        self.start();
        self.deliver().await;
        while self.phase != Phase::Over {
            match self.inbox.next().await {
                Some(event) => self.handle(event),
                None => break,
            }
            self.deliver().await;
        }
        ticker.stop().await;
        self.winner
    }

    /// Deals and opens the first round.
    pub fn start(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }
        if !self.rules.playable(self.table.len()) {
            log::info!("[room {}] not enough players to start", self.id);
            self.table
                .announce(Message::text(format!(
                    "{} can't be played with {} players",
                    self.rules.name(),
                    self.table.len()
                )));
            return self.finish(None);
        }
        self.rules.start(&mut self.table);
        self.begin_round();
    }

    pub fn handle(&mut self, event: Inbound) {
        if self.phase == Phase::Over {
            return;
        }
        if event != Inbound::Tick {
            log::debug!("[room {}] {}", self.id, event);
        }
        match event {
            Inbound::Text { player, text } => self.text(player, &text),
            Inbound::Choice { player, option } => self.choice(player, option),
            Inbound::Leave(player) => self.leave(player),
            Inbound::Tick => self.tick(),
            Inbound::Stop => self.stop(),
        }
    }

    /// Sends everything queued so far, in order. A message a player could
    /// not receive is retried on later flushes without holding back anyone
    /// else.
    pub async fn flush(&mut self) -> anyhow::Result<()> {
        self.table.outbox_mut().flush().await
    }

    async fn deliver(&mut self) {
        if let Err(e) = self.flush().await {
            log::warn!("[room {}] delivery failed: {:#}", self.id, e);
        }
    }
}

impl<R: Rules> Room<R> {
    /// Seat whose input is awaited right now.
    fn decider(&self) -> Option<Seat> {
        match self.phase {
            Phase::Deciding => self.rules.actor(&self.table),
            _ => None,
        }
    }

    fn text(&mut self, id: PlayerId, text: &str) {
        let Some(seat) = self.table.seat_of(id) else {
            return log::warn!("[room {}] text from unseated P{}", self.id, id);
        };
        let Some(action) = self.rules.parse(text) else {
            return;
        };
        match self.decider() {
            Some(actor) if actor == seat => match self.rules.act(&mut self.table, seat, action) {
                Ok(outcome) => self.resolve(outcome),
                Err(illegal) => self.reject(seat, illegal),
            },
            _ => self.reject(seat, Illegal::NotYourTurn),
        }
    }

    fn choice(&mut self, id: PlayerId, option: usize) {
        let Some(seat) = self.table.seat_of(id) else {
            return log::warn!("[room {}] choice from unseated P{}", self.id, id);
        };
        match self.decider() {
            Some(actor) if actor == seat => match self.rules.choose(&mut self.table, seat, option) {
                Ok(outcome) => self.resolve(outcome),
                Err(illegal) => self.reject(seat, illegal),
            },
            _ => self.reject(seat, Illegal::NotYourTurn),
        }
    }

    fn reject(&mut self, seat: Seat, illegal: Illegal) {
        log::debug!("[room {}] rejected {}: {}", self.id, self.table.name(seat), illegal);
        self.table.tell(seat, Message::text(illegal.to_string()));
    }

    fn tick(&mut self) {
        if !self.table.turns_mut().tick() {
            return;
        }
        match self.phase {
            Phase::Deciding => {
                log::debug!("[room {}] countdown expired", self.id);
                let outcome = self.rules.force(&mut self.table);
                self.resolve(outcome);
            }
            Phase::Resolving => self.begin_round(),
            Phase::Idle | Phase::Over => {}
        }
    }

    fn leave(&mut self, id: PlayerId) {
        let Some(seat) = self.table.seat_of(id) else {
            return log::warn!("[room {}] P{} left but was not seated", self.id, id);
        };
        if self.decider() == Some(seat) {
            let outcome = self.rules.force(&mut self.table);
            self.resolve(outcome);
        }
        if self.phase == Phase::Over {
            return;
        }
        let mention = self.table.mention(seat);
        self.table.stand(seat);
        self.rules.stand(seat);
        log::info!("[room {}] P{} left", self.id, id);
        self.table
            .announce(Message::text(format!("{} left the game", mention)));
        if !self.rules.playable(self.table.len()) {
            self.finish(None);
        }
    }

    fn stop(&mut self) {
        log::info!("[room {}] stopped", self.id);
        self.table.announce(Message::text("The game was stopped"));
        self.finish(None);
    }
}

impl<R: Rules> Room<R> {
    fn resolve(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Waiting => {}
            Outcome::Next => self.table.turns_mut().arm(self.timer.decision),
            Outcome::RoundOver => self.conclude(),
        }
    }

    /// Round resolved: publish what happened, check for a winner, then move
    /// the turn on and schedule the next round.
    fn conclude(&mut self) {
        self.table.turns_mut().disarm();
        let current = self.table.turns().current();
        self.table.publish(current);
        if let Some(seat) = self.rules.winner(&self.table) {
            return self.finish(Some(seat));
        }
        self.table.turns_mut().cycle();
        self.table.turns_mut().advance();
        match self.rules.intermission() {
            0 => self.begin_round(),
            ticks => {
                self.phase = Phase::Resolving;
                self.table.turns_mut().arm(ticks);
            }
        }
    }

    fn begin_round(&mut self) {
        log::debug!(
            "[room {}] round begins, {} to act",
            self.id,
            self.table.name(self.table.turns().current())
        );
        self.phase = Phase::Deciding;
        self.table.turns_mut().arm(self.timer.decision);
        self.rules.begin_round(&mut self.table);
    }

    fn finish(&mut self, winner: Option<Seat>) {
        self.phase = Phase::Over;
        self.table.turns_mut().disarm();
        self.winner = winner
            .and_then(|seat| self.table.player(seat))
            .map(|p| p.id());
        let description = match winner {
            Some(seat) => format!("{} wins!", self.table.mention(seat)),
            None => String::from("Nobody wins"),
        };
        log::info!("[room {}] game over: {}", self.id, description);
        self.table
            .announce(Message::summary("Game over", description));
    }
}

impl<R: Rules> std::fmt::Debug for Room<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Room")
            .field("id", &self.id)
            .field("rules", &self.rules.name())
            .field("phase", &self.phase)
            .field("table", &self.table)
            .finish()
    }
}
