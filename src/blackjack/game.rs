use super::score::*;
use crate::BLACKJACK_SEATS;
use crate::DEALER_STANDS;
use crate::Seat;
use crate::WIN_POINTS;
use crate::cards::Card;
use crate::cards::Deck;
use crate::gameroom::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::HashSet;
use std::collections::VecDeque;

/// A parsed Blackjack command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Hit,
    Stay,
}

/// Per-seat state that survives rounds.
#[derive(Debug, Default, Clone)]
pub struct Gambler {
    hand: Hand,
    points: u32,
}

impl Gambler {
    pub fn hand(&self) -> &Hand {
        &self.hand
    }
    pub fn points(&self) -> u32 {
        self.points
    }
}

/// Blackjack rule engine. Every seat plays against the dealer and against
/// each other; the best hand of a round scores a point.
pub struct Blackjack {
    rng: SmallRng,
    preset: VecDeque<Deck<Card>>,
    deck: Deck<Card>,
    dealer: Hand,
    gamblers: Vec<Gambler>,
    queue: Vec<Seat>,
    cursor: usize,
    round: usize,
}

impl Default for Blackjack {
    fn default() -> Self {
        Self::new(SmallRng::from_os_rng())
    }
}

impl Blackjack {
    pub fn new(rng: SmallRng) -> Self {
        Self {
            rng,
            preset: VecDeque::new(),
            deck: Deck::default(),
            dealer: Hand::default(),
            gamblers: Vec::new(),
            queue: Vec::new(),
            cursor: 0,
            round: 0,
        }
    }
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
    /// Queues a deck to be used as ordered for the next round that has none.
    pub fn preset(mut self, deck: Deck<Card>) -> Self {
        self.preset.push_back(deck);
        self
    }
    pub fn gambler(&self, seat: Seat) -> Option<&Gambler> {
        self.gamblers.get(seat)
    }
    pub fn dealer(&self) -> &Hand {
        &self.dealer
    }
    pub fn round(&self) -> usize {
        self.round
    }
    /// Seats that still have to decide this round, in the order they are asked.
    pub fn deciding(&self) -> &[Seat] {
        &self.queue
    }
}

impl Blackjack {
    fn shuffled(&mut self) -> Deck<Card> {
        let mut deck = Deck::standard();
        deck.shuffle(&mut self.rng);
        deck
    }

    fn draw(&mut self) -> Card {
        match self.deck.draw() {
            Some(card) => card,
            None => {
                log::debug!("[blackjack] deck ran dry, reshuffling what nobody holds");
                self.refill();
                self.draw()
            }
        }
    }

    /// Shuffled deck of every card not in a hand this round. Seating is
    /// capped at `BLACKJACK_SEATS`, so it is never empty.
    fn refill(&mut self) {
        let held = self
            .gamblers
            .iter()
            .map(Gambler::hand)
            .chain(std::iter::once(&self.dealer))
            .flat_map(|hand| hand.cards().iter().copied())
            .collect::<HashSet<Card>>();
        let mut fresh = Deck::standard();
        let mut deck = Deck::from(
            std::iter::from_fn(|| fresh.draw())
                .filter(|card| !held.contains(card))
                .collect::<Vec<_>>(),
        );
        deck.shuffle(&mut self.rng);
        self.deck = deck;
    }

    fn decide(&mut self, table: &mut Table) {
        let Some(seat) = self.actor(table) else {
            return;
        };
        let hand = self.gamblers.get(seat).map(|g| g.hand.clone()).unwrap_or_default();
        let visible = self.dealer.visible();
        let decision = Message::summary("Your decision", "\"hit\" or \"stay\"?")
            .field("Your hand", format!("{}\n(score: {})", hand, hand.score()))
            .field(
                "The dealer's hand",
                format!("{}  ??\n(score of visible: {})", visible, visible.score()),
            );
        let mention = table.mention(seat);
        table.tell(seat, decision);
        table.others(seat, Message::text(format!("{} is deciding", mention)));
    }

    fn hit(&mut self, table: &mut Table, seat: Seat) -> Outcome {
        let card = self.draw();
        let mention = table.mention(seat);
        table.tell(seat, Message::text(format!("You hit {}", card)));
        table.others(seat, Message::text(format!("{} hits", mention)));
        let Some(gambler) = self.gamblers.get_mut(seat) else {
            return self.proceed(table);
        };
        gambler.hand.push(card);
        match gambler.hand.is_bust() {
            true => {
                let shown = format!("{} ({})", gambler.hand, gambler.hand.score());
                log::debug!("[blackjack] {} busts with {}", table.name(seat), shown);
                table.tell(seat, Message::text(format!("You busted\n{}", shown)));
                table.others(seat, Message::text(format!("{} busted\n{}", mention, shown)));
                self.dismiss();
            }
            false => self.cursor = (self.cursor + 1) % self.queue.len().max(1),
        }
        self.proceed(table)
    }

    fn stay(&mut self, table: &mut Table, seat: Seat) -> Outcome {
        let mention = table.mention(seat);
        table.tell(seat, Message::text("You stay"));
        table.others(seat, Message::text(format!("{} stays", mention)));
        self.dismiss();
        self.proceed(table)
    }

    /// Takes the seat under the cursor out of the deciding queue.
    fn dismiss(&mut self) {
        if self.cursor < self.queue.len() {
            self.queue.remove(self.cursor);
        }
        if self.cursor >= self.queue.len() {
            self.cursor = 0;
        }
    }

    fn proceed(&mut self, table: &mut Table) -> Outcome {
        match self.queue.is_empty() {
            true => {
                self.settle(table);
                Outcome::RoundOver
            }
            false => {
                self.decide(table);
                Outcome::Next
            }
        }
    }

    /// Dealer plays, the best hand scores, everyone sees the summary.
    fn settle(&mut self, table: &mut Table) {
        if self.gamblers.iter().any(|g| !g.hand.is_bust()) {
            while self.dealer.score() < DEALER_STANDS {
                let card = self.draw();
                self.dealer.push(card);
            }
        }
        let scores = self
            .gamblers
            .iter()
            .enumerate()
            .map(|(seat, g)| (Some(seat), g.hand.score()))
            .chain(std::iter::once((None, self.dealer.score())));
        let top = self
            .gamblers
            .iter()
            .map(|g| g.hand.score())
            .chain(std::iter::once(self.dealer.score()))
            .filter(|score| *score <= crate::BLACKJACK)
            .max();
        let description = match (top, best(scores)) {
            (None, _) => String::from("It seems that no one managed to get it under 22!"),
            (Some(_), None) => String::from("It seems that a tie occurred!"),
            (Some(_), Some(None)) => String::from("It seems that the dealer got the best out of this one!"),
            (Some(_), Some(Some(seat))) => {
                if let Some(gambler) = self.gamblers.get_mut(seat) {
                    gambler.points += 1;
                }
                format!("It seems that {} got the best out of this one!", table.mention(seat))
            }
        };
        log::info!("[blackjack] round {}: {}", self.round, description);
        let summary = self
            .gamblers
            .iter()
            .enumerate()
            .fold(Message::summary(format!("Round {}", self.round), description), |summary, (seat, g)| {
                summary.field(
                    format!(
                        "{}{} ({} points)",
                        table.name(seat),
                        if g.hand.is_bust() { " 🚫" } else { "" },
                        g.points
                    ),
                    format!("{} ({})", g.hand, g.hand.score()),
                )
            })
            .field(
                format!("Dealer{}", if self.dealer.is_bust() { " 🚫" } else { "" }),
                format!("{} ({})", self.dealer, self.dealer.score()),
            );
        table.announce(summary);
    }
}

impl Rules for Blackjack {
    type Action = Decision;

    fn name(&self) -> &'static str {
        "Blackjack"
    }
    fn playable(&self, seats: usize) -> bool {
        (1..=BLACKJACK_SEATS).contains(&seats)
    }
    fn parse(&self, text: &str) -> Option<Decision> {
        match text.trim().to_lowercase().as_str() {
            "hit" => Some(Decision::Hit),
            "stay" | "stand" => Some(Decision::Stay),
            _ => None,
        }
    }
    fn actor(&self, _: &Table) -> Option<Seat> {
        self.queue.get(self.cursor).copied()
    }

    fn start(&mut self, table: &mut Table) {
        self.gamblers = vec![Gambler::default(); table.len()];
        table.announce(Message::text(format!(
            "Blackjack starts! First to {} points wins",
            WIN_POINTS
        )));
    }

    fn begin_round(&mut self, table: &mut Table) {
        self.round += 1;
        self.deck = match self.preset.pop_front() {
            Some(deck) => deck,
            None => self.shuffled(),
        };
        for seat in 0..self.gamblers.len() {
            let hand = Hand::from(vec![self.draw(), self.draw()]);
            self.gamblers[seat].hand = hand;
        }
        self.dealer = Hand::from(vec![self.draw(), self.draw()]);
        self.queue = (0..self.gamblers.len()).collect();
        self.cursor = 0;
        log::debug!("[blackjack] round {} dealt", self.round);
        self.decide(table);
    }

    fn act(&mut self, table: &mut Table, seat: Seat, action: Decision) -> Result<Outcome, Illegal> {
        if self.actor(table) != Some(seat) {
            return Err(Illegal::NotYourTurn);
        }
        Ok(match action {
            Decision::Hit => self.hit(table, seat),
            Decision::Stay => self.stay(table, seat),
        })
    }

    fn force(&mut self, table: &mut Table) -> Outcome {
        match self.actor(table) {
            Some(seat) => self.stay(table, seat),
            None => self.proceed(table),
        }
    }

    fn stand(&mut self, seat: Seat) {
        if seat < self.gamblers.len() {
            self.gamblers.remove(seat);
        }
        if let Some(i) = self.queue.iter().position(|s| *s == seat) {
            self.queue.remove(i);
            if i < self.cursor {
                self.cursor -= 1;
            }
        }
        if self.cursor >= self.queue.len() {
            self.cursor = 0;
        }
        self.queue
            .iter_mut()
            .filter(|s| **s > seat)
            .for_each(|s| *s -= 1);
    }

    fn winner(&self, _: &Table) -> Option<Seat> {
        self.gamblers.iter().position(|g| g.points >= WIN_POINTS)
    }
}
