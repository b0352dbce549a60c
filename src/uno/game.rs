use super::attribute::*;
use super::behavior::*;
use super::card::*;
use crate::ATTRIBUTE_BONUS;
use crate::Seat;
use crate::UNO_HAND;
use crate::UNO_MIN_PLAYERS;
use crate::cards::Deck;
use crate::gameroom::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// A parsed Uno command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Position in hand as shown to the player, starting at 1.
    Play(usize),
    Draw,
}

/// Card chosen by the current player that is waiting on attributes.
#[derive(Debug, Clone, Copy)]
struct Filling {
    index: usize,
    attributes: Attributes,
}

/// Uno rule engine. Every round is a single turn.
pub struct Uno {
    rng: SmallRng,
    deck: Deck<UnoCard>,
    preset: bool,
    hands: Vec<Vec<UnoCard>>,
    board: Board,
    filling: Option<Filling>,
}

impl Default for Uno {
    fn default() -> Self {
        Self::new(SmallRng::from_os_rng())
    }
}

impl Uno {
    pub fn new(rng: SmallRng) -> Self {
        Self {
            rng,
            deck: Deck::uno(),
            preset: false,
            hands: Vec::new(),
            board: Board::default(),
            filling: None,
        }
    }
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
    /// Deals from `deck` exactly as ordered instead of a shuffled one.
    pub fn with_deck(mut self, deck: Deck<UnoCard>) -> Self {
        self.deck = deck;
        self.preset = true;
        self
    }
    pub fn hand(&self, seat: Seat) -> &[UnoCard] {
        self.hands.get(seat).map(Vec::as_slice).unwrap_or_default()
    }
    pub fn top(&self) -> Option<&UnoCard> {
        self.deck.top()
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn deck(&self) -> &Deck<UnoCard> {
        &self.deck
    }
    pub fn is_filling(&self) -> bool {
        self.filling.is_some()
    }
}

impl Uno {
    /// Turns cards until a plain numbered one opens the discard pile.
    fn flip(&mut self) {
        for _ in 0..self.deck.remaining() {
            match self.deck.draw() {
                Some(card) if card.is_numbered() => {
                    self.board.color = card.color();
                    self.deck.discard(card);
                    return;
                }
                Some(card) => self.deck.bury(card),
                None => return,
            }
        }
    }

    fn draw(&mut self) -> Option<UnoCard> {
        if self.deck.remaining() == 0 {
            self.deck.recycle(&mut self.rng);
        }
        self.deck.draw()
    }

    /// Draws one card, or the whole pending penalty.
    fn take(&mut self, table: &mut Table, seat: Seat) -> Outcome {
        let n = self.board.pending.max(1) as usize;
        self.board.pending = 0;
        let drawn = (0..n).map_while(|_| self.draw()).collect::<Vec<_>>();
        let cards = match drawn.len() {
            1 => String::from("1 card"),
            n => format!("{} cards", n),
        };
        log::debug!("[uno] {} draws {}", table.name(seat), cards);
        table.record(format!("draw {}", cards), format!("draws {}", cards));
        if !drawn.is_empty() {
            let shown = drawn.iter().map(UnoCard::to_string).collect::<Vec<_>>();
            table.tell(seat, Message::text(format!("You got {}", crate::human_join(&shown))));
        }
        if let Some(hand) = self.hands.get_mut(seat) {
            hand.extend(drawn);
        }
        Outcome::RoundOver
    }

    fn play(&mut self, table: &mut Table, seat: Seat, index: usize, attributes: Attributes, forced: bool) -> Outcome {
        let Some(hand) = self.hands.get_mut(seat).filter(|hand| index < hand.len()) else {
            return Outcome::RoundOver;
        };
        let card = hand.remove(index);
        let left = hand.len();
        if !card.color().is_wild() {
            self.board.color = card.color();
        }
        match forced {
            true => card.behavior().force(&card, &attributes, &mut self.board, table.turns_mut()),
            false => card.behavior().place(&card, &attributes, &mut self.board, table.turns_mut()),
        }
        log::debug!("[uno] {} plays {}", table.name(seat), card);
        table.record(format!("play {}", card), format!("plays {}", card));
        if card.color().is_wild() {
            let color = self.board.color;
            table.record(
                format!("pick {} {}", color.glyph(), color.name()),
                format!("picks {} {}", color.glyph(), color.name()),
            );
        }
        if left == 1 {
            table.record("call Uno!", "calls Uno!");
        }
        self.deck.discard(card);
        Outcome::RoundOver
    }

    fn status(&self) -> String {
        let mut status = match self.deck.top() {
            Some(top) if top.color().is_wild() => format!("Top card: {}, color {}", top, self.board.color),
            Some(top) => format!("Top card: {}", top),
            None => String::from("The discard pile is empty"),
        };
        if self.board.pending > 0 {
            status.push_str(&format!(
                "\nDraw {} cards or stack a penalty card",
                self.board.pending
            ));
        }
        status
    }
}

impl Rules for Uno {
    type Action = Move;

    fn name(&self) -> &'static str {
        "Uno"
    }
    fn playable(&self, seats: usize) -> bool {
        seats >= UNO_MIN_PLAYERS
    }
    fn intermission(&self) -> u32 {
        0
    }
    fn parse(&self, text: &str) -> Option<Move> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("draw") {
            return Some(Move::Draw);
        }
        text.parse::<usize>().ok().map(Move::Play)
    }
    fn actor(&self, table: &Table) -> Option<Seat> {
        (!table.is_empty()).then(|| table.turns().current())
    }

    fn start(&mut self, table: &mut Table) {
        if !self.preset {
            self.deck.shuffle(&mut self.rng);
        }
        self.hands = (0..table.len()).map(|_| self.deck.deal(UNO_HAND)).collect();
        self.flip();
        let opening = self
            .deck
            .top()
            .map(|top| format!("Uno starts! The first card is {}", top))
            .unwrap_or_else(|| String::from("Uno starts!"));
        table.announce(Message::text(opening));
    }

    fn begin_round(&mut self, table: &mut Table) {
        let seat = table.turns().current();
        let hand = self
            .hand(seat)
            .iter()
            .enumerate()
            .map(|(i, card)| format!("#{} {}", i + 1, card))
            .collect::<Vec<_>>()
            .join("\n");
        let turn = Message::summary("Your turn", self.status())
            .field("Your hand", hand)
            .field("Commands", "<n> plays card #n, draw takes from the pile");
        let mention = table.mention(seat);
        table.tell(seat, turn);
        table.others(seat, Message::text(format!("It's {}'s turn", mention)));
    }

    fn act(&mut self, table: &mut Table, seat: Seat, action: Move) -> Result<Outcome, Illegal> {
        if self.filling.is_some() {
            return Err(Illegal::AwaitingChoice);
        }
        match action {
            Move::Draw => Ok(self.take(table, seat)),
            Move::Play(n) => {
                let index = n
                    .checked_sub(1)
                    .filter(|i| *i < self.hand(seat).len())
                    .ok_or(Illegal::NoSuchCard(n))?;
                let card = &self.hand(seat)[index];
                if let Some(top) = self.deck.top().filter(|top| !top.accepts(card, &self.board)) {
                    return Err(Illegal::Incompatible {
                        card: card.to_string(),
                        top: top.to_string(),
                    });
                }
                match card.required().first().copied() {
                    Some(attribute) => {
                        self.filling = Some(Filling {
                            index,
                            attributes: Attributes::default(),
                        });
                        table.tell(seat, attribute.prompt());
                        Ok(Outcome::Waiting)
                    }
                    None => Ok(self.play(table, seat, index, Attributes::default(), false)),
                }
            }
        }
    }

    fn choose(&mut self, table: &mut Table, seat: Seat, option: usize) -> Result<Outcome, Illegal> {
        let Some(filling) = self.filling.as_mut() else {
            return Err(Illegal::NothingToChoose);
        };
        let required = self
            .hands
            .get(seat)
            .and_then(|hand| hand.get(filling.index))
            .map(UnoCard::required)
            .unwrap_or_default();
        let Some(attribute) = filling.attributes.missing(&required) else {
            return Err(Illegal::NothingToChoose);
        };
        filling.attributes.fill(attribute, option)?;
        table.turns_mut().extend(ATTRIBUTE_BONUS);
        match filling.attributes.missing(&required) {
            Some(next) => {
                table.tell(seat, next.prompt());
                Ok(Outcome::Waiting)
            }
            None => {
                let Filling { index, attributes } = *filling;
                self.filling = None;
                Ok(self.play(table, seat, index, attributes, false))
            }
        }
    }

    fn force(&mut self, table: &mut Table) -> Outcome {
        let seat = table.turns().current();
        match self.filling.take() {
            Some(Filling { index, attributes }) => self.play(table, seat, index, attributes, true),
            None => self.take(table, seat),
        }
    }

    fn stand(&mut self, seat: Seat) {
        if seat < self.hands.len() {
            for card in self.hands.remove(seat) {
                self.deck.bury(card);
            }
        }
    }

    fn winner(&self, _: &Table) -> Option<Seat> {
        self.hands.iter().position(Vec::is_empty)
    }
}
