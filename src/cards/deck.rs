use super::card::Card;
use super::rank::Rank;
use super::suit::Suit;
use rand::Rng;
use rand::seq::SliceRandom;

/// Two mutually exclusive piles: cards are drawn from one and discarded onto
/// the other. Cards only ever move between piles, hands and back, so the
/// number of cards in play stays constant.
///
/// The top of either pile is the end of its vector.
#[derive(Debug, Clone)]
pub struct Deck<C> {
    draw: Vec<C>,
    discard: Vec<C>,
}

impl<C> Default for Deck<C> {
    fn default() -> Self {
        Self {
            draw: Vec::new(),
            discard: Vec::new(),
        }
    }
}

/// Vec isomorphism, last card on top
impl<C> From<Vec<C>> for Deck<C> {
    fn from(draw: Vec<C>) -> Self {
        Self {
            draw,
            discard: Vec::new(),
        }
    }
}

impl<C> Deck<C> {
    /// Deck that deals the given cards in iteration order.
    pub fn ordered<I>(cards: I) -> Self
    where
        I: IntoIterator<Item = C>,
        I::IntoIter: DoubleEndedIterator,
    {
        Self::from(cards.into_iter().rev().collect::<Vec<_>>())
    }
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.draw.shuffle(rng);
    }
    pub fn draw(&mut self) -> Option<C> {
        self.draw.pop()
    }
    /// Draws up to n cards. Fewer come back if the draw pile runs dry.
    pub fn deal(&mut self, n: usize) -> Vec<C> {
        (0..n).map_while(|_| self.draw()).collect()
    }
    pub fn discard(&mut self, card: C) {
        self.discard.push(card);
    }
    /// Slides a card under the draw pile.
    pub fn bury(&mut self, card: C) {
        self.draw.insert(0, card);
    }
    /// Top of the discard pile.
    pub fn top(&self) -> Option<&C> {
        self.discard.last()
    }
    /// Shuffles every discarded card except the top one back into the draw pile.
    pub fn recycle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let top = self.discard.pop();
        self.draw.append(&mut self.discard);
        self.draw.shuffle(rng);
        self.discard.extend(top);
    }
    pub fn remaining(&self) -> usize {
        self.draw.len()
    }
    pub fn discarded(&self) -> usize {
        self.discard.len()
    }
    /// Cards held by both piles together.
    pub fn len(&self) -> usize {
        self.draw.len() + self.discard.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Deck<Card> {
    /// Unshuffled 52-card deck.
    pub fn standard() -> Self {
        Self::from(
            Suit::all()
                .into_iter()
                .flat_map(|suit| Rank::all().into_iter().map(move |rank| Card::new(rank, suit)))
                .collect::<Vec<_>>(),
        )
    }
}
