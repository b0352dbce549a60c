use crate::BLACKJACK;
use crate::cards::Card;

/// Cards held by a gambler or the dealer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Hand(Vec<Card>);

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}

impl Hand {
    pub fn push(&mut self, card: Card) {
        self.0.push(card);
    }
    pub fn cards(&self) -> &[Card] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Only the first card, as the dealer shows it.
    pub fn visible(&self) -> Hand {
        Hand(self.0.iter().take(1).copied().collect())
    }
    /// Faces count 10 and aces 11. Aces drop to 1 one at a time while the
    /// total is over 21.
    pub fn score(&self) -> u32 {
        let aces = self.0.iter().filter(|c| c.rank().is_ace()).count();
        let total = self.0.iter().map(|c| c.rank().pips()).sum::<u32>();
        (0..aces).fold(total, |total, _| match total > BLACKJACK {
            true => total - 10,
            false => total,
        })
    }
    pub fn is_bust(&self) -> bool {
        self.score() > BLACKJACK
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let cards = self.0.iter().map(Card::to_string).collect::<Vec<_>>();
        write!(f, "{}", cards.join("  "))
    }
}

/// Owner of the unique highest score that does not bust.
/// A tie at the top, or nobody under the limit, gives nothing.
pub fn best<K: Copy>(entries: impl IntoIterator<Item = (K, u32)>) -> Option<K> {
    entries
        .into_iter()
        .filter(|(_, score)| *score <= BLACKJACK)
        .fold(None::<(Option<K>, u32)>, |top, (owner, score)| match top {
            Some((_, high)) if score < high => top,
            Some((_, high)) if score == high => Some((None, high)),
            _ => Some((Some(owner), score)),
        })
        .and_then(|(owner, _)| owner)
}
