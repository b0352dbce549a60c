use super::rank::Rank;
use super::suit::Suit;
use serde::Deserialize;
use serde::Serialize;

/// A French playing card.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
}

/// (Rank, Suit) isomorphism
impl From<(Rank, Suit)> for Card {
    fn from((rank, suit): (Rank, Suit)) -> Self {
        Self { rank, suit }
    }
}
impl From<Card> for (Rank, Suit) {
    fn from(card: Card) -> Self {
        (card.rank, card.suit)
    }
}

/// str isomorphism, rank then suit: "As", "10♥", "Td"
impl TryFrom<&str> for Card {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let suit = s
            .chars()
            .last()
            .ok_or_else(|| anyhow::anyhow!("empty card str"))?;
        let rank = &s[..s.len() - suit.len_utf8()];
        Ok(Self {
            rank: Rank::try_from(rank)?,
            suit: Suit::try_from(suit)?,
        })
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_notations() {
        let card = Card::try_from("As").unwrap();
        assert_eq!(card.rank(), Rank::Ace);
        assert_eq!(card.suit(), Suit::Spade);
        assert_eq!(Card::try_from("10♥").unwrap(), Card::new(Rank::Ten, Suit::Heart));
        assert_eq!(Card::try_from("Td").unwrap(), Card::new(Rank::Ten, Suit::Diamond));
    }

    #[test]
    fn rejects_garbage() {
        assert!(Card::try_from("").is_err());
        assert!(Card::try_from("1s").is_err());
        assert!(Card::try_from("Ax").is_err());
    }

    #[test]
    fn renders_rank_and_glyph() {
        assert_eq!(Card::new(Rank::Queen, Suit::Club).to_string(), "Q♣");
    }
}
