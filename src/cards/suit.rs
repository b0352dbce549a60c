use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    #[default]
    Club = 0,
    Diamond = 1,
    Heart = 2,
    Spade = 3,
}

impl Suit {
    pub const fn all() -> [Self; 4] {
        [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade]
    }
}

impl TryFrom<char> for Suit {
    type Error = anyhow::Error;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'c' | '♣' => Ok(Suit::Club),
            'd' | '♦' => Ok(Suit::Diamond),
            'h' | '♥' => Ok(Suit::Heart),
            's' | '♠' => Ok(Suit::Spade),
            _ => Err(anyhow::anyhow!("invalid suit: {}", c)),
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Suit::Club => "♣",
                Suit::Diamond => "♦",
                Suit::Heart => "♥",
                Suit::Spade => "♠",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_letters_and_glyphs() {
        assert_eq!(Suit::try_from('s').unwrap(), Suit::Spade);
        assert_eq!(Suit::try_from('♥').unwrap(), Suit::Heart);
        assert!(Suit::try_from('x').is_err());
    }
}
