use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Default, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    #[default]
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

impl Rank {
    pub const fn all() -> [Self; 13] {
        [
            Rank::Two,
            Rank::Three,
            Rank::Four,
            Rank::Five,
            Rank::Six,
            Rank::Seven,
            Rank::Eight,
            Rank::Nine,
            Rank::Ten,
            Rank::Jack,
            Rank::Queen,
            Rank::King,
            Rank::Ace,
        ]
    }
    /// Face value in Blackjack terms. Aces count high here;
    /// downgrading them is the scorer's job.
    pub const fn pips(self) -> u32 {
        match self {
            Rank::Ace => 11,
            Rank::Jack | Rank::Queen | Rank::King => 10,
            _ => self as u32 + 2,
        }
    }
    pub const fn is_ace(self) -> bool {
        matches!(self, Rank::Ace)
    }
}

/// u8 isomorphism
impl TryFrom<u8> for Rank {
    type Error = anyhow::Error;
    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::all()
            .get(n as usize)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("invalid rank u8: {}", n))
    }
}
impl From<Rank> for u8 {
    fn from(r: Rank) -> u8 {
        r as u8
    }
}

/// str isomorphism
impl TryFrom<&str> for Rank {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "2" => Ok(Rank::Two),
            "3" => Ok(Rank::Three),
            "4" => Ok(Rank::Four),
            "5" => Ok(Rank::Five),
            "6" => Ok(Rank::Six),
            "7" => Ok(Rank::Seven),
            "8" => Ok(Rank::Eight),
            "9" => Ok(Rank::Nine),
            "T" | "10" => Ok(Rank::Ten),
            "J" => Ok(Rank::Jack),
            "Q" => Ok(Rank::Queen),
            "K" => Ok(Rank::King),
            "A" => Ok(Rank::Ace),
            _ => Err(anyhow::anyhow!("invalid rank str: {}", s)),
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Rank::Two => "2",
                Rank::Three => "3",
                Rank::Four => "4",
                Rank::Five => "5",
                Rank::Six => "6",
                Rank::Seven => "7",
                Rank::Eight => "8",
                Rank::Nine => "9",
                Rank::Ten => "10",
                Rank::Jack => "J",
                Rank::Queen => "Q",
                Rank::King => "K",
                Rank::Ace => "A",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_u8() {
        let rank = Rank::Five;
        assert!(rank == Rank::try_from(u8::from(rank)).unwrap());
    }

    #[test]
    fn faces_count_ten() {
        assert_eq!(Rank::Ten.pips(), 10);
        assert_eq!(Rank::Jack.pips(), 10);
        assert_eq!(Rank::Queen.pips(), 10);
        assert_eq!(Rank::King.pips(), 10);
        assert_eq!(Rank::Ace.pips(), 11);
        assert_eq!(Rank::Two.pips(), 2);
        assert_eq!(Rank::Nine.pips(), 9);
    }
}
