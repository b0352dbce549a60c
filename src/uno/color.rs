use serde::Deserialize;
use serde::Serialize;

/// Card color. Wild cards are colorless until played.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
    #[default]
    Wild,
}

impl Color {
    /// Picked for a wild card whose player ran out of time.
    pub const FALLBACK: Self = Color::Yellow;

    pub const fn all() -> [Self; 4] {
        [Color::Red, Color::Yellow, Color::Green, Color::Blue]
    }
    pub const fn is_wild(&self) -> bool {
        matches!(self, Color::Wild)
    }
    pub const fn glyph(&self) -> &'static str {
        match self {
            Color::Red => "🟥",
            Color::Yellow => "🟨",
            Color::Green => "🟩",
            Color::Blue => "🟦",
            Color::Wild => "⬛",
        }
    }
    pub const fn name(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Wild => "wild",
        }
    }
}

/// Accepts names ("red", "R") and glyphs.
impl TryFrom<&str> for Color {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let s = s.trim();
        Color::all()
            .into_iter()
            .chain(std::iter::once(Color::Wild))
            .find(|c| {
                s == c.glyph()
                    || s.eq_ignore_ascii_case(c.name())
                    || s.eq_ignore_ascii_case(&c.name()[..1])
            })
            .ok_or_else(|| anyhow::anyhow!("invalid color: {}", s))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_glyphs() {
        assert_eq!(Color::try_from("Blue").unwrap(), Color::Blue);
        assert_eq!(Color::try_from("g").unwrap(), Color::Green);
        assert_eq!(Color::try_from("🟥").unwrap(), Color::Red);
        assert!(Color::try_from("purple").is_err());
    }

    #[test]
    fn four_playable_colors() {
        assert!(Color::all().iter().all(|c| !c.is_wild()));
        assert_eq!(Color::default(), Color::Wild);
    }
}
