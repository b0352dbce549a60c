use super::attribute::*;
use super::behavior::*;
use super::color::*;

/// One physical Uno card. Color and number never change; a played wild card
/// leaves its chosen color on the board instead.
///
/// Not `Clone`: a card is always in exactly one pile or hand.
#[derive(Debug, PartialEq, Eq)]
pub struct UnoCard {
    color: Color,
    number: Option<u8>,
    behavior: &'static Behavior,
}

impl UnoCard {
    pub fn plain(color: Color, number: u8) -> Self {
        Self {
            color,
            number: Some(number),
            behavior: &PLAIN,
        }
    }
    pub fn block(color: Color) -> Self {
        Self {
            color,
            number: None,
            behavior: &BLOCK,
        }
    }
    pub fn reverse(color: Color) -> Self {
        Self {
            color,
            number: None,
            behavior: &REVERSE,
        }
    }
    pub fn draw_two(color: Color) -> Self {
        Self {
            color,
            number: Some(2),
            behavior: &PENALTY,
        }
    }
    pub fn wild() -> Self {
        Self {
            color: Color::Wild,
            number: None,
            behavior: &COLOR_CHANGE,
        }
    }
    pub fn wild_draw_four() -> Self {
        Self {
            color: Color::Wild,
            number: Some(4),
            behavior: &PENALTY_COLOR_CHANGE,
        }
    }
}

impl UnoCard {
    pub fn color(&self) -> Color {
        self.color
    }
    pub fn number(&self) -> Option<u8> {
        self.number
    }
    pub fn behavior(&self) -> &'static Behavior {
        self.behavior
    }
    /// Plain card with a face value, the only kind matched by number.
    pub fn is_numbered(&self) -> bool {
        matches!(self.behavior, Behavior::Plain) && self.number.is_some()
    }
    /// Whether `candidate` may be placed on this card.
    pub fn accepts(&self, candidate: &UnoCard, board: &Board) -> bool {
        self.behavior.accepts(self, candidate, board)
    }
    pub fn required(&self) -> Vec<Attribute> {
        self.behavior.required()
    }
}

impl std::fmt::Display for UnoCard {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.behavior.render(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_face_and_glyph() {
        assert_eq!(UnoCard::plain(Color::Red, 5).to_string(), "5 🟥");
        assert_eq!(UnoCard::draw_two(Color::Blue).to_string(), "+2 🟦");
        assert_eq!(UnoCard::block(Color::Green).to_string(), "Block 🟩");
        assert_eq!(UnoCard::reverse(Color::Yellow).to_string(), "Reverse 🟨");
        assert_eq!(UnoCard::wild().to_string(), "Color change ⬛");
    }

    #[test]
    fn only_plain_cards_are_numbered() {
        assert!(UnoCard::plain(Color::Red, 0).is_numbered());
        assert!(!UnoCard::draw_two(Color::Red).is_numbered());
        assert!(!UnoCard::wild_draw_four().is_numbered());
    }
}
