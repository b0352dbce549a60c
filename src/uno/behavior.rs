use super::attribute::*;
use super::card::*;
use super::color::*;
use crate::gameroom::Turns;

/// Shared state that card effects read and write.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    /// Color the next card has to match. Wild cards set it on placement.
    pub color: Color,
    /// Cards the next player must draw unless they stack another penalty.
    pub pending: u32,
}

/// What a card does. Cards share one of the statics below; a combined
/// behavior runs both constituents in order and takes compatibility and
/// rendering from the leading one.
#[derive(Debug, PartialEq, Eq)]
pub enum Behavior {
    Plain,
    ColorChange,
    Reverse,
    Block,
    Penalty,
    Combined(&'static Behavior, &'static Behavior),
}

pub static PLAIN: Behavior = Behavior::Plain;
pub static COLOR_CHANGE: Behavior = Behavior::ColorChange;
pub static REVERSE: Behavior = Behavior::Reverse;
pub static BLOCK: Behavior = Behavior::Block;
pub static PENALTY: Behavior = Behavior::Penalty;
pub static PENALTY_COLOR_CHANGE: Behavior = Behavior::Combined(&PENALTY, &COLOR_CHANGE);

impl Behavior {
    /// Whether `candidate` may be placed on `top`, which carries this behavior.
    pub fn accepts(&self, top: &UnoCard, candidate: &UnoCard, board: &Board) -> bool {
        match self {
            Behavior::Combined(lead, _) => lead.accepts(top, candidate, board),
            Behavior::Reverse | Behavior::Block => {
                candidate.behavior() == self || Self::matches(top, candidate, board)
            }
            Behavior::Penalty if board.pending > 0 => candidate.behavior().is_penalty(),
            _ => Self::matches(top, candidate, board),
        }
    }

    /// Default rule: active color, equal number between numbered cards, or
    /// a colorless candidate.
    fn matches(top: &UnoCard, candidate: &UnoCard, board: &Board) -> bool {
        candidate.color().is_wild()
            || candidate.color() == board.color
            || (top.is_numbered() && candidate.is_numbered() && top.number() == candidate.number())
    }

    pub fn place(&self, card: &UnoCard, attributes: &Attributes, board: &mut Board, turns: &mut Turns) {
        match self {
            Behavior::Plain => {}
            Behavior::ColorChange => board.color = attributes.color().unwrap_or(Color::FALLBACK),
            Behavior::Reverse => turns.reverse(),
            Behavior::Block => turns.cycle(),
            Behavior::Penalty => board.pending += card.number().map(u32::from).unwrap_or(0),
            Behavior::Combined(a, b) => {
                a.place(card, attributes, board, turns);
                b.place(card, attributes, board, turns);
            }
        }
    }

    /// Placement on timeout: whatever is still missing takes its fallback.
    pub fn force(&self, card: &UnoCard, attributes: &Attributes, board: &mut Board, turns: &mut Turns) {
        self.place(card, &attributes.or_fallback(), board, turns)
    }

    pub fn required(&self) -> Vec<Attribute> {
        match self {
            Behavior::ColorChange => vec![Attribute::Color],
            Behavior::Combined(a, b) => {
                let mut required = a.required();
                for x in b.required() {
                    if !required.contains(&x) {
                        required.push(x);
                    }
                }
                required
            }
            _ => Vec::new(),
        }
    }

    pub fn is_penalty(&self) -> bool {
        match self {
            Behavior::Penalty => true,
            Behavior::Combined(a, b) => a.is_penalty() || b.is_penalty(),
            _ => false,
        }
    }

    pub fn render(&self, card: &UnoCard) -> String {
        let glyph = card.color().glyph();
        let number = card.number().map(|n| n.to_string());
        match self {
            Behavior::Plain => format!("{} {}", number.unwrap_or_default(), glyph),
            Behavior::ColorChange => format!(
                "{} {}",
                number.unwrap_or_else(|| String::from("Color change")),
                glyph
            ),
            Behavior::Reverse => format!("Reverse {}", glyph),
            Behavior::Block => format!("Block {}", glyph),
            Behavior::Penalty => format!("+{} {}", number.unwrap_or_default(), glyph),
            Behavior::Combined(lead, _) => lead.render(card),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(color: Color, pending: u32) -> Board {
        Board { color, pending }
    }

    #[test]
    fn numbered_match_by_color_or_number_only() {
        for top in Color::all() {
            for n in 0..=9 {
                let top = UnoCard::plain(top, n);
                let board = board(top.color(), 0);
                for color in Color::all() {
                    for m in 0..=9 {
                        let candidate = UnoCard::plain(color, m);
                        let expected = color == top.color() || m == n;
                        assert_eq!(top.accepts(&candidate, &board), expected);
                    }
                }
            }
        }
    }

    #[test]
    fn colorless_always_fits_without_penalty() {
        let top = UnoCard::plain(Color::Green, 3);
        assert!(top.accepts(&UnoCard::wild(), &board(Color::Green, 0)));
        assert!(top.accepts(&UnoCard::wild_draw_four(), &board(Color::Green, 0)));
    }

    #[test]
    fn pending_penalty_only_takes_penalties() {
        let top = UnoCard::draw_two(Color::Red);
        let pending = board(Color::Red, 2);
        assert!(top.accepts(&UnoCard::draw_two(Color::Blue), &pending));
        assert!(top.accepts(&UnoCard::wild_draw_four(), &pending));
        assert!(!top.accepts(&UnoCard::plain(Color::Red, 2), &pending));
        assert!(!top.accepts(&UnoCard::wild(), &pending));
        assert!(!top.accepts(&UnoCard::block(Color::Red), &pending));
        let settled = board(Color::Red, 0);
        assert!(top.accepts(&UnoCard::plain(Color::Red, 2), &settled));
        assert!(!top.accepts(&UnoCard::plain(Color::Blue, 2), &settled));
    }

    #[test]
    fn combined_leads_with_penalty() {
        let top = UnoCard::wild_draw_four();
        assert!(!top.accepts(&UnoCard::plain(Color::Blue, 1), &board(Color::Blue, 4)));
        assert!(top.accepts(&UnoCard::plain(Color::Blue, 1), &board(Color::Blue, 0)));
        assert!(!top.accepts(&UnoCard::plain(Color::Red, 1), &board(Color::Blue, 0)));
        assert_eq!(top.to_string(), "+4 ⬛");
    }

    #[test]
    fn reverse_and_block_take_their_own_kind() {
        let on = board(Color::Red, 0);
        assert!(UnoCard::reverse(Color::Red).accepts(&UnoCard::reverse(Color::Blue), &on));
        assert!(UnoCard::block(Color::Red).accepts(&UnoCard::block(Color::Green), &on));
        assert!(!UnoCard::block(Color::Red).accepts(&UnoCard::reverse(Color::Green), &on));
    }

    #[test]
    fn placement_effects() {
        let mut turns = Turns::new(4);
        let mut board = board(Color::Red, 0);
        let none = Attributes::default();
        let card = UnoCard::reverse(Color::Red);
        card.behavior().place(&card, &none, &mut board, &mut turns);
        assert_eq!(turns.direction(), crate::gameroom::Direction::Backward);
        let card = UnoCard::block(Color::Red);
        card.behavior().place(&card, &none, &mut board, &mut turns);
        assert_eq!(turns.next(), 3);
        let card = UnoCard::draw_two(Color::Red);
        card.behavior().place(&card, &none, &mut board, &mut turns);
        card.behavior().place(&card, &none, &mut board, &mut turns);
        assert_eq!(board.pending, 4);
    }

    #[test]
    fn combined_runs_both_in_order() {
        let mut turns = Turns::new(2);
        let mut board = board(Color::Red, 2);
        let mut attributes = Attributes::default();
        attributes.fill(Attribute::Color, 2).unwrap();
        let card = UnoCard::wild_draw_four();
        assert_eq!(card.behavior().required(), vec![Attribute::Color]);
        card.behavior().place(&card, &attributes, &mut board, &mut turns);
        assert_eq!(board, Board { color: Color::Green, pending: 6 });
    }

    #[test]
    fn forced_color_falls_back_to_yellow() {
        let mut turns = Turns::new(2);
        let mut board = board(Color::Red, 0);
        let card = UnoCard::wild_draw_four();
        card.behavior().force(&card, &Attributes::default(), &mut board, &mut turns);
        assert_eq!(board, Board { color: Color::Yellow, pending: 4 });
    }
}
