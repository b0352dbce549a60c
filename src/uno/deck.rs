use super::card::*;
use super::color::*;
use crate::cards::Deck;

impl Deck<UnoCard> {
    /// Unshuffled 108-card Uno deck. Per color: one 0, two of each 1 to 9,
    /// two each of block, reverse and +2, plus one color change and one +4.
    pub fn uno() -> Self {
        Self::from(
            Color::all()
                .into_iter()
                .flat_map(|color| {
                    std::iter::once(UnoCard::plain(color, 0))
                        .chain((1..=9).flat_map(move |n| [UnoCard::plain(color, n), UnoCard::plain(color, n)]))
                        .chain([
                            UnoCard::block(color),
                            UnoCard::block(color),
                            UnoCard::reverse(color),
                            UnoCard::reverse(color),
                            UnoCard::draw_two(color),
                            UnoCard::draw_two(color),
                            UnoCard::wild(),
                            UnoCard::wild_draw_four(),
                        ])
                })
                .collect::<Vec<_>>(),
        )
    }
}
