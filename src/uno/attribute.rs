use super::color::*;
use crate::gameroom::Illegal;
use crate::gameroom::Message;

/// Extra information a card needs from its player before it can be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Color,
}

impl Attribute {
    pub fn title(&self) -> &'static str {
        match self {
            Attribute::Color => "Pick a color",
        }
    }
    pub fn options(&self) -> Vec<String> {
        match self {
            Attribute::Color => Color::all()
                .iter()
                .map(|c| format!("{} {}", c.glyph(), c.name()))
                .collect(),
        }
    }
    pub fn prompt(&self) -> Message {
        Message::prompt(self.title(), self.options())
    }
}

/// Attribute values supplied so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Attributes {
    color: Option<Color>,
}

impl Attributes {
    pub fn color(&self) -> Option<Color> {
        self.color
    }
    pub fn has(&self, attribute: Attribute) -> bool {
        match attribute {
            Attribute::Color => self.color.is_some(),
        }
    }
    /// First of `required` not supplied yet.
    pub fn missing(&self, required: &[Attribute]) -> Option<Attribute> {
        required.iter().copied().find(|a| !self.has(*a))
    }
    /// Sets an attribute from the zero-based index of a prompt option.
    pub fn fill(&mut self, attribute: Attribute, option: usize) -> Result<(), Illegal> {
        match attribute {
            Attribute::Color => {
                let color = Color::all()
                    .get(option)
                    .copied()
                    .ok_or(Illegal::NoSuchOption(option))?;
                self.color = Some(color);
                Ok(())
            }
        }
    }
    /// Same values, with fallbacks for anything left open.
    pub fn or_fallback(self) -> Self {
        Self {
            color: self.color.or(Some(Color::FALLBACK)),
        }
    }
}
