use serde::Deserialize;
use serde::Serialize;

/// A named block inside a summary, e.g. one hand at showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: String,
}

/// Renderable content sent from a Room to its players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// Plain line of text.
    Text(String),
    /// Discrete choice; players answer with the index of an option.
    Prompt { title: String, options: Vec<String> },
    /// Titled block with fields, e.g. a round summary.
    Summary {
        title: String,
        description: String,
        fields: Vec<Field>,
    },
}

impl Message {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
    pub fn prompt(title: impl Into<String>, options: Vec<String>) -> Self {
        Self::Prompt {
            title: title.into(),
            options,
        }
    }
    pub fn summary(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::Summary {
            title: title.into(),
            description: description.into(),
            fields: Vec::new(),
        }
    }
    /// Appends a field. No-op on anything but a summary.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Summary { ref mut fields, .. } = self {
            fields.push(Field {
                name: name.into(),
                value: value.into(),
            });
        }
        self
    }
    pub fn is_prompt(&self) -> bool {
        matches!(self, Self::Prompt { .. })
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Message::Text(text) => write!(f, "{}", text),
            Message::Prompt { title, options } => {
                write!(f, "{}", title)?;
                options
                    .iter()
                    .enumerate()
                    .try_for_each(|(i, option)| write!(f, "\n  #{} {}", i + 1, option))
            }
            Message::Summary {
                title,
                description,
                fields,
            } => {
                write!(f, "== {} ==\n{}", title, description)?;
                fields
                    .iter()
                    .try_for_each(|field| write!(f, "\n{}:\n  {}", field.name, field.value.replace('\n', "\n  ")))
            }
        }
    }
}
