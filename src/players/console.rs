use crate::PlayerId;
use crate::gameroom::*;
use colored::Colorize;
use tokio::io::AsyncWriteExt;

/// Hot-seat player whose messages are printed to the terminal, prefixed
/// with the player's name. With `json` every message becomes one line of
/// JSON instead.
#[derive(Debug)]
pub struct Console {
    id: PlayerId,
    name: String,
    json: bool,
}

impl Console {
    pub fn new(id: PlayerId, name: impl Into<String>, json: bool) -> Self {
        Self {
            id,
            name: name.into(),
            json,
        }
    }

    fn render(&self, message: &Message) -> anyhow::Result<String> {
        if self.json {
            let line = serde_json::json!({ "to": self.name, "message": message });
            return Ok(serde_json::to_string(&line)?);
        }
        let header = format!("[{}]", self.name).bold().cyan();
        let body = match message {
            Message::Text(text) => text.normal(),
            Message::Prompt { .. } => message.to_string().yellow(),
            Message::Summary { .. } => message.to_string().green(),
        };
        Ok(body
            .to_string()
            .lines()
            .map(|line| format!("{} {}", header, line))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

#[async_trait::async_trait]
impl Recipient for Console {
    async fn send(&self, message: &Message) -> anyhow::Result<()> {
        let line = format!("{}\n", self.render(message)?);
        let mut stdout = tokio::io::stdout();
        stdout.write_all(line.as_bytes()).await?;
        stdout.flush().await?;
        Ok(())
    }
}

impl Player for Console {
    fn id(&self) -> PlayerId {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn mention(&self) -> String {
        format!("@{}", self.name)
    }
}
