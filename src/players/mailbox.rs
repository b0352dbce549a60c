use crate::PlayerId;
use crate::gameroom::*;
use std::sync::Arc;
use std::sync::Mutex;

/// Player that keeps everything it is sent. Stands in for a real client
/// in tests and simulations.
#[derive(Debug)]
pub struct Mailbox {
    id: PlayerId,
    name: String,
    inbox: Mutex<Vec<Message>>,
}

impl Mailbox {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id,
            name: name.into(),
            inbox: Mutex::new(Vec::new()),
        })
    }
    pub fn messages(&self) -> Vec<Message> {
        self.inbox
            .lock()
            .map(|inbox| inbox.clone())
            .unwrap_or_default()
    }
    /// Every message rendered as plain text.
    pub fn texts(&self) -> Vec<String> {
        self.messages().iter().map(Message::to_string).collect()
    }
    pub fn last(&self) -> Option<Message> {
        self.messages().pop()
    }
    pub fn clear(&self) {
        if let Ok(mut inbox) = self.inbox.lock() {
            inbox.clear();
        }
    }
}

#[async_trait::async_trait]
impl Recipient for Mailbox {
    async fn send(&self, message: &Message) -> anyhow::Result<()> {
        self.inbox
            .lock()
            .map_err(|_| anyhow::anyhow!("mailbox of {} is poisoned", self.name))?
            .push(message.clone());
        Ok(())
    }
}

impl Player for Mailbox {
    fn id(&self) -> PlayerId {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}
