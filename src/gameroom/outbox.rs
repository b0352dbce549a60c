use super::message::*;
use super::multicast::*;
use super::player::*;
use crate::PlayerId;
use std::collections::VecDeque;
use std::sync::Arc;

/// Where a queued message goes.
#[derive(Clone)]
pub enum Target {
    Players(Multicast),
    Channel(Arc<dyn Recipient>),
}

/// One queued message, its recipients and how often it already failed.
#[derive(Clone)]
pub struct Delivery {
    target: Target,
    message: Message,
    failures: u32,
}

impl Delivery {
    pub fn message(&self) -> &Message {
        &self.message
    }
    /// Player recipients; empty for channel deliveries.
    pub fn recipients(&self) -> Vec<PlayerId> {
        match &self.target {
            Target::Players(players) => players.ids(),
            Target::Channel(_) => Vec::new(),
        }
    }
    async fn multicast(&self, players: &Multicast) -> Result<(), Undelivered> {
        match &self.message {
            Message::Text(text) => players.text(text.as_str()).await,
            Message::Prompt { title, options } => players.prompt(title.as_str(), options.clone()).await,
            Message::Summary { .. } => players.summary(&self.message).await,
        }
    }
    fn to(&self, target: Target) -> Self {
        Self {
            target,
            message: self.message.clone(),
            failures: self.failures,
        }
    }
}

/// Messages produced by a state transition, held until the transition is
/// complete and then delivered in order.
///
/// Rule engines only ever write here, so game state is fully advanced
/// before anything reaches the network. A recipient that fails keeps only
/// its own copy queued; everyone after it is still served in the same
/// flush. A copy is dropped after `DELIVERY_ATTEMPTS` failed flushes.
#[derive(Default)]
pub struct Outbox {
    queue: VecDeque<Delivery>,
}

impl Outbox {
    pub fn post(&mut self, target: Target, message: Message) {
        self.queue.push_back(Delivery {
            target,
            message,
            failures: 0,
        });
    }
    /// Sends everything queued. Returns the first failure, if any.
    pub async fn flush(&mut self) -> anyhow::Result<()> {
        let mut retry = VecDeque::new();
        let mut first = None::<anyhow::Error>;
        while let Some(delivery) = self.queue.pop_front() {
            let failed = match &delivery.target {
                Target::Channel(channel) => match channel.send(&delivery.message).await {
                    Ok(()) => None,
                    Err(error) => Some((delivery.clone(), error)),
                },
                Target::Players(players) => match delivery.multicast(players).await {
                    Ok(()) => None,
                    Err(undelivered) => match players.split(undelivered.player) {
                        Some((missed, rest)) => {
                            if !rest.is_empty() {
                                self.queue.push_front(delivery.to(Target::Players(rest)));
                            }
                            Some((delivery.to(Target::Players(missed)), anyhow::Error::new(undelivered)))
                        }
                        None => Some((delivery.clone(), anyhow::Error::new(undelivered))),
                    },
                },
            };
            if let Some((mut missed, error)) = failed {
                missed.failures += 1;
                match missed.failures < crate::DELIVERY_ATTEMPTS {
                    true => retry.push_back(missed),
                    false => log::warn!("dropping {:?} after {} failures: {:#}", missed.message, missed.failures, error),
                }
                first.get_or_insert(error);
            }
        }
        self.queue = retry;
        match first {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
    pub fn iter(&self) -> impl Iterator<Item = &Delivery> {
        self.queue.iter()
    }
    /// Messages queued for one player, in order.
    pub fn to(&self, id: PlayerId) -> Vec<&Message> {
        self.queue
            .iter()
            .filter(|d| d.recipients().contains(&id))
            .map(Delivery::message)
            .collect()
    }
    pub fn clear(&mut self) {
        self.queue.clear();
    }
    pub fn len(&self) -> usize {
        self.queue.len()
    }
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl std::fmt::Debug for Outbox {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_list()
            .entries(self.queue.iter().map(|d| d.message()))
            .finish()
    }
}
