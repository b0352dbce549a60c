use super::message::*;
use super::player::*;
use crate::PlayerId;
use futures::TryStreamExt;
use std::sync::Arc;

/// Fans one send out to an ordered set of players.
///
/// Sends are awaited strictly in list order, one after the other. The first
/// failure aborts the remaining sends of that call and names the player it
/// stopped at. `excluding` and `including` build new sets and leave `self`
/// untouched.
#[derive(Clone, Default)]
pub struct Multicast {
    targets: Vec<Arc<dyn Player>>,
}

impl From<Vec<Arc<dyn Player>>> for Multicast {
    fn from(targets: Vec<Arc<dyn Player>>) -> Self {
        Self { targets }
    }
}

impl Multicast {
    pub fn excluding(&self, id: PlayerId) -> Self {
        Self {
            targets: self
                .targets
                .iter()
                .filter(|p| p.id() != id)
                .cloned()
                .collect(),
        }
    }
    pub fn including(&self, player: Arc<dyn Player>) -> Self {
        Self {
            targets: self
                .targets
                .iter()
                .cloned()
                .chain(std::iter::once(player))
                .collect(),
        }
    }
    /// Splits around `id`: the set holding only that player, and everyone
    /// listed after it.
    pub fn split(&self, id: PlayerId) -> Option<(Self, Self)> {
        let at = self.targets.iter().position(|p| p.id() == id)?;
        Some((
            Self::from(vec![self.targets[at].clone()]),
            Self::from(self.targets[at + 1..].to_vec()),
        ))
    }
    pub fn ids(&self) -> Vec<PlayerId> {
        self.targets.iter().map(|p| p.id()).collect()
    }
    pub fn contains(&self, id: PlayerId) -> bool {
        self.targets.iter().any(|p| p.id() == id)
    }
    pub fn len(&self) -> usize {
        self.targets.len()
    }
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// A multicast that stopped at `player`.
#[derive(Debug)]
pub struct Undelivered {
    pub player: PlayerId,
    pub error: anyhow::Error,
}

impl std::fmt::Display for Undelivered {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "could not reach P{}: {:#}", self.player, self.error)
    }
}

impl std::error::Error for Undelivered {}

impl Multicast {
    pub async fn send(&self, message: &Message) -> Result<(), Undelivered> {
        futures::stream::iter(self.targets.iter().map(Ok::<_, Undelivered>))
            .try_for_each(|player| async move {
                player.send(message).await.map_err(|error| Undelivered {
                    player: player.id(),
                    error,
                })
            })
            .await
    }
    pub async fn text(&self, text: impl Into<String>) -> Result<(), Undelivered> {
        self.send(&Message::text(text)).await
    }
    pub async fn prompt(&self, title: impl Into<String>, options: Vec<String>) -> Result<(), Undelivered> {
        self.send(&Message::prompt(title, options)).await
    }
    pub async fn summary(&self, summary: &Message) -> Result<(), Undelivered> {
        debug_assert!(matches!(summary, Message::Summary { .. }));
        self.send(summary).await
    }
}

impl std::fmt::Debug for Multicast {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_list()
            .entries(self.targets.iter().map(|p| p.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records into a log shared by every member so ordering is observable.
    struct Member {
        id: PlayerId,
        fails: bool,
        log: Arc<Mutex<Vec<PlayerId>>>,
    }

    #[async_trait::async_trait]
    impl Recipient for Member {
        async fn send(&self, _: &Message) -> anyhow::Result<()> {
            tokio::task::yield_now().await;
            self.log.lock().unwrap().push(self.id);
            match self.fails {
                true => Err(anyhow::anyhow!("P{} unreachable", self.id)),
                false => Ok(()),
            }
        }
    }

    impl Player for Member {
        fn id(&self) -> PlayerId {
            self.id
        }
        fn name(&self) -> &str {
            "member"
        }
    }

    fn members(ids: &[PlayerId], failing: Option<PlayerId>) -> (Multicast, Arc<Mutex<Vec<PlayerId>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let targets = ids
            .iter()
            .map(|&id| {
                Arc::new(Member {
                    id,
                    fails: Some(id) == failing,
                    log: log.clone(),
                }) as Arc<dyn Player>
            })
            .collect::<Vec<_>>();
        (Multicast::from(targets), log)
    }

    #[tokio::test]
    async fn sends_in_list_order() {
        let (all, log) = members(&[3, 1, 2], None);
        all.text("hello").await.unwrap();
        assert_eq!(*log.lock().unwrap(), vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn excluding_skips_exactly_one() {
        let (all, log) = members(&[1, 2, 3, 4], None);
        let some = all.excluding(2);
        some.text("hello").await.unwrap();
        assert_eq!(*log.lock().unwrap(), vec![1, 3, 4]);
        assert_eq!(all.len(), 4);
        assert!(!some.contains(2));
    }

    #[tokio::test]
    async fn including_appends_without_mutating() {
        let (all, log) = members(&[1, 2], None);
        let (extra, _) = members(&[9], None);
        let more = all.including(extra.targets[0].clone());
        assert_eq!(more.ids(), vec![1, 2, 9]);
        assert_eq!(all.ids(), vec![1, 2]);
        all.text("hello").await.unwrap();
        assert_eq!(*log.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn failure_aborts_remaining_sends() {
        let (all, log) = members(&[1, 2, 3], Some(2));
        let result = all.text("hello").await;
        assert_eq!(result.map_err(|e| e.player).err(), Some(2));
        assert_eq!(*log.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn split_isolates_one_player() {
        let (all, _) = members(&[1, 2, 3, 4], None);
        let (one, rest) = all.split(2).unwrap();
        assert_eq!(one.ids(), vec![2]);
        assert_eq!(rest.ids(), vec![3, 4]);
        assert!(all.split(9).is_none());
    }

    #[tokio::test]
    async fn empty_set_is_a_noop() {
        let all = Multicast::default();
        assert!(all.is_empty());
        assert!(all.text("nobody").await.is_ok());
    }
}
