use super::event::*;
use crate::DECISION_TIMEOUT;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Configuration for game timeouts.
#[derive(Debug, Clone, Copy)]
pub struct TimerConfig {
    /// Wall-clock length of one countdown unit.
    pub tick: Duration,
    /// Units a player gets per decision.
    pub decision: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            decision: DECISION_TIMEOUT,
        }
    }
}

/// Periodic tick source for one room.
///
/// Feeds `Inbound::Tick` into the room's inbox every `tick` until the room
/// lowers the running flag, so the countdown is decremented on the same task
/// that owns the game state.
#[derive(Debug)]
pub struct Ticker {
    running: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Ticker {
    pub fn spawn(tick: Duration, inbox: UnboundedSender<Inbound>) -> Self {
        let (running, mut flag) = watch::channel(true);
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + tick, tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    changed = flag.changed() => match changed {
                        Ok(()) if *flag.borrow() => continue,
                        _ => break,
                    },
                    _ = interval.tick() => if inbox.send(Inbound::Tick).is_err() {
                        break;
                    },
                }
            }
            log::trace!("[ticker] stopped");
        });
        Self { running, task }
    }
    /// Lowers the running flag and waits for the tick task to exit.
    pub async fn stop(self) {
        let _ = self.running.send(false);
        if let Err(e) = self.task.await {
            log::warn!("[ticker] task failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn default_config() {
        let config = TimerConfig::default();
        assert_eq!(config.tick, Duration::from_secs(1));
        assert_eq!(config.decision, DECISION_TIMEOUT);
    }

    #[tokio::test]
    async fn ticks_until_stopped() {
        let (tx, mut rx) = unbounded_channel();
        let ticker = Ticker::spawn(Duration::from_millis(1), tx);
        assert_eq!(rx.recv().await, Some(Inbound::Tick));
        assert_eq!(rx.recv().await, Some(Inbound::Tick));
        ticker.stop().await;
        while rx.try_recv().is_ok() {}
        assert!(rx.recv().await.is_none());
    }
}
