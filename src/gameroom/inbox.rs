use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;

/// Event queue of a room. The room keeps one sender itself, so the queue
/// stays open for as long as the room lives.
#[derive(Debug)]
pub struct Inbox<T> {
    tx: UnboundedSender<T>,
    rx: UnboundedReceiver<T>,
}

impl<T> Default for Inbox<T> {
    fn default() -> Self {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl<T> Inbox<T> {
    pub fn sender(&self) -> UnboundedSender<T> {
        self.tx.clone()
    }
    /// Next event, in arrival order.
    pub async fn next(&mut self) -> Option<T> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_arrive_in_order_from_any_sender() {
        let mut inbox = Inbox::default();
        let (a, b) = (inbox.sender(), inbox.sender());
        a.send(1).unwrap();
        b.send(2).unwrap();
        a.send(3).unwrap();
        assert_eq!(inbox.next().await, Some(1));
        assert_eq!(inbox.next().await, Some(2));
        assert_eq!(inbox.next().await, Some(3));
    }
}
