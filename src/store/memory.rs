//! In-memory queue store.

use std::collections::VecDeque;

use dashmap::DashMap;

use crate::broker::Message;
use crate::store::QueueStore;

/// Volatile store keeping one FIFO per destination.
/// Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryQueue {
    queues: DashMap<String, VecDeque<Message>>,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QueueStore for MemoryQueue {
    fn enqueue(&self, destination: &str, message: Message) {
        self.queues
            .entry(destination.to_string())
            .or_default()
            .push_back(message);
    }

    fn dequeue(&self, destination: &str) -> Option<Message> {
        let message = self.queues.get_mut(destination)?.pop_front();
        // Drop drained queues so `destinations` stays accurate.
        self.queues.remove_if(destination, |_, q| q.is_empty());
        message
    }

    fn size(&self, destination: &str) -> usize {
        self.queues.get(destination).map_or(0, |q| q.len())
    }

    fn destinations(&self) -> Vec<String> {
        self.queues
            .iter()
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| entry.key().clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_per_destination() {
        let store = MemoryQueue::new();
        store.enqueue("/queue/a", Message::new("/queue/a", "1"));
        store.enqueue("/queue/a", Message::new("/queue/a", "2"));
        store.enqueue("/queue/b", Message::new("/queue/b", "x"));

        assert_eq!(store.size("/queue/a"), 2);
        assert_eq!(store.dequeue("/queue/a").unwrap().body, b"1");
        assert_eq!(store.dequeue("/queue/a").unwrap().body, b"2");
        assert!(store.dequeue("/queue/a").is_none());
        assert!(store.has_messages("/queue/b"));
    }

    #[test]
    fn destinations_only_lists_pending_queues() {
        let store = MemoryQueue::new();
        store.enqueue("/queue/a", Message::new("/queue/a", "1"));
        store.enqueue("/queue/b", Message::new("/queue/b", "2"));
        store.dequeue("/queue/a");

        assert_eq!(store.destinations(), vec!["/queue/b".to_string()]);
    }

    #[test]
    fn unknown_destination_is_empty() {
        let store = MemoryQueue::new();
        assert_eq!(store.size("/queue/none"), 0);
        assert!(store.dequeue("/queue/none").is_none());
    }
}
