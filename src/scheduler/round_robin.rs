//! Round-robin queue scheduling.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::broker::Subscriber;
use crate::scheduler::QueueScheduler;

/// Round-robin selector.
/// Stores an internal counter to rotate through pending queues.
#[derive(Debug, Default)]
pub struct RoundRobinQueueScheduler {
    counter: AtomicUsize,
}

impl RoundRobinQueueScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QueueScheduler for RoundRobinQueueScheduler {
    fn choice(&self, queues: &[String], _subscriber: &Subscriber) -> Option<usize> {
        if queues.is_empty() {
            return None;
        }
        let count = self.counter.fetch_add(1, Ordering::Relaxed);
        Some(count % queues.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::connection::ConnectionId;

    #[test]
    fn test_round_robin() {
        let scheduler = RoundRobinQueueScheduler::new();
        let sub = Subscriber::new(ConnectionId::new(), true);
        let queues = vec!["/queue/a".to_string(), "/queue/b".to_string()];

        assert_eq!(scheduler.choice(&queues, &sub), Some(0));
        assert_eq!(scheduler.choice(&queues, &sub), Some(1));
        assert_eq!(scheduler.choice(&queues, &sub), Some(0));
        assert_eq!(scheduler.choice(&[], &sub), None);
    }
}
