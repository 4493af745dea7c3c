//! Subscriber scheduling that prefers acknowledging subscribers.

use rand::seq::SliceRandom;

use crate::broker::{Message, Subscriber};
use crate::scheduler::SubscriberScheduler;

/// Chooses randomly among reliable subscribers, falling back to the
/// unreliable ones only when no reliable subscriber exists.
#[derive(Debug, Default)]
pub struct FavorReliableSubscriberScheduler;

impl FavorReliableSubscriberScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl SubscriberScheduler for FavorReliableSubscriberScheduler {
    fn choice(&self, subscribers: &[Subscriber], _message: &Message) -> Option<Subscriber> {
        let reliable: Vec<Subscriber> = subscribers.iter().filter(|s| s.reliable).copied().collect();
        let pool = if reliable.is_empty() { subscribers } else { &reliable[..] };
        pool.choose(&mut rand::thread_rng()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::connection::ConnectionId;

    #[test]
    fn reliable_subscriber_always_wins() {
        let scheduler = FavorReliableSubscriberScheduler::new();
        let unreliable = Subscriber::new(ConnectionId::new(), false);
        let reliable = Subscriber::new(ConnectionId::new(), true);
        let subs = vec![unreliable, reliable, unreliable];
        let msg = Message::new("/queue/a", "x");

        for _ in 0..20 {
            assert_eq!(scheduler.choice(&subs, &msg), Some(reliable));
        }
    }

    #[test]
    fn falls_back_to_unreliable() {
        let scheduler = FavorReliableSubscriberScheduler::new();
        let only = Subscriber::new(ConnectionId::new(), false);
        let msg = Message::new("/queue/a", "x");
        assert_eq!(scheduler.choice(&[only], &msg), Some(only));
        assert_eq!(scheduler.choice(&[], &msg), None);
    }
}
