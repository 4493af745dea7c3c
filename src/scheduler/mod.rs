//! Delivery scheduling subsystem.
//!
//! # Data Flow
//! ```text
//! Message sent to a queue with subscribers
//!     → SubscriberScheduler picks one subscriber:
//!         - favor_reliable.rs (acking subscribers first)
//!         - random.rs (uniform choice)
//!
//! Subscriber ready for more work
//!     → QueueScheduler picks one of its pending queues:
//!         - random.rs (uniform choice)
//!         - round_robin.rs (rotate through queues)
//! ```
//!
//! # Design Decisions
//! - Schedulers only choose; the QueueManager owns subscriptions and storage
//! - Algorithm is chosen by component identifier at startup
//! - `None` means nothing suitable, never a panic on empty input

pub mod favor_reliable;
pub mod random;
pub mod round_robin;

use crate::broker::{Message, Subscriber};

pub use favor_reliable::FavorReliableSubscriberScheduler;
pub use random::{RandomQueueScheduler, RandomSubscriberScheduler};
pub use round_robin::RoundRobinQueueScheduler;

/// Chooses which subscriber of a queue receives a message.
pub trait SubscriberScheduler: Send + Sync + std::fmt::Debug {
    fn choice(&self, subscribers: &[Subscriber], message: &Message) -> Option<Subscriber>;
}

/// Chooses which pending queue a subscriber is served from next.
/// Returns an index into `queues`.
pub trait QueueScheduler: Send + Sync + std::fmt::Debug {
    fn choice(&self, queues: &[String], subscriber: &Subscriber) -> Option<usize>;
}
