//! Destination management subsystem.
//!
//! # Data Flow
//! ```text
//! /queue/* destinations:
//!     QueueManager::send
//!         → SubscriberScheduler picks one subscriber → Delivery::Dispatch
//!         → or QueueStore::enqueue → Delivery::Queued
//!
//! /topic/* destinations:
//!     TopicManager::send → every subscriber, nothing stored
//!
//! Connection closed:
//!     server → QueueManager::disconnect + TopicManager::disconnect
//! ```
//!
//! # Design Decisions
//! - Managers receive their store and schedulers by constructor injection
//! - Managers never touch sockets; they return who should receive what

pub mod queue;
pub mod topic;
pub mod types;

pub use queue::{Delivery, QueueManager};
pub use topic::TopicManager;
pub use types::{Message, Subscriber};
