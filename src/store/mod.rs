//! Queue storage.
//!
//! # Data Flow
//! ```text
//! QueueManager::send (no subscriber available)
//!     → QueueStore::enqueue(destination, message)
//!
//! QueueManager::next_message
//!     → QueueStore::destinations / has_messages
//!     → QueueStore::dequeue(destination)
//! ```
//!
//! # Design Decisions
//! - Stores are selected by component identifier at startup
//! - FIFO per destination
//! - All methods take `&self`; implementations synchronise internally

pub mod memory;

use crate::broker::Message;

/// Storage backend for queued messages.
pub trait QueueStore: Send + Sync + std::fmt::Debug {
    /// Append a message to the destination's queue.
    fn enqueue(&self, destination: &str, message: Message);

    /// Remove and return the oldest message for the destination.
    fn dequeue(&self, destination: &str) -> Option<Message>;

    /// Number of messages waiting on the destination.
    fn size(&self, destination: &str) -> usize;

    fn has_messages(&self, destination: &str) -> bool {
        self.size(destination) > 0
    }

    /// Destinations that currently hold at least one message.
    fn destinations(&self) -> Vec<String>;
}
