//! Publish/subscribe topic management.

use dashmap::DashMap;

use crate::broker::Message;
use crate::net::connection::ConnectionId;

/// Owns topic subscriptions. A message sent to a topic goes to every
/// current subscriber and is never stored.
#[derive(Debug, Default)]
pub struct TopicManager {
    subscriptions: DashMap<String, Vec<ConnectionId>>,
}

impl TopicManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, destination: &str, connection: ConnectionId) {
        let mut subs = self.subscriptions.entry(destination.to_string()).or_default();
        if !subs.contains(&connection) {
            subs.push(connection);
        }
        tracing::debug!(destination, connection_id = %connection, "Topic subscription added");
    }

    pub fn unsubscribe(&self, destination: &str, connection: ConnectionId) {
        self.subscriptions.remove_if_mut(destination, |_, subs| {
            subs.retain(|c| *c != connection);
            subs.is_empty()
        });
    }

    /// Drop every subscription held by a connection. Returns how many were removed.
    pub fn disconnect(&self, connection: ConnectionId) -> usize {
        let mut removed = 0;
        self.subscriptions.retain(|_, subs| {
            let before = subs.len();
            subs.retain(|c| *c != connection);
            removed += before - subs.len();
            !subs.is_empty()
        });
        removed
    }

    pub fn subscriber_count(&self, destination: &str) -> usize {
        self.subscriptions.get(destination).map_or(0, |s| s.len())
    }

    /// Connections that should receive the message.
    pub fn send(&self, message: &Message) -> Vec<ConnectionId> {
        self.subscriptions
            .get(&message.destination)
            .map(|s| s.value().clone())
            .unwrap_or_default()
    }
}
