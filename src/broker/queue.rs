//! Point-to-point queue management.

use dashmap::DashMap;

use crate::broker::{Message, Subscriber};
use crate::net::connection::ConnectionId;
use crate::scheduler::{QueueScheduler, SubscriberScheduler};
use crate::store::QueueStore;

/// Outcome of sending a message to a queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Deliver the message to this subscriber now.
    Dispatch { subscriber: Subscriber, message: Message },
    /// No subscriber was available; the message was stored.
    Queued,
}

/// Owns queue subscriptions and delivery policy.
///
/// Every message goes to exactly one subscriber. The subscriber scheduler
/// decides who receives a freshly sent message; the queue scheduler decides
/// which backlog a ready subscriber is served from.
#[derive(Debug)]
pub struct QueueManager {
    store: Box<dyn QueueStore>,
    subscriber_scheduler: Box<dyn SubscriberScheduler>,
    queue_scheduler: Box<dyn QueueScheduler>,
    subscriptions: DashMap<String, Vec<Subscriber>>,
}

impl QueueManager {
    pub fn new(
        store: Box<dyn QueueStore>,
        subscriber_scheduler: Box<dyn SubscriberScheduler>,
        queue_scheduler: Box<dyn QueueScheduler>,
    ) -> Self {
        Self {
            store,
            subscriber_scheduler,
            queue_scheduler,
            subscriptions: DashMap::new(),
        }
    }

    pub fn store(&self) -> &dyn QueueStore {
        self.store.as_ref()
    }

    pub fn subscriber_scheduler(&self) -> &dyn SubscriberScheduler {
        self.subscriber_scheduler.as_ref()
    }

    pub fn queue_scheduler(&self) -> &dyn QueueScheduler {
        self.queue_scheduler.as_ref()
    }

    /// Subscribe a connection to a queue. Re-subscribing replaces the
    /// previous entry for the same connection.
    pub fn subscribe(&self, destination: &str, subscriber: Subscriber) {
        let mut subs = self.subscriptions.entry(destination.to_string()).or_default();
        subs.retain(|s| s.connection != subscriber.connection);
        subs.push(subscriber);
        tracing::debug!(
            destination,
            connection_id = %subscriber.connection,
            reliable = subscriber.reliable,
            "Queue subscription added"
        );
    }

    pub fn unsubscribe(&self, destination: &str, connection: ConnectionId) {
        self.subscriptions.remove_if_mut(destination, |_, subs| {
            subs.retain(|s| s.connection != connection);
            subs.is_empty()
        });
    }

    /// Drop every subscription held by a connection. Returns how many were removed.
    pub fn disconnect(&self, connection: ConnectionId) -> usize {
        let mut removed = 0;
        self.subscriptions.retain(|_, subs| {
            let before = subs.len();
            subs.retain(|s| s.connection != connection);
            removed += before - subs.len();
            !subs.is_empty()
        });
        removed
    }

    pub fn subscriber_count(&self, destination: &str) -> usize {
        self.subscriptions.get(destination).map_or(0, |s| s.len())
    }

    /// Route a message to one subscriber, or store it when nobody can take it.
    pub fn send(&self, message: Message) -> Delivery {
        let subscribers = self
            .subscriptions
            .get(&message.destination)
            .map(|s| s.value().clone())
            .unwrap_or_default();

        match self.subscriber_scheduler.choice(&subscribers, &message) {
            Some(subscriber) => Delivery::Dispatch { subscriber, message },
            None => {
                tracing::trace!(destination = %message.destination, "No subscriber, queueing message");
                let destination = message.destination.clone();
                self.store.enqueue(&destination, message);
                Delivery::Queued
            }
        }
    }

    /// Take the next stored message for a subscriber from one of the queues
    /// it is subscribed to.
    pub fn next_message(&self, subscriber: &Subscriber) -> Option<Message> {
        let mut pending: Vec<String> = self
            .subscriptions
            .iter()
            .filter(|entry| entry.value().iter().any(|s| s.connection == subscriber.connection))
            .map(|entry| entry.key().clone())
            .filter(|destination| self.store.has_messages(destination))
            .collect();
        pending.sort();

        let index = self.queue_scheduler.choice(&pending, subscriber)?;
        let destination = pending.get(index)?;
        self.store.dequeue(destination)
    }
}
