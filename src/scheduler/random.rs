//! Uniformly random scheduling strategies.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::broker::{Message, Subscriber};
use crate::scheduler::{QueueScheduler, SubscriberScheduler};

/// Picks any subscriber with equal probability.
#[derive(Debug, Default)]
pub struct RandomSubscriberScheduler;

impl RandomSubscriberScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl SubscriberScheduler for RandomSubscriberScheduler {
    fn choice(&self, subscribers: &[Subscriber], _message: &Message) -> Option<Subscriber> {
        subscribers.choose(&mut rand::thread_rng()).copied()
    }
}

/// Picks any pending queue with equal probability.
#[derive(Debug, Default)]
pub struct RandomQueueScheduler;

impl RandomQueueScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl QueueScheduler for RandomQueueScheduler {
    fn choice(&self, queues: &[String], _subscriber: &Subscriber) -> Option<usize> {
        if queues.is_empty() {
            return None;
        }
        Some(rand::thread_rng().gen_range(0..queues.len()))
    }
}
