//! Registrations for the components shipped with the broker.

use crate::config::schema::{
    DEFAULT_QUEUE_SCHEDULER, DEFAULT_QUEUE_STORE, DEFAULT_SUBSCRIBER_SCHEDULER,
};
use crate::registry::{BoxError, ComponentRegistration};
use crate::scheduler::{
    FavorReliableSubscriberScheduler, QueueScheduler, RandomQueueScheduler,
    RandomSubscriberScheduler, RoundRobinQueueScheduler, SubscriberScheduler,
};
use crate::store::memory::MemoryQueue;
use crate::store::QueueStore;

pub const MEMORY_QUEUE: &str = DEFAULT_QUEUE_STORE;
pub const FAVOR_RELIABLE_SUBSCRIBER_SCHEDULER: &str = DEFAULT_SUBSCRIBER_SCHEDULER;
pub const RANDOM_SUBSCRIBER_SCHEDULER: &str = "coilmq.scheduler.RandomSubscriberScheduler";
pub const RANDOM_QUEUE_SCHEDULER: &str = DEFAULT_QUEUE_SCHEDULER;
pub const ROUND_ROBIN_QUEUE_SCHEDULER: &str = "coilmq.scheduler.RoundRobinQueueScheduler";

fn memory_queue() -> Result<Box<dyn QueueStore>, BoxError> {
    Ok(Box::new(MemoryQueue::new()))
}

fn favor_reliable() -> Result<Box<dyn SubscriberScheduler>, BoxError> {
    Ok(Box::new(FavorReliableSubscriberScheduler::new()))
}

fn random_subscriber() -> Result<Box<dyn SubscriberScheduler>, BoxError> {
    Ok(Box::new(RandomSubscriberScheduler::new()))
}

fn random_queue() -> Result<Box<dyn QueueScheduler>, BoxError> {
    Ok(Box::new(RandomQueueScheduler::new()))
}

fn round_robin_queue() -> Result<Box<dyn QueueScheduler>, BoxError> {
    Ok(Box::new(RoundRobinQueueScheduler::new()))
}

inventory::submit! { ComponentRegistration::queue_store(MEMORY_QUEUE, memory_queue) }
inventory::submit! {
    ComponentRegistration::subscriber_scheduler(FAVOR_RELIABLE_SUBSCRIBER_SCHEDULER, favor_reliable)
}
inventory::submit! {
    ComponentRegistration::subscriber_scheduler(RANDOM_SUBSCRIBER_SCHEDULER, random_subscriber)
}
inventory::submit! { ComponentRegistration::queue_scheduler(RANDOM_QUEUE_SCHEDULER, random_queue) }
inventory::submit! {
    ComponentRegistration::queue_scheduler(ROUND_ROBIN_QUEUE_SCHEDULER, round_robin_queue)
}
