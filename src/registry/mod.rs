//! Component registry: maps configuration identifiers to factories.
//!
//! # Data Flow
//! ```text
//! inventory::submit!(ComponentRegistration)   (built-ins, plugins linked in)
//!     → ComponentRegistry::discover()
//!     → ComponentRegistry::register()          (explicit, overrides)
//!     → resolve_*(key, identifier)             (typed factory or ResolutionError)
//!     → factory()                              (fresh instance per call)
//! ```
//!
//! # Design Decisions
//! - Identifiers are plain strings, so any implementation compiled into the
//!   process can be selected from the config file
//! - Lookup fails closed: unknown or wrong-kind identifiers are errors
//! - Factories are `fn` pointers; there is no shared instance behind them

pub mod builtin;

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::scheduler::{QueueScheduler, SubscriberScheduler};
use crate::store::QueueStore;

/// Error returned by a component factory.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type QueueStoreFactory = fn() -> Result<Box<dyn QueueStore>, BoxError>;
pub type SubscriberSchedulerFactory = fn() -> Result<Box<dyn SubscriberScheduler>, BoxError>;
pub type QueueSchedulerFactory = fn() -> Result<Box<dyn QueueScheduler>, BoxError>;

/// The pluggable slots a component can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    QueueStore,
    SubscriberScheduler,
    QueueScheduler,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::QueueStore => "queue store",
            ComponentKind::SubscriberScheduler => "subscriber scheduler",
            ComponentKind::QueueScheduler => "queue scheduler",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A constructor tagged with the slot it fills.
#[derive(Debug, Clone, Copy)]
pub enum Factory {
    QueueStore(QueueStoreFactory),
    SubscriberScheduler(SubscriberSchedulerFactory),
    QueueScheduler(QueueSchedulerFactory),
}

impl Factory {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Factory::QueueStore(_) => ComponentKind::QueueStore,
            Factory::SubscriberScheduler(_) => ComponentKind::SubscriberScheduler,
            Factory::QueueScheduler(_) => ComponentKind::QueueScheduler,
        }
    }
}

/// A link-time registration collected by [`ComponentRegistry::discover`].
///
/// ```ignore
/// fn my_store() -> Result<Box<dyn QueueStore>, BoxError> {
///     Ok(Box::new(MyStore::default()))
/// }
///
/// inventory::submit! {
///     ComponentRegistration::queue_store("mycompany.store.MyStore", my_store)
/// }
/// ```
#[derive(Debug)]
pub struct ComponentRegistration {
    pub identifier: &'static str,
    pub factory: Factory,
}

impl ComponentRegistration {
    pub const fn new(identifier: &'static str, factory: Factory) -> Self {
        Self { identifier, factory }
    }

    pub const fn queue_store(identifier: &'static str, factory: QueueStoreFactory) -> Self {
        Self::new(identifier, Factory::QueueStore(factory))
    }

    pub const fn subscriber_scheduler(
        identifier: &'static str,
        factory: SubscriberSchedulerFactory,
    ) -> Self {
        Self::new(identifier, Factory::SubscriberScheduler(factory))
    }

    pub const fn queue_scheduler(identifier: &'static str, factory: QueueSchedulerFactory) -> Self {
        Self::new(identifier, Factory::QueueScheduler(factory))
    }
}

inventory::collect!(ComponentRegistration);

/// Failure to turn an identifier into a usable factory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("unknown component `{identifier}` configured for `{key}`")]
    Unknown { key: String, identifier: String },

    #[error("component `{identifier}` configured for `{key}` is a {found}, expected a {expected}")]
    WrongKind {
        key: String,
        identifier: String,
        expected: ComponentKind,
        found: ComponentKind,
    },
}

impl ResolutionError {
    pub fn identifier(&self) -> &str {
        match self {
            ResolutionError::Unknown { identifier, .. }
            | ResolutionError::WrongKind { identifier, .. } => identifier,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            ResolutionError::Unknown { key, .. } | ResolutionError::WrongKind { key, .. } => key,
        }
    }
}

/// Identifier → factory table. Built once at startup, then read-only.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    entries: HashMap<String, Factory>,
}

impl ComponentRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every `ComponentRegistration` linked into the process.
    pub fn discover() -> Self {
        let mut registry = Self::new();
        for reg in inventory::iter::<ComponentRegistration> {
            if registry.entries.contains_key(reg.identifier) {
                tracing::warn!(
                    identifier = reg.identifier,
                    "Duplicate component registration ignored"
                );
                continue;
            }
            registry.entries.insert(reg.identifier.to_string(), reg.factory);
        }
        tracing::debug!(components = registry.entries.len(), "Component registry built");
        registry
    }

    /// Register a factory under `identifier`, replacing any earlier entry.
    pub fn register(&mut self, identifier: impl Into<String>, factory: Factory) -> &mut Self {
        let identifier = identifier.into();
        if let Some(previous) = self.entries.insert(identifier.clone(), factory) {
            tracing::warn!(
                identifier = %identifier,
                previous_kind = %previous.kind(),
                kind = %factory.kind(),
                "Component registration replaced"
            );
        }
        self
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered identifiers with their kinds, sorted by kind then name.
    pub fn identifiers(&self) -> Vec<(&str, ComponentKind)> {
        let mut ids: Vec<(&str, ComponentKind)> = self
            .entries
            .iter()
            .map(|(id, factory)| (id.as_str(), factory.kind()))
            .collect();
        ids.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(b.0)));
        ids
    }

    /// Look up an identifier of any kind. `key` names the config entry it
    /// came from and is only used for error reporting.
    pub fn resolve(&self, key: &str, identifier: &str) -> Result<Factory, ResolutionError> {
        self.entries
            .get(identifier)
            .copied()
            .ok_or_else(|| ResolutionError::Unknown {
                key: key.to_string(),
                identifier: identifier.to_string(),
            })
    }

    pub fn resolve_queue_store(
        &self,
        key: &str,
        identifier: &str,
    ) -> Result<QueueStoreFactory, ResolutionError> {
        match self.resolve(key, identifier)? {
            Factory::QueueStore(f) => Ok(f),
            other => Err(wrong_kind(key, identifier, ComponentKind::QueueStore, other)),
        }
    }

    pub fn resolve_subscriber_scheduler(
        &self,
        key: &str,
        identifier: &str,
    ) -> Result<SubscriberSchedulerFactory, ResolutionError> {
        match self.resolve(key, identifier)? {
            Factory::SubscriberScheduler(f) => Ok(f),
            other => Err(wrong_kind(key, identifier, ComponentKind::SubscriberScheduler, other)),
        }
    }

    pub fn resolve_queue_scheduler(
        &self,
        key: &str,
        identifier: &str,
    ) -> Result<QueueSchedulerFactory, ResolutionError> {
        match self.resolve(key, identifier)? {
            Factory::QueueScheduler(f) => Ok(f),
            other => Err(wrong_kind(key, identifier, ComponentKind::QueueScheduler, other)),
        }
    }
}

fn wrong_kind(key: &str, identifier: &str, expected: ComponentKind, found: Factory) -> ResolutionError {
    ResolutionError::WrongKind {
        key: key.to_string(),
        identifier: identifier.to_string(),
        expected,
        found: found.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broker::Message;
    use crate::config::schema::{
        DEFAULT_QUEUE_SCHEDULER, DEFAULT_QUEUE_STORE, DEFAULT_SUBSCRIBER_SCHEDULER,
    };

    #[test]
    fn discovers_builtins() {
        let registry = ComponentRegistry::discover();
        assert!(registry.contains(DEFAULT_QUEUE_STORE));
        assert!(registry.contains(DEFAULT_SUBSCRIBER_SCHEDULER));
        assert!(registry.contains(DEFAULT_QUEUE_SCHEDULER));
        assert!(registry.contains(builtin::RANDOM_SUBSCRIBER_SCHEDULER));
        assert!(registry.contains(builtin::ROUND_ROBIN_QUEUE_SCHEDULER));
    }

    #[test]
    fn same_identifier_builds_independent_instances() {
        let registry = ComponentRegistry::discover();
        let factory = registry
            .resolve_queue_store("queue_store_class", DEFAULT_QUEUE_STORE)
            .unwrap();
        let again = registry
            .resolve_queue_store("queue_store_class", DEFAULT_QUEUE_STORE)
            .unwrap();

        let first = factory().unwrap();
        let second = again().unwrap();
        first.enqueue("/queue/a", Message::new("/queue/a", "only in first"));

        assert_eq!(first.size("/queue/a"), 1);
        assert_eq!(second.size("/queue/a"), 0);
    }

    #[test]
    fn unknown_identifier_fails_closed() {
        let registry = ComponentRegistry::discover();
        let err = registry
            .resolve_queue_store("queue_store_class", "nonexistent.DoesNotExist")
            .unwrap_err();
        assert_eq!(
            err,
            ResolutionError::Unknown {
                key: "queue_store_class".into(),
                identifier: "nonexistent.DoesNotExist".into(),
            }
        );
        assert_eq!(
            err.to_string(),
            "unknown component `nonexistent.DoesNotExist` configured for `queue_store_class`"
        );
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let registry = ComponentRegistry::discover();
        let err = registry
            .resolve_queue_store("queue_store_class", DEFAULT_QUEUE_SCHEDULER)
            .unwrap_err();
        assert_eq!(
            err,
            ResolutionError::WrongKind {
                key: "queue_store_class".into(),
                identifier: DEFAULT_QUEUE_SCHEDULER.into(),
                expected: ComponentKind::QueueStore,
                found: ComponentKind::QueueScheduler,
            }
        );
        assert_eq!(err.key(), "queue_store_class");
        assert_eq!(err.identifier(), DEFAULT_QUEUE_SCHEDULER);
    }

    #[test]
    fn explicit_registration_is_resolvable() {
        fn failing_store() -> Result<Box<dyn QueueStore>, BoxError> {
            Err("disk unavailable".into())
        }

        let mut registry = ComponentRegistry::new();
        assert!(registry.is_empty());
        registry.register("test.store.Failing", Factory::QueueStore(failing_store));

        let factory = registry.resolve_queue_store("queue_store_class", "test.store.Failing").unwrap();
        assert_eq!(factory().unwrap_err().to_string(), "disk unavailable");
    }

    #[test]
    fn identifiers_are_sorted_by_kind() {
        let registry = ComponentRegistry::discover();
        let ids = registry.identifiers();
        assert_eq!(ids.len(), registry.len());
        assert_eq!(ids.first().map(|(_, kind)| *kind), Some(ComponentKind::QueueStore));
        assert!(ids.windows(2).all(|w| w[0].1 <= w[1].1));
    }
}
