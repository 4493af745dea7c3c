//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve the configured component identifiers
//! - Construct the store and schedulers, inject them into the managers
//! - Build the server descriptor (address, port, managers)
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, nothing is retried
//! - Every identifier is resolved before the first component is constructed,
//!   so a bad entry leaves nothing half built
//! - No I/O here: the listen host is looked up and bound when the server starts

use thiserror::Error;

use crate::broker::{QueueManager, TopicManager};
use crate::config::{BrokerConfig, ConfigError};
use crate::net::ListenerError;
use crate::observability::metrics;
use crate::registry::{BoxError, ComponentKind, ComponentRegistry, ResolutionError};
use crate::server::StompServer;

pub const QUEUE_STORE_KEY: &str = "queue_store_class";
pub const SUBSCRIBER_SCHEDULER_KEY: &str = "subscriber_scheduler_class";
pub const QUEUE_SCHEDULER_KEY: &str = "queue_scheduler_class";

/// A resolved component could not be built.
#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("{kind} `{identifier}` failed to initialise: {source}")]
    Component {
        kind: ComponentKind,
        identifier: String,
        #[source]
        source: BoxError,
    },
}

/// Failure while assembling the server.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

/// Anything that stops the process before it serves.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("cannot render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Assemble a server from configuration. The returned server is not listening.
pub fn build_server(
    config: &BrokerConfig,
    registry: &ComponentRegistry,
) -> Result<StompServer, AssemblyError> {
    let core = &config.coilmq;

    let store_factory = registry.resolve_queue_store(QUEUE_STORE_KEY, &core.queue_store_class)?;
    let subscriber_factory = registry
        .resolve_subscriber_scheduler(SUBSCRIBER_SCHEDULER_KEY, &core.subscriber_scheduler_class)?;
    let queue_factory =
        registry.resolve_queue_scheduler(QUEUE_SCHEDULER_KEY, &core.queue_scheduler_class)?;

    let store = construct(ComponentKind::QueueStore, &core.queue_store_class, store_factory)?;
    let subscriber_scheduler = construct(
        ComponentKind::SubscriberScheduler,
        &core.subscriber_scheduler_class,
        subscriber_factory,
    )?;
    let queue_scheduler = construct(
        ComponentKind::QueueScheduler,
        &core.queue_scheduler_class,
        queue_factory,
    )?;

    let queue_manager = QueueManager::new(store, subscriber_scheduler, queue_scheduler);
    let topic_manager = TopicManager::new();
    let server = StompServer::new(&core.listen_addr, core.listen_port, queue_manager, topic_manager)
        .with_max_connections(core.max_connections);

    tracing::info!(
        address = %server.bind_addr(),
        queue_store = %core.queue_store_class,
        subscriber_scheduler = %core.subscriber_scheduler_class,
        queue_scheduler = %core.queue_scheduler_class,
        "Server assembled"
    );
    Ok(server)
}

fn construct<T: ?Sized>(
    kind: ComponentKind,
    identifier: &str,
    factory: fn() -> Result<Box<T>, BoxError>,
) -> Result<Box<T>, ConstructionError> {
    let component = factory().map_err(|source| ConstructionError::Component {
        kind,
        identifier: identifier.to_string(),
        source,
    })?;
    tracing::debug!(kind = %kind, identifier, "Component constructed");
    metrics::record_component_built(kind.as_str(), identifier);
    Ok(component)
}
