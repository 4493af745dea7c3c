//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     BrokerConfig + ComponentRegistry
//!     → resolve identifiers → construct components → inject into managers
//!     → StompServer (not yet listening)
//!     → caller binds and serves
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then components, then managers, listener last
//! - Any failure before serving terminates the process

pub mod startup;

pub use startup::{build_server, AssemblyError, BootstrapError, ConstructionError};
