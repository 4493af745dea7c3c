//! coilmq broker bootstrap.
//!
//! # Architecture Overview
//!
//! ```text
//!   argv ──▶ cli ──▶ ConfigOverrides ─┐
//!                                     ▼
//!   defaults ──▶ config::loader ──▶ BrokerConfig ──┐
//!                                                  ▼
//!   inventory ──▶ registry ──────────────▶ lifecycle::startup::build_server
//!                                                  │
//!                     ┌────────────────────────────┼───────────────────────┐
//!                     ▼                            ▼                       ▼
//!              store + schedulers ──▶ broker::QueueManager   broker::TopicManager
//!                                                  │                       │
//!                                                  └──────▶ server ◀───────┘
//!                                                             │
//!                                                     net::listener (serve)
//! ```

pub mod broker;
pub mod cli;
pub mod config;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod registry;
pub mod scheduler;
pub mod server;
pub mod store;

pub use config::{BrokerConfig, ConfigOverrides};
pub use lifecycle::{build_server, BootstrapError};
pub use registry::ComponentRegistry;
pub use server::StompServer;
