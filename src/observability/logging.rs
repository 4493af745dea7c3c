//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Level filter from `RUST_LOG`, falling back to `coilmq=info`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "coilmq=info";

/// Install the global tracing subscriber. Call once, before bootstrap.
pub fn init() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
