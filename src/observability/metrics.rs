//! Metrics collection and exposition.
//!
//! # Metrics
//! - `coilmq_connections_total` (counter): accepted client connections
//! - `coilmq_active_connections` (gauge): current connection count
//! - `coilmq_components_total` (counter): constructed components by kind and identifier
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its HTTP scrape endpoint.
/// Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_connection_opened(active: u64) {
    ::metrics::counter!("coilmq_connections_total").increment(1);
    ::metrics::gauge!("coilmq_active_connections").set(active as f64);
}

pub fn record_connection_closed(active: u64) {
    ::metrics::gauge!("coilmq_active_connections").set(active as f64);
}

pub fn record_component_built(kind: &'static str, identifier: &str) {
    ::metrics::counter!(
        "coilmq_components_total",
        "kind" => kind,
        "identifier" => identifier.to_string()
    )
    .increment(1);
}
