//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the broker.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Default listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0";

/// Default STOMP port.
pub const DEFAULT_LISTEN_PORT: u16 = 61613;

/// Default connection limit.
pub const DEFAULT_MAX_CONNECTIONS: usize = 10_000;

/// Identifier of the default queue store.
pub const DEFAULT_QUEUE_STORE: &str = "coilmq.store.memory.MemoryQueue";

/// Identifier of the default subscriber scheduler.
pub const DEFAULT_SUBSCRIBER_SCHEDULER: &str = "coilmq.scheduler.FavorReliableSubscriberScheduler";

/// Identifier of the default queue scheduler.
pub const DEFAULT_QUEUE_SCHEDULER: &str = "coilmq.scheduler.RandomQueueScheduler";

/// Root configuration for the broker.
///
/// Unknown top-level tables are ignored so that other subsystems can keep
/// their own sections in the same file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BrokerConfig {
    /// The `[coilmq]` section: listener and pluggable component identifiers.
    pub coilmq: CoreConfig,

    /// Metrics exporter settings.
    pub metrics: MetricsConfig,
}

/// The `[coilmq]` section.
///
/// Keys the broker does not know are kept in `extra` so the section can be
/// shared with plugins; the loader logs them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Address to listen on (IP literal or host name).
    pub listen_addr: String,

    /// Port to listen on.
    pub listen_port: u16,

    /// Component identifier of the queue store.
    pub queue_store_class: String,

    /// Component identifier of the subscriber scheduler.
    pub subscriber_scheduler_class: String,

    /// Component identifier of the queue scheduler.
    pub queue_scheduler_class: String,

    /// Maximum concurrent client connections (backpressure).
    pub max_connections: usize,

    /// Any other keys found in the section.
    #[serde(flatten)]
    pub extra: toml::Table,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            listen_port: DEFAULT_LISTEN_PORT,
            queue_store_class: DEFAULT_QUEUE_STORE.to_string(),
            subscriber_scheduler_class: DEFAULT_SUBSCRIBER_SCHEDULER.to_string(),
            queue_scheduler_class: DEFAULT_QUEUE_SCHEDULER.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            extra: toml::Table::new(),
        }
    }
}

/// Metrics configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Enable the Prometheus exporter.
    pub enabled: bool,

    /// Exporter bind address.
    pub address: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            address: "0.0.0.0:9100".to_string(),
        }
    }
}

/// Command-line sourced values. `None` means the flag was not given and the
/// loaded value must be left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub listen_addr: Option<String>,
    pub listen_port: Option<u16>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        self.listen_addr.is_none() && self.listen_port.is_none()
    }
}

impl BrokerConfig {
    /// Apply command-line overrides on top of the loaded values.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(addr) = &overrides.listen_addr {
            self.coilmq.listen_addr = addr.clone();
        }
        if let Some(port) = overrides.listen_port {
            self.coilmq.listen_port = port;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_key() {
        let config = BrokerConfig::default();
        assert_eq!(config.coilmq.listen_addr, "0.0.0.0");
        assert_eq!(config.coilmq.listen_port, 61613);
        assert_eq!(config.coilmq.queue_store_class, DEFAULT_QUEUE_STORE);
        assert_eq!(config.coilmq.subscriber_scheduler_class, DEFAULT_SUBSCRIBER_SCHEDULER);
        assert_eq!(config.coilmq.queue_scheduler_class, DEFAULT_QUEUE_SCHEDULER);
        assert!(!config.metrics.enabled);
    }

    #[test]
    fn default_load_is_idempotent() {
        assert_eq!(BrokerConfig::default(), BrokerConfig::default());
    }

    #[test]
    fn absent_overrides_leave_values_alone() {
        let mut config = BrokerConfig::default();
        config.coilmq.listen_addr = "10.0.0.1".into();
        config.coilmq.listen_port = 7000;
        let before = config.clone();

        config.apply_overrides(&ConfigOverrides::default());
        assert_eq!(config, before);
    }

    #[test]
    fn present_overrides_win() {
        let mut config = BrokerConfig::default();
        config.apply_overrides(&ConfigOverrides {
            listen_addr: Some("127.0.0.1".into()),
            listen_port: Some(5000),
        });
        assert_eq!(config.coilmq.listen_addr, "127.0.0.1");
        assert_eq!(config.coilmq.listen_port, 5000);
        assert_eq!(config.coilmq.queue_store_class, DEFAULT_QUEUE_STORE);
    }

    #[test]
    fn port_only_override_keeps_address() {
        let mut config = BrokerConfig::default();
        config.coilmq.listen_addr = "192.168.1.5".into();
        config.apply_overrides(&ConfigOverrides {
            listen_addr: None,
            listen_port: Some(5000),
        });
        assert_eq!(config.coilmq.listen_addr, "192.168.1.5");
        assert_eq!(config.coilmq.listen_port, 5000);
    }
}
