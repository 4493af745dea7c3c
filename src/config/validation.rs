//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject empty listen addresses and component identifiers
//! - Validate value ranges (max_connections > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BrokerConfig → Result<(), Vec<ValidationError>>
//! - Runs after command-line overrides, before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::BrokerConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("coilmq.listen_addr must not be empty")]
    EmptyListenAddr,

    #[error("coilmq.{key} must name a component")]
    EmptyIdentifier { key: &'static str },

    #[error("coilmq.max_connections must be greater than zero")]
    ZeroMaxConnections,

    #[error("metrics.address `{address}` is not a socket address")]
    InvalidMetricsAddress { address: String },
}

/// Validate a fully layered configuration.
pub fn validate_config(config: &BrokerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let core = &config.coilmq;

    if core.listen_addr.trim().is_empty() {
        errors.push(ValidationError::EmptyListenAddr);
    }

    for (key, value) in [
        ("queue_store_class", &core.queue_store_class),
        ("subscriber_scheduler_class", &core.subscriber_scheduler_class),
        ("queue_scheduler_class", &core.queue_scheduler_class),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::EmptyIdentifier { key });
        }
    }

    if core.max_connections == 0 {
        errors.push(ValidationError::ZeroMaxConnections);
    }

    if config.metrics.enabled && config.metrics.address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress {
            address: config.metrics.address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&BrokerConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = BrokerConfig::default();
        config.coilmq.listen_addr = "  ".into();
        config.coilmq.queue_scheduler_class = String::new();
        config.coilmq.max_connections = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyListenAddr,
                ValidationError::EmptyIdentifier { key: "queue_scheduler_class" },
                ValidationError::ZeroMaxConnections,
            ]
        );
    }

    #[test]
    fn metrics_address_checked_only_when_enabled() {
        let mut config = BrokerConfig::default();
        config.metrics.address = "not-an-address".into();
        assert!(validate_config(&config).is_ok());

        config.metrics.enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidMetricsAddress { .. }));
    }
}
