//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{BrokerConfig, ConfigOverrides};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config file `{}`: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file.
///
/// Without a path the built-in defaults are returned. Keys missing from the
/// file keep their defaults. A file that is given but cannot be read or parsed
/// is an error; there is no fallback to defaults.
pub fn load_config(path: Option<&Path>) -> Result<BrokerConfig, ConfigError> {
    let Some(path) = path else {
        tracing::debug!("No config file given, using defaults");
        return Ok(BrokerConfig::default());
    };

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&content, path)?;
    for key in config.coilmq.extra.keys() {
        tracing::warn!(path = %path.display(), key = %key, "Unrecognised key in [coilmq] section");
    }

    tracing::debug!(path = %path.display(), "Config file loaded");
    Ok(config)
}

fn parse_config(content: &str, path: &Path) -> Result<BrokerConfig, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Build the process configuration: defaults, then the optional file, then
/// command-line overrides. The result is validated before it is returned.
pub fn init_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<BrokerConfig, ConfigError> {
    let mut config = load_config(path)?;
    config.apply_overrides(overrides);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
