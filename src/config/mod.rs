//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults (schema.rs)
//!     → loader.rs (optional TOML file, merged over defaults)
//!     → ConfigOverrides (command-line values, only those given)
//!     → validation.rs (semantic checks)
//!     → BrokerConfig (validated, read-only)
//!     → passed by reference to the assembler
//! ```
//!
//! # Design Decisions
//! - Config is built once at startup; there is no reload
//! - All fields have defaults to allow minimal configs
//! - A malformed file is fatal, never silently replaced by defaults
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{init_config, load_config, ConfigError};
pub use schema::{BrokerConfig, ConfigOverrides, CoreConfig, MetricsConfig};
pub use validation::ValidationError;
