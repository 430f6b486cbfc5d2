//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional)
//!     → loader.rs (dotenvy into process environment)
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overlay)
//!     → validation.rs (semantic checks)
//!     → BridgeConfig (validated, immutable)
//!     → handed to HttpServer at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Any load or validation error is fatal at startup

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_env_file, ConfigError};
pub use schema::BridgeConfig;
pub use schema::DownstreamConfig;
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
pub use schema::ServerConfig;
