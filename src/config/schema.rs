//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use reqwest::header::InvalidHeaderValue;
use serde::{Deserialize, Serialize};

use crate::bridging::Credentials;

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BridgeConfig {
    /// Inbound HTTP server settings.
    pub server: ServerConfig,

    /// Downstream laboratory endpoint and default credentials.
    pub downstream: DownstreamConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Inbound server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8111").
    pub bind_address: String,

    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8111".to_string(),
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Downstream (LIS bridging) configuration.
#[derive(Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DownstreamConfig {
    /// Endpoint receiving transformed orders.
    pub url: String,

    /// Default `x-sign` value when the caller sends none.
    pub sign: String,

    /// Default `x-cons` value when the caller sends none.
    pub cons: String,
}

impl DownstreamConfig {
    /// Fallback credentials for requests without credential headers.
    pub fn default_credentials(&self) -> Result<Credentials, InvalidHeaderValue> {
        Credentials::new(&self.sign, &self.cons)
    }
}

impl std::fmt::Debug for DownstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownstreamConfig")
            .field("url", &self.url)
            .field("sign_set", &!self.sign.is_empty())
            .field("cons_set", &!self.cons.is_empty())
            .finish()
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(other.to_string()),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive.
    pub log_level: String,

    /// Output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
