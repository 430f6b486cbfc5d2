//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Downstream URL present, parsable, http(s)
//! - Default credentials usable as header values
//! - Bind address parsable, body limit non-zero
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BridgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::BridgeConfig;

/// A single semantic configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("downstream.url is not set (LIS_BRIDGING)")]
    MissingDownstreamUrl,

    #[error("downstream.url '{url}' is invalid: {reason}")]
    InvalidDownstreamUrl { url: String, reason: String },

    #[error("downstream.url scheme '{0}' is not http or https")]
    UnsupportedScheme(String),

    /// The value itself is never included.
    #[error("{0} contains characters not allowed in an HTTP header")]
    InvalidCredential(&'static str),

    #[error("server.bind_address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("server.max_body_size must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate a fully merged configuration.
pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let url = config.downstream.url.trim();
    if url.is_empty() {
        errors.push(ValidationError::MissingDownstreamUrl);
    } else {
        match Url::parse(url) {
            Ok(parsed) if !matches!(parsed.scheme(), "http" | "https") => {
                errors.push(ValidationError::UnsupportedScheme(parsed.scheme().to_string()));
            }
            Ok(_) => {}
            Err(e) => errors.push(ValidationError::InvalidDownstreamUrl {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    for (key, value) in [
        ("downstream.sign (X_SIGN)", &config.downstream.sign),
        ("downstream.cons (X_CONS)", &config.downstream.cons),
    ] {
        if HeaderValue::from_str(value).is_err() {
            errors.push(ValidationError::InvalidCredential(key));
        }
    }

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.server.bind_address.clone(),
        ));
    }

    if config.server.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
