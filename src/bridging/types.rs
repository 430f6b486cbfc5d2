//! Credential and error types for the bridging client.

use reqwest::header::{HeaderValue, InvalidHeaderValue};
use thiserror::Error;

/// Header carrying the request signature.
pub const X_SIGN: &str = "x-sign";

/// Header carrying the consumer id.
pub const X_CONS: &str = "x-cons";

/// Where a credential value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Header,
    Config,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::Header => write!(f, "header"),
            CredentialSource::Config => write!(f, "config"),
        }
    }
}

/// The two opaque values authenticating one forwarded call.
///
/// Values are kept as raw header bytes so a caller's credential is forwarded
/// unchanged even when it is not valid UTF-8.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub sign: HeaderValue,
    pub consumer: HeaderValue,
}

impl Credentials {
    /// Build credentials from text values.
    ///
    /// Fails when either value contains bytes not allowed in a header.
    pub fn new(sign: &str, consumer: &str) -> Result<Self, InvalidHeaderValue> {
        Ok(Self {
            sign: HeaderValue::from_str(sign)?,
            consumer: HeaderValue::from_str(consumer)?,
        })
    }

    /// Resolve per-request credentials.
    ///
    /// Each value falls back to `defaults` independently when the caller's
    /// value is absent or empty. Returns the sources used for sign and consumer.
    pub fn resolve(
        sign: Option<&HeaderValue>,
        consumer: Option<&HeaderValue>,
        defaults: &Credentials,
    ) -> (Self, CredentialSource, CredentialSource) {
        let (sign, sign_source) = pick(sign, &defaults.sign);
        let (consumer, consumer_source) = pick(consumer, &defaults.consumer);
        (Self { sign, consumer }, sign_source, consumer_source)
    }
}

fn pick(value: Option<&HeaderValue>, fallback: &HeaderValue) -> (HeaderValue, CredentialSource) {
    match value {
        Some(v) if !v.is_empty() => (v.clone(), CredentialSource::Header),
        _ => (fallback.clone(), CredentialSource::Config),
    }
}

// Credential values stay out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("sign", &"<redacted>")
            .field("consumer", &"<redacted>")
            .finish()
    }
}

/// Errors that can occur while forwarding an order downstream.
#[derive(Debug, Error)]
pub enum BridgingError {
    /// Configured downstream URL could not be parsed.
    #[error("invalid downstream URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Configured default credential is not a valid header value.
    #[error("invalid default credential: {0}")]
    InvalidCredential(#[source] InvalidHeaderValue),

    /// Outbound payload could not be serialized.
    #[error("failed to encode downstream payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// Connection, TLS, or timeout failure talking to downstream.
    #[error("downstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Downstream answered with a status other than 200 or 201.
    #[error("downstream responded with status {status}")]
    Status { status: u16 },

    /// Downstream body was not a JSON object.
    #[error("failed to decode downstream response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl BridgingError {
    /// Short failure class for logs and caller-facing messages.
    pub fn kind(&self) -> &'static str {
        match self {
            BridgingError::InvalidUrl { .. } => "invalid_url",
            BridgingError::Build(_) => "client_build",
            BridgingError::InvalidCredential(_) => "invalid_credential",
            BridgingError::Encode(_) => "encode",
            BridgingError::Transport(_) => "transport",
            BridgingError::Status { .. } => "status",
            BridgingError::Decode(_) => "decode",
        }
    }

    /// Message safe to return to the original caller.
    ///
    /// Never includes downstream's body, its URL, or transport internals.
    pub fn public_message(&self) -> String {
        match self {
            BridgingError::Status { status } => {
                format!("downstream responded with status {}", status)
            }
            BridgingError::Transport(_) => "downstream system is unreachable".to_string(),
            BridgingError::Decode(_) => "downstream response was not a JSON object".to_string(),
            BridgingError::Encode(_) => "order could not be encoded".to_string(),
            BridgingError::InvalidUrl { .. }
            | BridgingError::Build(_)
            | BridgingError::InvalidCredential(_) => {
                "bridging client is misconfigured".to_string()
            }
        }
    }
}

/// Result type for bridging operations.
pub type BridgingResult<T> = Result<T, BridgingError>;
