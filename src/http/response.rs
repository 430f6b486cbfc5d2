//! Mapping of pipeline failures to caller-visible responses.
//!
//! # Design Decisions
//! - Malformed input and validation failures are 400 with a JSON body
//! - Forwarding failures are 500 with a plain-text body
//! - Downstream's own error body is never relayed to the caller

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::bridging::BridgingError;
use crate::order::FieldViolation;

/// Prefix for forwarding-failure messages.
pub const FORWARDING_FAILURE_PREFIX: &str = "Error sending data to LIS bridging";

/// A request that left the pipeline early.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Body is not JSON, or a declared field has the wrong type.
    #[error("Invalid request payload: {0}")]
    Malformed(#[source] serde_json::Error),

    /// Well-formed body that breaks required-field rules.
    #[error("Validation failed: {}", summarize(.0))]
    Invalid(Vec<FieldViolation>),

    /// The downstream call did not complete successfully.
    #[error("Error sending data to LIS bridging: {0}")]
    Forwarding(#[source] BridgingError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Malformed(_) | RelayError::Invalid(_) => StatusCode::BAD_REQUEST,
            RelayError::Forwarding(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// JSON body for client errors.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<&'a [FieldViolation]>,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            RelayError::Malformed(_) => (
                status,
                Json(ErrorBody {
                    error: "invalid_payload",
                    message: self.to_string(),
                    violations: None,
                }),
            )
                .into_response(),
            RelayError::Invalid(violations) => (
                status,
                Json(ErrorBody {
                    error: "validation_failed",
                    message: self.to_string(),
                    violations: Some(violations.as_slice()),
                }),
            )
                .into_response(),
            RelayError::Forwarding(e) => (
                status,
                format!("{}: {}", FORWARDING_FAILURE_PREFIX, e.public_message()),
            )
                .into_response(),
        }
    }
}
