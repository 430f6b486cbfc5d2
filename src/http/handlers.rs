//! Route handlers.
//!
//! `save_order` runs one order through the whole pipeline:
//!
//! ```text
//! RECEIVED → DECODED → VALIDATED → TRANSFORMED → FORWARDED → RESPONDED
//!     │          │                        │
//!     └─ 400     └─ 400                   └─ 500
//! ```

use axum::{body::Bytes, extract::State, http::HeaderMap, Json};

use crate::bridging::DownstreamResponse;
use crate::http::request;
use crate::http::response::RelayError;
use crate::http::server::AppState;
use crate::order;

/// Liveness probe.
pub async fn root() -> &'static str {
    "Hello World!"
}

/// `POST /api/v1/saveOrder`
pub async fn save_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<DownstreamResponse>, RelayError> {
    let request_id = request::request_id(&headers);

    tracing::info!(
        request_id = %request_id,
        body = %String::from_utf8_lossy(&body),
        "Received order request"
    );

    let source = order::decode(&body).map_err(|e| {
        tracing::warn!(request_id = %request_id, error = %e, "Invalid request payload");
        RelayError::Malformed(e)
    })?;

    if let Err(violations) = order::validate(&source) {
        tracing::warn!(
            request_id = %request_id,
            violations = ?violations,
            "Order failed validation"
        );
        return Err(RelayError::Invalid(violations));
    }

    let downstream = order::transform(&source);
    tracing::debug!(
        request_id = %request_id,
        no_order = ?downstream.order_number,
        patient_type = %downstream.patient_type_id,
        cito = downstream.cito,
        "Order transformed"
    );

    let (credentials, sign_source, cons_source) =
        request::credentials(&headers, &state.default_credentials);

    let response = state
        .client
        .send_order(&downstream, &credentials, &request_id)
        .await
        .map_err(|e| {
            tracing::error!(
                request_id = %request_id,
                kind = e.kind(),
                error = %e,
                x_sign_source = %sign_source,
                x_cons_source = %cons_source,
                "Error sending data to LIS bridging"
            );
            RelayError::Forwarding(e)
        })?;

    tracing::info!(request_id = %request_id, "Order relayed");
    Ok(Json(response))
}
