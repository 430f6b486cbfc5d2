//! HTTP client forwarding transformed orders to the laboratory system.
//!
//! # Responsibilities
//! - Serialize the downstream order and POST it to the configured URL
//! - Attach the per-request credential headers
//! - Log payload, status, and body before returning on every path
//! - Classify failures (transport, status, decode)
//!
//! # Design Decisions
//! - One attempt per order; no retry, no circuit breaking
//! - Transport timeout is left at reqwest's default (none)

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::{Map, Value};
use url::Url;

use crate::bridging::types::{BridgingError, BridgingResult, Credentials, X_CONS, X_SIGN};
use crate::config::DownstreamConfig;
use crate::order::DownstreamOrderRequest;

/// Decoded downstream response body.
pub type DownstreamResponse = Map<String, Value>;

/// Client for the downstream bridging endpoint.
#[derive(Clone)]
pub struct BridgingClient {
    client: Client,
    url: Url,
}

impl BridgingClient {
    /// Create a client posting to `url`.
    pub fn new(url: Url) -> BridgingResult<Self> {
        let client = Client::builder().build().map_err(BridgingError::Build)?;
        Ok(Self { client, url })
    }

    /// Create a client from the downstream section of the configuration.
    pub fn from_config(config: &DownstreamConfig) -> BridgingResult<Self> {
        let url = Url::parse(&config.url).map_err(|source| BridgingError::InvalidUrl {
            url: config.url.clone(),
            source,
        })?;
        Self::new(url)
    }

    /// Forward one order.
    ///
    /// Succeeds only when downstream answers 200 or 201 with a JSON object body.
    pub async fn send_order(
        &self,
        order: &DownstreamOrderRequest,
        credentials: &Credentials,
        request_id: &str,
    ) -> BridgingResult<DownstreamResponse> {
        let payload = serde_json::to_vec(order).map_err(BridgingError::Encode)?;

        tracing::info!(
            request_id = %request_id,
            url = %self.url,
            payload = %String::from_utf8_lossy(&payload),
            "Sending order to LIS bridging"
        );

        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(X_SIGN, credentials.sign.clone())
            .header(X_CONS, credentials.consumer.clone())
            .body(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(request_id = %request_id, error = %e, "LIS bridging unreachable");
                BridgingError::Transport(e)
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            tracing::error!(
                request_id = %request_id,
                status = status.as_u16(),
                error = %e,
                "Failed to read LIS bridging response body"
            );
            BridgingError::Transport(e)
        })?;

        tracing::info!(
            request_id = %request_id,
            status = status.as_u16(),
            body = %String::from_utf8_lossy(&body),
            "Response from LIS bridging"
        );

        if !is_accepted(status.as_u16()) {
            tracing::error!(
                request_id = %request_id,
                status = status.as_u16(),
                "LIS bridging rejected order"
            );
            return Err(BridgingError::Status {
                status: status.as_u16(),
            });
        }

        serde_json::from_slice::<DownstreamResponse>(&body).map_err(|e| {
            tracing::error!(
                request_id = %request_id,
                status = status.as_u16(),
                error = %e,
                "LIS bridging response is not a JSON object"
            );
            BridgingError::Decode(e)
        })
    }

    /// The downstream endpoint.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

fn is_accepted(status: u16) -> bool {
    matches!(status, 200 | 201)
}

impl std::fmt::Debug for BridgingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgingClient")
            .field("url", &self.url.as_str())
            .finish()
    }
}
