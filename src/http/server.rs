//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, body limit, request ID)
//! - Bind server to listener
//! - Serve until the shutdown broadcast fires

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::bridging::{BridgingClient, BridgingError, BridgingResult, Credentials};
use crate::config::BridgeConfig;
use crate::http::handlers::{root, save_order};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::shutdown;

/// Path accepting order placement requests.
pub const SAVE_ORDER_PATH: &str = "/api/v1/saveOrder";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: BridgingClient,
    pub default_credentials: Arc<Credentials>,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: BridgeConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: BridgeConfig) -> BridgingResult<Self> {
        let client = BridgingClient::from_config(&config.downstream)?;
        let default_credentials = config
            .downstream
            .default_credentials()
            .map_err(BridgingError::InvalidCredential)?;
        let state = AppState {
            client,
            default_credentials: Arc::new(default_credentials),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &BridgeConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(root))
            .route(SAVE_ORDER_PATH, post(save_order))
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.server.max_body_size))
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id_layer()),
            )
    }

    /// Run the server until `shutdown_rx` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            downstream_url = %self.config.downstream.url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }
}
