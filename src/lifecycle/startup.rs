//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the env file and configuration
//! - Initialize logging
//! - Bind the listener
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last, after config and logging are ready

use std::path::PathBuf;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{load_config, load_env_file, BridgeConfig, ConfigError};
use crate::observability::logging;

/// Startup inputs, usually from the command line.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to initialize logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Load configuration and initialize logging.
pub fn prepare(options: &StartupOptions) -> Result<BridgeConfig, StartupError> {
    let env_file = load_env_file(options.env_file.as_deref())?;
    let config = load_config(options.config_path.as_deref(), |key| std::env::var(key).ok())?;

    logging::init(&config.observability)?;

    tracing::info!(
        bind_address = %config.server.bind_address,
        downstream_url = %config.downstream.url,
        env_file = ?env_file,
        config_file = ?options.config_path,
        "Configuration loaded"
    );
    if config.downstream.sign.is_empty() || config.downstream.cons.is_empty() {
        tracing::warn!("Default x-sign/x-cons not fully configured; callers must send both headers");
    }

    Ok(config)
}

/// Bind the inbound listener.
pub async fn bind(config: &BridgeConfig) -> Result<TcpListener, StartupError> {
    TcpListener::bind(&config.server.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.server.bind_address.clone(),
            source,
        })
}
