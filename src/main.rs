//! SIMRS → LIS order bridging relay.
//!
//! # Architecture Overview
//!
//! ```text
//!   Hospital system                 LIS BRIDGE                        Laboratory system
//!   ───────────────     ┌──────────────────────────────────────┐     ─────────────────
//!   POST saveOrder ────▶│ decode → validate → transform → send │────▶ POST <LIS_BRIDGING>
//!                       │   │400      │400              │500   │
//!   response       ◀────│ responder ◀──────────────────────────│◀──── 200/201 JSON
//!                       │                                      │
//!                       │ config · logging · lifecycle         │
//!                       └──────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use lis_bridge::http::HttpServer;
use lis_bridge::lifecycle::{signals, startup, Shutdown, StartupOptions};

#[derive(Parser)]
#[command(name = "lis-bridge")]
#[command(about = "Relay hospital lab orders to the LIS bridging endpoint", long_about = None)]
struct Cli {
    /// Optional TOML configuration file; environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Env file to load; defaults to `.env` in the working directory if present.
    #[arg(long)]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let options = StartupOptions {
        config_path: cli.config,
        env_file: cli.env_file,
    };

    match run(options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Logging may not be initialized yet.
            eprintln!("lis-bridge: {}", e);
            tracing::error!(error = %e, "Fatal error");
            ExitCode::FAILURE
        }
    }
}

async fn run(options: StartupOptions) -> Result<(), Box<dyn std::error::Error>> {
    let config = startup::prepare(&options)?;

    tracing::info!("lis-bridge v{} starting", env!("CARGO_PKG_VERSION"));

    let listener = startup::bind(&config).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
