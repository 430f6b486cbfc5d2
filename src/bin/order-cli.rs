use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::Value;

use lis_bridge::bridging::{X_CONS, X_SIGN};
use lis_bridge::http::SAVE_ORDER_PATH;
use lis_bridge::order;

#[derive(Parser)]
#[command(name = "order-cli")]
#[command(about = "Check and submit lab orders against the LIS bridge", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8111")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an order file and print the payload sent downstream
    Check {
        file: PathBuf,
    },
    /// Submit an order file to the relay
    Submit {
        file: PathBuf,

        /// Value for the x-sign header
        #[arg(long)]
        sign: Option<String>,

        /// Value for the x-cons header
        #[arg(long)]
        cons: Option<String>,
    },
    /// Check that the relay is up
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Check { file } => check(&file),
        Commands::Submit { file, sign, cons } => {
            submit(&cli.url, &file, sign.as_deref(), cons.as_deref()).await
        }
        Commands::Health => health(&cli.url).await,
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn check(file: &Path) -> Result<bool, Box<dyn std::error::Error>> {
    let body = std::fs::read(file)?;
    let source = match order::decode(&body) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Invalid request payload: {}", e);
            return Ok(false);
        }
    };

    if let Err(violations) = order::validate(&source) {
        eprintln!("Order failed validation:");
        for v in violations {
            eprintln!("  - {}", v);
        }
        return Ok(false);
    }

    let downstream = order::transform(&source);
    println!("{}", serde_json::to_string_pretty(&downstream)?);
    Ok(true)
}

async fn submit(
    url: &str,
    file: &Path,
    sign: Option<&str>,
    cons: Option<&str>,
) -> Result<bool, Box<dyn std::error::Error>> {
    let body = std::fs::read(file)?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(sign) = sign {
        headers.insert(X_SIGN, HeaderValue::from_str(sign)?);
    }
    if let Some(cons) = cons {
        headers.insert(X_CONS, HeaderValue::from_str(cons)?);
    }

    let res = reqwest::Client::new()
        .post(format!("{}{}", url.trim_end_matches('/'), SAVE_ORDER_PATH))
        .headers(headers)
        .body(body)
        .send()
        .await?;
    print_response(res).await
}

async fn health(url: &str) -> Result<bool, Box<dyn std::error::Error>> {
    let res = reqwest::get(format!("{}/", url.trim_end_matches('/'))).await?;
    let status = res.status();
    println!("{} {}", status, res.text().await?);
    Ok(status.is_success())
}

async fn print_response(res: reqwest::Response) -> Result<bool, Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
        eprintln!("Response: {}", text);
        return Ok(false);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(true)
}
