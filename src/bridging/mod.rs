//! Forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! DownstreamOrderRequest + Credentials
//!     → client.rs (serialize, POST with x-sign / x-cons)
//!     → downstream laboratory system
//!     → client.rs (status check, JSON object decode)
//!     → DownstreamResponse | BridgingError
//! ```

pub mod client;
pub mod types;

pub use client::{BridgingClient, DownstreamResponse};
pub use types::{BridgingError, BridgingResult, CredentialSource, Credentials, X_CONS, X_SIGN};
