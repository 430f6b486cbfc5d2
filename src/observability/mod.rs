//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields (request_id, status, payload)
//!     → logging.rs (EnvFilter + fmt layer, pretty or JSON)
//!
//! Consumers:
//!     → stdout, collected by the host's log pipeline
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Request ID flows through every pipeline log line
//! - Credential values are never logged, only their source

pub mod logging;
