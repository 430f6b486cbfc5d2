//! Order schemas and the pure stages of the relay pipeline.
//!
//! # Data Flow
//! ```text
//! raw request body
//!     → source.rs (decode into SourceOrderRequest)
//!     → validation.rs (collect every FieldViolation)
//!     → transform.rs (derive classification, cito, icd10)
//!     → DownstreamOrderRequest (downstream.rs)
//!     → handed to the bridging client
//! ```
//!
//! # Design Decisions
//! - Every stage here is a pure function; no I/O, no shared state
//! - Optional fields are `Option<String>` so absent, `""` and a value stay distinct
//! - Required fields are also decoded as `Option` so a missing one becomes a
//!   validation violation rather than a decode failure

pub mod downstream;
pub mod source;
pub mod transform;
pub mod validation;

pub use downstream::DownstreamOrderRequest;
pub use source::{decode, Icd10, OrderItem, ReferralDetail, SourceOrderRequest};
pub use transform::transform;
pub use validation::{validate, FieldViolation, ViolationRule};
