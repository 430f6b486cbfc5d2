//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, credential headers)
//!     → handlers.rs (decode → validate → transform → forward)
//!     → response.rs (success body or classified error)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::RelayError;
pub use server::{AppState, HttpServer, SAVE_ORDER_PATH};
