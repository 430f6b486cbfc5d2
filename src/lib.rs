//! SIMRS → LIS order bridging relay library.

pub mod bridging;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod order;

pub use bridging::{BridgingClient, Credentials};
pub use config::schema::BridgeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
