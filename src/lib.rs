//! Iris prediction service library.
//!
//! Shared by the `iris-serve` (hardened) and `iris-basic` binaries.

pub mod cli;
pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod observability;

pub use config::ServiceConfig;
pub use health::ServiceState;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
