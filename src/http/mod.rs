//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → middleware/ (latency header, trace context, fault handler)
//!     → extract.rs (schema validation, 422 on mismatch)
//!     → predict.rs / probes.rs (handlers)
//!     → error.rs (fixed client-facing error bodies)
//!
//! basic.rs is the stripped-down router used by `iris-basic`.
//! ```

pub mod basic;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod predict;
pub mod probes;
pub mod server;

pub use error::AppError;
pub use middleware::X_PROCESS_TIME_MS;
pub use predict::PredictionResponse;
pub use server::{AppState, HttpServer};
