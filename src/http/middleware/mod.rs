//! Cross-cutting request middleware.
//!
//! Layer order, outermost first:
//! ```text
//! timing → tower-http trace → request id → trace context → fault handler → timeout → body limit → routes
//! ```

pub mod fault;
pub mod timing;

pub use fault::catch_faults;
pub use timing::{process_time, X_PROCESS_TIME_MS};
