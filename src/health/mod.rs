//! Health subsystem.
//!
//! # Data Flow
//! ```text
//! Startup loader (lifecycle/startup.rs):
//!     begin_loading → load artifact → install_model | mark_failed
//!
//! Probes (http/probes.rs):
//!     /live_check  → is_alive
//!     /ready_check → is_ready
//! ```
//!
//! # Design Decisions
//! - Liveness and readiness are separate signals
//! - Readiness gates traffic until the model is in memory
//! - State lives in atomics; no locks on the request path

pub mod state;

pub use state::{Phase, ServiceState};
