//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured JSON events, subscriber + exporter setup)
//!     → metrics.rs (counters, gauges, histograms)
//!     → tracing.rs (request spans, trace ids)
//!
//! Consumers:
//!     → stdout (one JSON object per line)
//!     → OTLP collector (optional)
//!     → Prometheus scrape (optional)
//! ```

pub mod logging;
pub mod metrics;
pub mod tracing;

pub use self::logging::{init_telemetry, TelemetryError, TelemetryGuard};
pub use self::tracing::{trace_requests, TraceId};
