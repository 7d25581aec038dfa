//! Metrics collection and exposition.
//!
//! # Metrics
//! - `iris_requests_total` (counter): requests by route, status
//! - `iris_request_duration_seconds` (histogram): end-to-end latency by route
//! - `iris_predictions_total` (counter): successful predictions by label
//! - `iris_prediction_errors_total` (counter): failed predictions
//! - `iris_model_ready` (gauge): 1 once the model is loaded
//!
//! Without an installed recorder every call is a no-op.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Duration;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Prometheus metrics exporter started");
    Ok(())
}

pub fn record_request(path: &str, status: u16, elapsed: Duration) {
    counter!(
        "iris_requests_total",
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("iris_request_duration_seconds", "path" => path.to_string())
        .record(elapsed.as_secs_f64());
}

pub fn record_prediction(label: &str) {
    counter!("iris_predictions_total", "label" => label.to_string()).increment(1);
}

pub fn record_prediction_error() {
    counter!("iris_prediction_errors_total").increment(1);
}

pub fn set_model_ready(ready: bool) {
    gauge!("iris_model_ready").set(if ready { 1.0 } else { 0.0 });
}
