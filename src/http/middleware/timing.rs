//! Per-request latency stamping.

use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Request},
    http::{Extensions, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::observability::metrics;

pub const X_PROCESS_TIME_MS: HeaderName = HeaderName::from_static("x-process-time-ms");

/// Milliseconds rounded to two decimals.
pub fn round_ms(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100_000.0).round() / 100.0
}

/// Route template for metric labels; unrouted requests share one label so
/// arbitrary paths cannot grow the series count.
pub fn route_label(extensions: &Extensions) -> String {
    extensions
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned())
}

/// Middleware: attach `X-Process-Time-ms` to every response.
pub async fn process_time(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = route_label(request.extensions());

    let mut response = next.run(request).await;

    let elapsed = start.elapsed();
    if let Ok(value) = HeaderValue::from_str(&round_ms(elapsed).to_string()) {
        response.headers_mut().insert(X_PROCESS_TIME_MS, value);
    }
    metrics::record_request(&route, response.status().as_u16(), elapsed);

    response
}
