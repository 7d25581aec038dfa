//! Request trace context.
//!
//! # Responsibilities
//! - Open one `http_request` span per request
//! - Continue an incoming W3C `traceparent` when present
//! - Hand the 32-hex trace id to handlers and the fault handler
//!
//! When no OpenTelemetry layer is installed (tests, or a filtered-out span)
//! the span has no valid trace id and a random one is minted instead, so a
//! trace id is always available.

use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};
use opentelemetry::propagation::Extractor;
use opentelemetry::trace::TraceContextExt;
use tracing::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// 128-bit trace id rendered as 32 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TraceId(String);

impl TraceId {
    /// Fresh random id.
    pub fn generate() -> Self {
        Self(format!("{:032x}", rand::random::<u128>()))
    }

    /// The OpenTelemetry trace id of `span`, if it has one.
    pub fn from_span(span: &tracing::Span) -> Option<Self> {
        let context = span.context();
        let id = context.span().span_context().trace_id();
        if id == opentelemetry::trace::TraceId::INVALID {
            None
        } else {
            Some(Self(format!("{:032x}", id)))
        }
    }

    /// Trace id of `span`, or a fresh one.
    pub fn for_span(span: &tracing::Span) -> Self {
        Self::from_span(span).unwrap_or_else(Self::generate)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

struct HeaderExtractor<'a>(&'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(|k| k.as_str()).collect()
    }
}

/// Middleware: wrap the request in a span and expose its [`TraceId`] as a
/// request extension.
pub async fn trace_requests(mut request: Request, next: Next) -> Response {
    let span = tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        trace_id = tracing::field::Empty,
    );

    let parent = opentelemetry::global::get_text_map_propagator(|propagator| {
        propagator.extract(&HeaderExtractor(request.headers()))
    });
    span.set_parent(parent);

    let trace_id = TraceId::for_span(&span);
    span.record("trace_id", trace_id.as_str());
    request.extensions_mut().insert(trace_id);

    next.run(request).instrument(span).await
}
