//! Global fault handler.
//!
//! Two kinds of fault end up here: panics anywhere below this layer, and
//! responses built from [`AppError::Internal`](crate::http::error::AppError).
//! Both are logged with the request's trace id and path, and the client
//! receives the same opaque body.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use futures_util::FutureExt;
use serde::Serialize;

use crate::http::error::{UnhandledFault, INTERNAL_SERVER_ERROR};
use crate::observability::TraceId;

#[derive(Debug, Serialize)]
pub struct FaultBody {
    pub detail: &'static str,
    pub trace_id: String,
}

/// Middleware: convert unhandled faults into `500 {"detail", "trace_id"}`.
pub async fn catch_faults(request: Request, next: Next) -> Response {
    let trace_id = request
        .extensions()
        .get::<TraceId>()
        .cloned()
        .unwrap_or_else(TraceId::generate);
    let path = request.uri().to_string();

    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => match response.extensions().get::<UnhandledFault>() {
            Some(fault) => {
                let error = fault.0.clone();
                fault_response(&trace_id, &path, &error)
            }
            None => response,
        },
        Err(panic) => fault_response(&trace_id, &path, &panic_message(panic.as_ref())),
    }
}

fn fault_response(trace_id: &TraceId, path: &str, error: &str) -> Response {
    tracing::error!(
        event = "unhandled_exception",
        trace_id = %trace_id,
        path = %path,
        error = %error,
        "Unhandled exception"
    );

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(FaultBody {
            detail: INTERNAL_SERVER_ERROR,
            trace_id: trace_id.to_string(),
        }),
    )
        .into_response()
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
