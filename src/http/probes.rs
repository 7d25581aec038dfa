//! Root and health probe handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::http::server::AppState;

pub const WELCOME: &str = "Welcome to the Iris Prediction API!";

#[derive(Debug, Serialize)]
pub struct Welcome {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ProbeStatus {
    pub status: &'static str,
}

pub async fn welcome() -> Json<Welcome> {
    Json(Welcome { message: WELCOME })
}

/// `GET /live_check`: 200 while alive, otherwise 500 with no body.
pub async fn live_check(State(state): State<AppState>) -> Response {
    if state.service.is_alive() {
        Json(ProbeStatus { status: "alive" }).into_response()
    } else {
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

/// `GET /ready_check`: 200 once the model is loaded, otherwise 503 with no body.
pub async fn ready_check(State(state): State<AppState>) -> Response {
    if state.service.is_ready() {
        Json(ProbeStatus { status: "ready" }).into_response()
    } else {
        tracing::debug!(phase = state.service.phase().as_str(), "Readiness probe: not ready");
        StatusCode::SERVICE_UNAVAILABLE.into_response()
    }
}
