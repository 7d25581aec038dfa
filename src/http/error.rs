//! Client-facing errors.
//!
//! Only fixed strings reach the client. Anything carrying internal detail
//! is logged server-side before it gets here.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub const PREDICTION_FAILED: &str = "Prediction failed";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request did not match the input schema.
    #[error("{0}")]
    Validation(String),

    /// Inference failed; already logged by the handler.
    #[error("Prediction failed")]
    PredictionFailed,

    /// Anything else. The message is handed to the fault handler for
    /// logging and is never serialized.
    #[error("{0}")]
    Internal(String),
}

/// Marker left on a 500 response so the fault handler can log the cause
/// and attach a trace id.
#[derive(Debug, Clone)]
pub struct UnhandledFault(pub String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": detail })),
            )
                .into_response(),
            AppError::PredictionFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": PREDICTION_FAILED })),
            )
                .into_response(),
            AppError::Internal(message) => {
                let mut response = (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": INTERNAL_SERVER_ERROR })),
                )
                    .into_response();
                response.extensions_mut().insert(UnhandledFault(message));
                response
            }
        }
    }
}
