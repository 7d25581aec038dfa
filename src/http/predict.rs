use std::time::Instant;

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::http::error::AppError;
use crate::http::extract::ValidJson;
use crate::http::middleware::timing::round_ms;
use crate::http::server::AppState;
use crate::model::{predict_one, IrisFeatures, Label, ModelError};
use crate::observability::{metrics, TraceId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: Label,
}

/// `POST /predict`
///
/// Runs inference inside a `model_inference` span. Failures are logged in
/// full and reported to the client as `Prediction failed` only.
pub async fn predict(
    State(state): State<AppState>,
    trace_id: Option<Extension<TraceId>>,
    ValidJson(input): ValidJson<IrisFeatures>,
) -> Result<Json<PredictionResponse>, AppError> {
    let span = tracing::info_span!("model_inference", trace_id = tracing::field::Empty);
    let trace_id = match trace_id {
        Some(Extension(id)) => id,
        None => TraceId::for_span(&span),
    };
    span.record("trace_id", trace_id.as_str());

    span.in_scope(|| {
        let start = Instant::now();
        let result = state
            .service
            .model()
            .ok_or(ModelError::NotLoaded)
            .and_then(|model| predict_one(&**model, &input));
        let latency_ms = round_ms(start.elapsed());

        match result {
            Ok(label) => {
                let response = PredictionResponse { prediction: label };
                tracing::info!(
                    event = "prediction",
                    trace_id = %trace_id,
                    input = %serde_json::to_string(&input).unwrap_or_default(),
                    result = %serde_json::to_string(&response).unwrap_or_default(),
                    latency_ms,
                    status = "success",
                    "Prediction served"
                );
                metrics::record_prediction(&response.prediction.to_string());
                Ok(Json(response))
            }
            Err(e) => {
                tracing::error!(
                    event = "prediction_error",
                    trace_id = %trace_id,
                    error = %e,
                    "Prediction failed"
                );
                metrics::record_prediction_error();
                Err(AppError::PredictionFailed)
            }
        }
    })
}
