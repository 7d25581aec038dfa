//! Basic variant: query-string prediction, no probes, no fault handler.
//!
//! The model is loaded before this router exists, so there is no readiness
//! state to track.

use axum::{extract::State, middleware, routing::get, Json, Router};
use tower_http::trace::TraceLayer;

use crate::http::error::AppError;
use crate::http::extract::ValidQuery;
use crate::http::middleware::process_time;
use crate::http::predict::PredictionResponse;
use crate::http::probes::welcome;
use crate::model::{predict_one, IrisFeatures, SharedModel};

/// `GET /predict?sepal_length=&sepal_width=&petal_length=&petal_width=`
async fn predict(
    State(model): State<SharedModel>,
    ValidQuery(input): ValidQuery<IrisFeatures>,
) -> Result<Json<PredictionResponse>, AppError> {
    let prediction =
        predict_one(&*model, &input).map_err(|e| AppError::Internal(e.to_string()))?;
    tracing::debug!(prediction = %prediction, "Prediction served");
    Ok(Json(PredictionResponse { prediction }))
}

pub fn router(model: SharedModel) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/predict", get(predict))
        .with_state(model)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(process_time))
}
