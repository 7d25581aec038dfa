//! Startup orchestration.
//!
//! The hardened server binds its listener first and loads the model in the
//! background, so probes answer from the first moment. The basic server
//! calls [`load_model`](crate::model::load_model) directly and exits on
//! failure.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config::ModelConfig;
use crate::health::ServiceState;
use crate::model::{load_model, ModelError};
use crate::observability::metrics;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("model load already started")]
    AlreadyStarted,

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("model loader task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Wait the configured delay, load the artifact and mark the service ready.
///
/// On error the phase becomes Failed and stays there; there is no retry.
pub async fn load_into(service: &ServiceState, config: &ModelConfig) -> Result<(), StartupError> {
    if !service.begin_loading() {
        return Err(StartupError::AlreadyStarted);
    }
    metrics::set_model_ready(false);

    tokio::time::sleep(Duration::from_millis(config.load_delay_ms)).await;

    let path = PathBuf::from(&config.path);
    let loaded = tokio::task::spawn_blocking(move || load_model(&path)).await;

    match loaded {
        Ok(Ok(model)) => {
            service.install_model(model);
            metrics::set_model_ready(true);
            tracing::info!(path = %config.path, "Model ready");
            Ok(())
        }
        Ok(Err(e)) => {
            service.mark_failed();
            Err(e.into())
        }
        Err(e) => {
            service.mark_failed();
            Err(e.into())
        }
    }
}

/// Run [`load_into`] on a background task, logging the outcome.
pub fn spawn_model_loader(service: Arc<ServiceState>, config: ModelConfig) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!(
            path = %config.path,
            delay_ms = config.load_delay_ms,
            "Loading model"
        );
        if let Err(e) = load_into(&service, &config).await {
            tracing::error!(
                event = "model_load_failed",
                path = %config.path,
                error = %e,
                "Model load failed; service will never become ready"
            );
        }
    })
}
