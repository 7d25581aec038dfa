//! Shared utilities for integration and load testing.

use std::io::Write;
use std::sync::Arc;

use iris_serve::http::basic;
use iris_serve::model::{Classifier, Label, ModelArtifact, ModelError, SharedModel};
use iris_serve::{HttpServer, ServiceConfig, ServiceState, Shutdown};
use ndarray::Array2;
use tempfile::NamedTempFile;
use tokio::net::TcpListener;

pub const BUNDLED_MODEL: &str = include_str!("../../model.json");

#[allow(dead_code)]
pub const SETOSA: iris_sdk::IrisInput = iris_sdk::IrisInput {
    sepal_length: 5.1,
    sepal_width: 3.5,
    petal_length: 1.4,
    petal_width: 0.2,
};

/// Bundled model, already parsed.
#[allow(dead_code)]
pub fn bundled_model() -> SharedModel {
    ModelArtifact::from_json(BUNDLED_MODEL)
        .unwrap()
        .into_model()
        .unwrap()
}

/// Write an artifact to a temp file the server can load.
#[allow(dead_code)]
pub fn write_artifact(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

/// Config bound to an ephemeral port, loading `model_path` with `delay_ms`.
#[allow(dead_code)]
pub fn test_config(model_path: &str, delay_ms: u64) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.model.path = model_path.to_string();
    config.model.load_delay_ms = delay_ms;
    config
}

/// Start the hardened server on an ephemeral port. Returns its base URL.
#[allow(dead_code)]
pub async fn start_server(config: ServiceConfig, service: Arc<ServiceState>) -> (String, Shutdown) {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, service);
    let stop = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, stop).await;
    });

    (format!("http://{}", addr), shutdown)
}

/// Start the basic server on an ephemeral port. Returns its base URL.
#[allow(dead_code)]
pub async fn start_basic_server(model: SharedModel) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, basic::router(model)).await;
    });
    format!("http://{}", addr)
}

/// Plain client that does not reuse connections between tests.
#[allow(dead_code)]
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// A classifier whose inference panics, for exercising the fault handler.
#[allow(dead_code)]
#[derive(Debug)]
pub struct PanickingModel {
    classes: Vec<Label>,
}

impl PanickingModel {
    #[allow(dead_code)]
    pub fn shared() -> SharedModel {
        Arc::new(Self {
            classes: vec![Label::from("setosa")],
        })
    }
}

impl Classifier for PanickingModel {
    fn kind(&self) -> &'static str {
        "panicking"
    }

    fn n_features(&self) -> usize {
        4
    }

    fn classes(&self) -> &[Label] {
        &self.classes
    }

    fn predict(&self, _features: &Array2<f64>) -> Result<Vec<Label>, ModelError> {
        panic!("inference backend crashed: segment 0xdeadbeef")
    }
}

/// A classifier whose inference returns an error instead of a label.
#[allow(dead_code)]
#[derive(Debug)]
pub struct ErroringModel {
    classes: Vec<Label>,
}

impl ErroringModel {
    #[allow(dead_code)]
    pub fn shared() -> SharedModel {
        Arc::new(Self {
            classes: vec![Label::from("setosa")],
        })
    }
}

impl Classifier for ErroringModel {
    fn kind(&self) -> &'static str {
        "erroring"
    }

    fn n_features(&self) -> usize {
        4
    }

    fn classes(&self) -> &[Label] {
        &self.classes
    }

    fn predict(&self, _features: &Array2<f64>) -> Result<Vec<Label>, ModelError> {
        Err(ModelError::Empty)
    }
}
