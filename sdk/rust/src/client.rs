use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

/// The four Iris measurements, in the order the model expects them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IrisInput {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

#[derive(Debug, Deserialize)]
pub struct PredictionResponse {
    pub prediction: serde_json::Value,
}

/// Error body returned by the service on failures.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
    #[serde(default)]
    pub trace_id: Option<String>,
}

#[derive(Debug)]
pub enum ClientError {
    Transport(reqwest::Error),
    Status { status: StatusCode, body: String },
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Transport(e) => write!(f, "transport error: {}", e),
            ClientError::Status { status, body } => {
                write!(f, "service returned status {}: {}", status, body)
            }
        }
    }
}

impl std::error::Error for ClientError {}

impl ClientError {
    /// The service's JSON error body, if it sent one.
    pub fn error_body(&self) -> Option<ErrorBody> {
        match self {
            ClientError::Status { body, .. } => serde_json::from_str(body).ok(),
            ClientError::Transport(_) => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e)
    }
}

pub struct IrisClient {
    client: Client,
    base_url: String,
}

impl IrisClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .pool_max_idle_per_host(0)
                .no_proxy()
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Submit a prediction to the hardened `POST /predict` endpoint.
    pub async fn predict(&self, input: &IrisInput) -> Result<PredictionResponse, ClientError> {
        let resp = self
            .client
            .post(format!("{}/predict", self.base_url))
            .json(input)
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Submit a prediction to the basic `GET /predict` endpoint.
    pub async fn predict_query(&self, input: &IrisInput) -> Result<PredictionResponse, ClientError> {
        let resp = self
            .client
            .get(format!("{}/predict", self.base_url))
            .query(input)
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub async fn live(&self) -> Result<Response, reqwest::Error> {
        self.client
            .get(format!("{}/live_check", self.base_url))
            .send()
            .await
    }

    pub async fn ready(&self) -> Result<Response, reqwest::Error> {
        self.client
            .get(format!("{}/ready_check", self.base_url))
            .send()
            .await
    }

    /// Poll `/ready_check` until it answers 200 or `attempts` runs out.
    pub async fn wait_ready(&self, attempts: u32, interval: std::time::Duration) -> bool {
        for _ in 0..attempts {
            if let Ok(resp) = self.ready().await {
                if resp.status() == StatusCode::OK {
                    return true;
                }
            }
            tokio::time::sleep(interval).await;
        }
        false
    }

    async fn decode(resp: Response) -> Result<PredictionResponse, ClientError> {
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(ClientError::Status { status, body: text });
        }

        serde_json::from_str::<PredictionResponse>(&text).map_err(|e| ClientError::Status {
            status,
            body: format!("undecodable body ({}): {}", e, text),
        })
    }
}
