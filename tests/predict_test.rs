//! End-to-end prediction over real sockets, both server variants.

use std::sync::Arc;

use iris_serve::ServiceState;
use reqwest::StatusCode;
use serde_json::{json, Value};

mod common;

fn process_time(res: &reqwest::Response) -> f64 {
    res.headers()
        .get("x-process-time-ms")
        .expect("missing X-Process-Time-ms")
        .to_str()
        .unwrap()
        .parse()
        .expect("X-Process-Time-ms is not numeric")
}

#[tokio::test]
async fn test_hardened_predicts_canonical_samples() {
    let service = Arc::new(ServiceState::with_model(common::bundled_model()));
    let (url, shutdown) = common::start_server(common::test_config("model.json", 0), service).await;
    let client = common::http_client();

    let cases = [
        (json!({"sepal_length":5.1,"sepal_width":3.5,"petal_length":1.4,"petal_width":0.2}), "setosa"),
        (json!({"sepal_length":5.9,"sepal_width":3.0,"petal_length":4.2,"petal_width":1.5}), "versicolor"),
        (json!({"sepal_length":7.7,"sepal_width":2.6,"petal_length":6.9,"petal_width":2.3}), "virginica"),
    ];

    for (input, expected) in cases {
        let res = client
            .post(format!("{}/predict", url))
            .json(&input)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(process_time(&res) >= 0.0);

        let body: Value = res.json().await.unwrap();
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), 1, "only the prediction key is returned");
        assert_eq!(object["prediction"], expected);
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_every_response_is_timed() {
    let service = Arc::new(ServiceState::new());
    let (url, shutdown) = common::start_server(common::test_config("model.json", 0), service).await;
    let client = common::http_client();

    let responses = vec![
        client.get(format!("{}/", url)).send().await.unwrap(),
        client.get(format!("{}/live_check", url)).send().await.unwrap(),
        client.get(format!("{}/ready_check", url)).send().await.unwrap(),
        client.get(format!("{}/missing", url)).send().await.unwrap(),
        client
            .post(format!("{}/predict", url))
            .json(&json!({"sepal_length": 1.0}))
            .send()
            .await
            .unwrap(),
        client
            .post(format!("{}/predict", url))
            .json(&common::SETOSA)
            .send()
            .await
            .unwrap(),
    ];

    let statuses: Vec<u16> = responses.iter().map(|r| r.status().as_u16()).collect();
    assert_eq!(statuses, vec![200, 200, 503, 404, 422, 500]);
    for res in &responses {
        assert!(process_time(res) >= 0.0);
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_welcome_message() {
    let service = Arc::new(ServiceState::new());
    let (url, shutdown) = common::start_server(common::test_config("model.json", 0), service).await;

    let body: Value = common::http_client()
        .get(format!("{}/", url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"message": "Welcome to the Iris Prediction API!"}));

    shutdown.trigger();
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let service = Arc::new(ServiceState::with_model(common::bundled_model()));
    let (url, shutdown) = common::start_server(common::test_config("model.json", 0), service).await;
    let client = common::http_client();

    let res = client
        .get(format!("{}/live_check", url))
        .header("x-request-id", "req-123")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "req-123");

    let res = client.get(format!("{}/live_check", url)).send().await.unwrap();
    assert!(!res.headers()["x-request-id"].is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_schema_violation_is_422() {
    let service = Arc::new(ServiceState::with_model(common::bundled_model()));
    let (url, shutdown) = common::start_server(common::test_config("model.json", 0), service).await;

    let res = common::http_client()
        .post(format!("{}/predict", url))
        .json(&json!({"sepal_length":5.1,"sepal_width":3.5,"petal_length":"long","petal_width":0.2}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await.unwrap();
    assert!(body["detail"].is_string());

    shutdown.trigger();
}

#[tokio::test]
async fn test_basic_variant_query_prediction() {
    let url = common::start_basic_server(common::bundled_model()).await;
    let client = iris_sdk::IrisClient::new(&url);

    let prediction = client.predict_query(&common::SETOSA).await.unwrap();
    assert_eq!(prediction.prediction, "setosa");

    let res = common::http_client()
        .get(format!("{}/predict?sepal_length=5.1", url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(process_time(&res) >= 0.0);

    // The basic variant has no probes.
    let res = common::http_client()
        .get(format!("{}/ready_check", url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_basic_variant_model_error_is_plain_500() {
    let url = common::start_basic_server(common::ErroringModel::shared()).await;

    let res = common::http_client()
        .get(format!(
            "{}/predict?sepal_length=5.1&sepal_width=3.5&petal_length=1.4&petal_width=0.2",
            url
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(process_time(&res) >= 0.0);
    assert_eq!(res.text().await.unwrap(), r#"{"detail":"Internal Server Error"}"#);

    let err = iris_sdk::IrisClient::new(&url)
        .predict_query(&common::SETOSA)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    let body = err.error_body().expect("JSON error body");
    assert_eq!(body.detail, "Internal Server Error");
    assert!(body.trace_id.is_none());
}

#[tokio::test]
async fn test_basic_variant_panic_drops_only_that_request() {
    let url = common::start_basic_server(common::PanickingModel::shared()).await;
    let client = common::http_client();

    // No fault handler: the connection is torn down without a response.
    let res = client
        .get(format!(
            "{}/predict?sepal_length=5.1&sepal_width=3.5&petal_length=1.4&petal_width=0.2",
            url
        ))
        .send()
        .await;
    assert!(res.is_err(), "a panicking handler must not produce a response");

    let res = client.get(format!("{}/", url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
