//! Concurrent load against one shared model.

use std::sync::Arc;
use std::time::Instant;

use iris_serve::ServiceState;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_concurrent_predictions() {
    let service = Arc::new(ServiceState::with_model(common::bundled_model()));
    let (url, shutdown) = common::start_server(common::test_config("model.json", 0), service).await;

    let concurrency = 20;
    let requests_per_task = 25;
    let total_requests = concurrency * requests_per_task;

    let client = reqwest::Client::new();
    let start = Instant::now();

    let mut handles = Vec::with_capacity(concurrency);
    for task in 0..concurrency {
        let client = client.clone();
        let url = url.clone();
        handles.push(tokio::spawn(async move {
            let mut ok = 0;
            for i in 0..requests_per_task {
                // Alternate between a setosa and a virginica sample.
                let (input, expected) = if (task + i) % 2 == 0 {
                    (json!({"sepal_length":5.1,"sepal_width":3.5,"petal_length":1.4,"petal_width":0.2}), "setosa")
                } else {
                    (json!({"sepal_length":6.3,"sepal_width":3.3,"petal_length":6.0,"petal_width":2.5}), "virginica")
                };
                let res = client
                    .post(format!("{}/predict", url))
                    .json(&input)
                    .send()
                    .await;
                if let Ok(res) = res {
                    if res.status().is_success() {
                        let body: Value = res.json().await.unwrap();
                        if body["prediction"] == expected {
                            ok += 1;
                        }
                    }
                }
            }
            ok
        }));
    }

    let mut successes = 0;
    for handle in handles {
        successes += handle.await.unwrap();
    }
    let elapsed = start.elapsed();

    println!(
        "{} requests in {:?} ({:.0} req/s)",
        total_requests,
        elapsed,
        total_requests as f64 / elapsed.as_secs_f64()
    );
    assert_eq!(successes, total_requests);

    shutdown.trigger();
}
