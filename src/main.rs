//! Iris Prediction API (hardened)
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌──────────────────────────────────────────────────────────┐
//!                   │                      iris-serve                          │
//!                   │                                                          │
//!   Client Request  │  ┌────────┐   ┌────────┐   ┌─────────┐   ┌───────────┐  │
//!   ────────────────┼─▶│ timing │──▶│ trace  │──▶│  fault  │──▶│  handler  │  │
//!                   │  │  (ms)  │   │  ctx   │   │ handler │   │ /predict  │  │
//!                   │  └────────┘   └────────┘   └─────────┘   └─────┬─────┘  │
//!                   │                                                │        │
//!                   │                               ┌────────────────▼──────┐ │
//!                   │                               │ ServiceState          │ │
//!                   │                               │  phase · alive · model│ │
//!                   │                               └────────────────▲──────┘ │
//!                   │                                                │        │
//!                   │  ┌──────────────────┐                ┌─────────┴──────┐ │
//!                   │  │ probes           │                │ startup loader │ │
//!                   │  │ live · ready     │                │ delay → load   │ │
//!                   │  └──────────────────┘                └────────────────┘ │
//!                   └──────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use iris_serve::cli::ServerArgs;
use iris_serve::lifecycle::spawn_model_loader;
use iris_serve::observability::{init_telemetry, metrics};
use iris_serve::{HttpServer, ServiceState, Shutdown};

#[derive(Parser)]
#[command(name = "iris-serve")]
#[command(about = "Iris prediction API with probes, tracing and structured logs", long_about = None)]
struct Cli {
    #[command(flatten)]
    server: ServerArgs,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.server.resolve()?;

    let telemetry = init_telemetry(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        model_path = %config.model.path,
        request_timeout_secs = config.timeouts.request_secs,
        "iris-serve starting"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let service = Arc::new(ServiceState::new());
    spawn_model_loader(service.clone(), config.model.clone());

    let shutdown = Shutdown::new();
    shutdown.listen_for_signals();

    let server = HttpServer::new(config, service);
    server.run(listener, shutdown.subscribe()).await?;

    telemetry.shutdown();
    Ok(())
}
