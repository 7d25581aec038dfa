//! Iris Prediction API (basic)
//!
//! Loads the model before binding; any load failure exits the process
//! without starting a server.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tokio::net::TcpListener;

use iris_serve::cli::ServerArgs;
use iris_serve::http::basic;
use iris_serve::lifecycle::Shutdown;
use iris_serve::model::load_model;
use iris_serve::observability::init_telemetry;

#[derive(Parser)]
#[command(name = "iris-basic")]
#[command(about = "Minimal Iris prediction API (GET /predict)", long_about = None)]
struct Cli {
    #[command(flatten)]
    server: ServerArgs,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "iris-basic terminated");
            eprintln!("iris-basic: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.server.resolve()?;
    let telemetry = init_telemetry(&config.observability)?;

    let model = load_model(Path::new(&config.model.path))?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "iris-basic listening");

    let shutdown = Shutdown::new();
    shutdown.listen_for_signals();
    let mut stop = shutdown.subscribe();

    axum::serve(listener, basic::router(model))
        .with_graceful_shutdown(async move {
            let _ = stop.recv().await;
        })
        .await?;

    telemetry.shutdown();
    Ok(())
}
