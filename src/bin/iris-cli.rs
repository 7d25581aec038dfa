use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "iris-cli")]
#[command(about = "Command-line client for the Iris Prediction API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    /// Use the basic server's `GET /predict` instead of `POST /predict`.
    #[arg(long)]
    basic: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the welcome message
    Welcome,
    /// Query the liveness probe
    Live,
    /// Query the readiness probe
    Ready,
    /// Classify one flower
    Predict {
        sepal_length: f64,
        sepal_width: f64,
        petal_length: f64,
        petal_width: f64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Welcome => client.get(format!("{}/", base)).send().await?,
        Commands::Live => client.get(format!("{}/live_check", base)).send().await?,
        Commands::Ready => client.get(format!("{}/ready_check", base)).send().await?,
        Commands::Predict {
            sepal_length,
            sepal_width,
            petal_length,
            petal_width,
        } => {
            let input = json!({
                "sepal_length": sepal_length,
                "sepal_width": sepal_width,
                "petal_length": petal_length,
                "petal_width": petal_width,
            });
            if cli.basic {
                client
                    .get(format!("{}/predict", base))
                    .query(&input)
                    .send()
                    .await?
            } else {
                client
                    .post(format!("{}/predict", base))
                    .json(&input)
                    .send()
                    .await?
            }
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let latency = res
        .headers()
        .get("x-process-time-ms")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if !text.is_empty() {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    if let Some(ms) = latency {
        eprintln!("({} ms server-side)", ms);
    }
    Ok(())
}
