//! Structured logging and span export setup.
//!
//! One subscriber carries three layers:
//! - `EnvFilter` (`RUST_LOG`, else `observability.log_level`)
//! - `fmt` output, one JSON object per event or pretty text
//! - `tracing-opentelemetry`, so spans carry W3C trace ids and are exported
//!   over OTLP when a collector endpoint is configured

use opentelemetry::trace::{TraceError, TracerProvider as _};
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::{runtime, trace as sdktrace, Resource};
use tracing::Subscriber;
use tracing_subscriber::fmt::format::{Format, Json, JsonFields};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{LogFormat, ObservabilityConfig};

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("failed to build span exporter: {0}")]
    Exporter(#[from] TraceError),

    #[error("failed to install subscriber: {0}")]
    Install(#[from] TryInitError),
}

/// Flushes and stops span export when the process winds down.
#[must_use = "dropping the guard without calling shutdown loses buffered spans"]
pub struct TelemetryGuard {
    exporting: bool,
}

impl TelemetryGuard {
    pub fn shutdown(self) {
        if self.exporting {
            tracing::info!("Flushing span exporter");
        }
        global::shutdown_tracer_provider();
    }
}

/// Install the global subscriber and tracer provider.
pub fn init_telemetry(config: &ObservabilityConfig) -> Result<TelemetryGuard, TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!(
            "{},tower_http=info,iris_serve={}",
            config.log_level, config.log_level
        ))?,
    };

    global::set_text_map_propagator(TraceContextPropagator::new());
    let provider = build_tracer_provider(config)?;
    let tracer = provider.tracer(config.service_name.clone());
    global::set_tracer_provider(provider);

    let fmt_layer = match config.log_format {
        LogFormat::Json => json_layer(std::io::stdout).boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(
        service = %config.service_name,
        otlp_endpoint = config.otlp_endpoint.as_deref().unwrap_or("none"),
        "Telemetry initialized"
    );

    Ok(TelemetryGuard {
        exporting: config.otlp_endpoint.is_some(),
    })
}

/// One flat JSON object per event: `timestamp`, `level`, `target`, `message`
/// and the event's own fields at the top level.
fn json_layer<S, W>(writer: W) -> tracing_subscriber::fmt::Layer<S, JsonFields, Format<Json>, W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + 'static,
{
    tracing_subscriber::fmt::layer()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_target(true)
        .with_writer(writer)
}

/// Without an endpoint the provider still mints trace and span ids, it just
/// has nowhere to send them.
fn build_tracer_provider(
    config: &ObservabilityConfig,
) -> Result<sdktrace::TracerProvider, TraceError> {
    let resource = Resource::new(vec![KeyValue::new(
        "service.name",
        config.service_name.clone(),
    )]);

    match &config.otlp_endpoint {
        Some(endpoint) => opentelemetry_otlp::new_pipeline()
            .tracing()
            .with_exporter(
                opentelemetry_otlp::new_exporter()
                    .tonic()
                    .with_endpoint(endpoint.clone()),
            )
            .with_trace_config(sdktrace::Config::default().with_resource(resource))
            .install_batch(runtime::Tokio),
        None => Ok(sdktrace::TracerProvider::builder()
            .with_config(sdktrace::Config::default().with_resource(resource))
            .build()),
    }
}

#[cfg(test)]
pub(crate) use self::capture::CapturedTelemetry;
