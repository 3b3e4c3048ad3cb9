//! Subscriber setup: OTLP span export plus a plain-text log file.

use super::file_writer::{FileWriter, LogWriter};
use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use std::path::Path;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and scope name attached to exported spans.
const SERVICE_NAME: &str = "flashfind";

/// Installs the global tracing subscriber writing under the data directory.
///
/// The subscriber combines:
/// 1. An `EnvFilter` from `RUST_LOG`, else `config.trace_level`, else `"info"`
/// 2. An OpenTelemetry layer exporting spans to `flashfind-otlp.json`
/// 3. A `fmt` layer writing log lines to `flashfind.log`
///
/// Both files rotate at 10 MB keeping 3 backups. Nothing is written to the
/// terminal, which belongs to the UI.
///
/// Failure to create the data directory disables tracing silently; a second
/// call is a no-op.
///
/// # Example
///
/// ```rust,no_run
/// use flashfind::observability::init_tracing;
/// use flashfind::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    init_tracing_in(config, &crate::infrastructure::data_dir());
}

/// Same as [`init_tracing`], writing into `dir`.
pub fn init_tracing_in(config: &Config, dir: &Path) {
    if std::fs::create_dir_all(dir).is_err() {
        return;
    }

    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = tracer::create_tracer_provider(
        FileWriter::new(dir.join("flashfind-otlp.json")),
        resource,
        SERVICE_NAME,
    );
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let log_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(LogWriter::new(FileWriter::new(dir.join("flashfind.log"))));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .with(log_layer)
        .try_init();
}
