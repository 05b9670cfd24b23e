//! Provides utilities to initialize logging and OpenTelemetry tracing.
use std::env;

use opentelemetry::{trace::TracerProvider, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{trace::SdkTracerProvider, Resource};
use thiserror::Error;
use tracing::{info, Subscriber};
use tracing_subscriber::{
    layer::SubscriberExt,
    registry::LookupSpan,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter, Layer,
};

/// Environment variable holding the OTLP collector endpoint.
pub const OTLP_URL_ENVVAR: &str = "SHADOW_NODE_OTLP_URL";

/// Environment variable name for the service label, which is appended to the
/// whoami string.
pub const SVC_LABEL_ENVVAR: &str = "SHADOW_NODE_SVC_LABEL";

/// Name under which spans are exported.
const TRACER_NAME: &str = "shadow-node";

/// Configuration for the logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// The whoami string, which is used to identify the service in logs.
    whoami: String,

    /// The OpenTelemetry URL for exporting traces.
    otel_url: Option<String>,
}

impl LoggerConfig {
    /// Creates a new empty instance with whoami set.
    pub const fn new(whoami: String) -> Self {
        Self {
            whoami,
            otel_url: None,
        }
    }

    /// Creates a new instance with the whoami string derived from `base` and the service label
    /// envvar, picking up the OTLP endpoint from the environment if one is set.
    pub fn with_base_name(s: &str) -> Self {
        let mut config = Self::new(get_whoami_string(s));
        if let Some(url) = get_otlp_url_from_env() {
            config.set_otlp_url(url);
        }

        config
    }

    /// Sets the opentelemetry URL to the provided string.
    pub fn set_otlp_url(&mut self, url: String) {
        self.otel_url = Some(url);
    }

    /// Returns the whoami string.
    pub fn whoami(&self) -> &str {
        &self.whoami
    }

    /// Returns the OpenTelemetry endpoint, if configured.
    pub fn otlp_url(&self) -> Option<&str> {
        self.otel_url.as_deref()
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::with_base_name("(shadow-node)")
    }
}

/// Errors that can occur while installing the global subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The OTLP span exporter could not be built.
    #[error("could not build otlp exporter: {0}")]
    Exporter(String),

    /// A global subscriber was already installed.
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Initializes the logging subsystem with the provided config.
///
/// Logs go to stdout, filtered by `RUST_LOG`. Spans are additionally exported over OTLP if the
/// config carries an endpoint, in which case this must be called from within a tokio runtime.
pub fn init(config: LoggerConfig) -> Result<(), LoggingError> {
    let otel_sub = config
        .otel_url
        .as_deref()
        .map(|url| otel_layer(url, &config.whoami))
        .transpose()?;

    tracing_subscriber::registry()
        .with(stdout_layer())
        .with(otel_sub)
        .try_init()?;

    info!(whoami = %config.whoami, otlp = ?config.otel_url, "logging started");

    Ok(())
}

/// Compact stdout output. `LOG_FILE=1` and `LOG_LINE_NUM=1` add source locations.
fn stdout_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let with_file = env::var("LOG_FILE").is_ok_and(|v| v == "1");
    let with_line_num = env::var("LOG_LINE_NUM").is_ok_and(|v| v == "1");

    tracing_subscriber::fmt::layer()
        .compact()
        .event_format(
            tracing_subscriber::fmt::format()
                .with_file(with_file)
                .with_line_number(with_line_num),
        )
        .with_filter(EnvFilter::from_default_env())
}

/// Batches spans to the OTLP collector at `url`, tagged with `whoami` as the service name.
fn otel_layer<S>(url: &str, whoami: &str) -> Result<impl Layer<S>, LoggingError>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(url)
        .build()
        .map_err(|e| LoggingError::Exporter(e.to_string()))?;

    let resource = Resource::builder()
        .with_attribute(KeyValue::new("service.name", whoami.to_string()))
        .build();

    let provider = SdkTracerProvider::builder()
        .with_resource(resource)
        .with_batch_exporter(exporter)
        .build();

    Ok(tracing_opentelemetry::layer().with_tracer(provider.tracer(TRACER_NAME)))
}

/// Gets the OTLP URL from the standard envvar.
pub fn get_otlp_url_from_env() -> Option<String> {
    env::var(OTLP_URL_ENVVAR).ok()
}

/// Gets the service label from the standard envvar, which should be included
/// in the whoami string.
pub fn get_service_label_from_env() -> Option<String> {
    env::var(SVC_LABEL_ENVVAR).ok()
}

/// Computes a standard whoami string.
pub fn get_whoami_string(base: &str) -> String {
    whoami_with_label(base, get_service_label_from_env().as_deref())
}

fn whoami_with_label(base: &str, label: Option<&str>) -> String {
    match label {
        Some(label) => format!("{base}%{label}"),
        None => base.to_owned(),
    }
}
