//! Tracing subscriber setup: console logs plus optional OTLP span export.

use std::time::Duration;

use opentelemetry::trace::{TraceError, TracerProvider};
use opentelemetry::{KeyValue, global};
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::{BatchSpanProcessor, Sampler, SdkTracerProvider};
use tracing::{Subscriber, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::{LogFormat, LoggingConfig, OtlpProtocol, TelemetryConfig};

/// Opaque handle returned by [`init`]. Call [`TelemetryGuard::shutdown`] to
/// flush pending spans.
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    /// Flush pending spans and shut down the exporter.
    pub fn shutdown(mut self) {
        if let Some(provider) = self.provider.take()
            && let Err(e) = provider.shutdown()
        {
            tracing::warn!(error = %e, "OpenTelemetry tracer provider shutdown failed");
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn fmt_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + Send + Sync + 'static,
{
    match format {
        LogFormat::Text => tracing_subscriber::fmt::layer().boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
    }
}

/// Install a console-only subscriber. Used by one-shot subcommands.
pub fn init_logging(logging: &LoggingConfig) {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer(logging.format))
        .init();
}

/// Initialize the tracing subscriber.
///
/// With `telemetry.enabled` an OpenTelemetry layer is stacked on top of the
/// console layer. If the OTLP exporter cannot be built the server keeps
/// running with console logs only.
pub fn init(logging: &LoggingConfig, telemetry: &TelemetryConfig) -> TelemetryGuard {
    if !telemetry.enabled {
        init_logging(logging);
        return TelemetryGuard { provider: None };
    }

    let provider = match tracer_provider(telemetry) {
        Ok(provider) => provider,
        Err(e) => {
            init_logging(logging);
            tracing::error!(
                error = %e,
                endpoint = %telemetry.endpoint,
                protocol = %telemetry.protocol,
                "OTLP exporter unavailable, logging to console only"
            );
            return TelemetryGuard { provider: None };
        }
    };
    global::set_tracer_provider(provider.clone());

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer(logging.format))
        .with(tracing_opentelemetry::layer().with_tracer(provider.tracer("intake")))
        .init();

    info!(
        service = %telemetry.service_name,
        endpoint = %telemetry.endpoint,
        protocol = %telemetry.protocol,
        sample_ratio = telemetry.sample_ratio,
        "exporting upload spans over OTLP"
    );

    TelemetryGuard {
        provider: Some(provider),
    }
}

fn tracer_provider(telemetry: &TelemetryConfig) -> Result<SdkTracerProvider, TraceError> {
    let timeout = Duration::from_secs(telemetry.timeout_seconds);
    let exporter = match telemetry.protocol {
        OtlpProtocol::Grpc => SpanExporter::builder()
            .with_tonic()
            .with_endpoint(&telemetry.endpoint)
            .with_timeout(timeout)
            .build()?,
        OtlpProtocol::Http => SpanExporter::builder()
            .with_http()
            .with_endpoint(&telemetry.endpoint)
            .with_timeout(timeout)
            .build()?,
    };

    let resource = Resource::builder()
        .with_service_name(telemetry.service_name.clone())
        .with_attribute(KeyValue::new("service.version", env!("CARGO_PKG_VERSION")))
        .build();

    Ok(SdkTracerProvider::builder()
        .with_span_processor(BatchSpanProcessor::builder(exporter).build())
        .with_sampler(sampler(telemetry.sample_ratio))
        .with_resource(resource)
        .build())
}

fn sampler(ratio: f64) -> Sampler {
    if ratio >= 1.0 {
        Sampler::AlwaysOn
    } else if ratio <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::TraceIdRatioBased(ratio)
    }
}
