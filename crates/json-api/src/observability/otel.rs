//! OTLP span export for the Stockroom API.

use std::time::Duration;

use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};

use crate::config::{ServerConfig, observability::ObservabilityConfig};

use super::ObservabilityError;

/// Groups every stockroom process under one namespace in the trace backend.
const SERVICE_NAMESPACE: &str = "stockroom";

fn service_resource(config: &ObservabilityConfig) -> Resource {
    Resource::builder_empty()
        .with_service_name(config.otel_service_name.clone())
        .with_attributes([
            KeyValue::new("service.namespace", SERVICE_NAMESPACE),
            KeyValue::new("service.version", config.otel_service_version.clone()),
            KeyValue::new(
                "deployment.environment.name",
                config.otel_deployment_environment.clone(),
            ),
        ])
        .build()
}

/// Sampler that follows the caller's decision and samples new roots by ratio.
fn sampler(sample_ratio: f64) -> Sampler {
    Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(
        sample_ratio.clamp(0.0, 1.0),
    )))
}

pub(super) fn build_tracer_provider(
    config: &ServerConfig,
) -> Result<SdkTracerProvider, ObservabilityError> {
    let observability = &config.observability;

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(observability.otel_exporter_otlp_endpoint.clone())
        .with_timeout(Duration::from_secs(
            observability.otel_exporter_otlp_timeout_seconds,
        ))
        .build()?;

    Ok(SdkTracerProvider::builder()
        .with_sampler(sampler(observability.otel_trace_sample_ratio))
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(service_resource(observability))
        .with_batch_exporter(exporter)
        .build())
}
