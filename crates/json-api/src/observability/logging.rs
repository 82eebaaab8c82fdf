//! Tracing subscriber setup for the Stockroom API.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{ServerConfig, observability::LogFormat};

use super::ObservabilityError;

/// Crates that are only worth hearing from when something goes wrong.
const NOISY_DEPENDENCIES: [&str; 6] = ["h2", "hyper", "tower", "tonic", "opentelemetry", "sqlx"];

/// Directives used when `RUST_LOG` holds a bare level.
///
/// A level such as `debug` applies to the stockroom crates, while the HTTP,
/// gRPC and database stacks stay at `warn`. Anything that already looks like
/// a directive list is passed through untouched.
fn filter_directives(log_level: &str) -> String {
    let log_level = log_level.trim();

    if log_level.contains(['=', ',']) {
        return log_level.to_string();
    }

    let quiet = NOISY_DEPENDENCIES.map(|target| format!("{target}=warn"));

    format!("{log_level},{}", quiet.join(","))
}

pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let filter = EnvFilter::try_new(filter_directives(&config.logging.log_level))?;

    match config.logging.log_format {
        LogFormat::Compact => install(
            config,
            filter,
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_line_number(true),
            tracer_provider,
        ),
        LogFormat::Json => install(
            config,
            filter,
            tracing_subscriber::fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(true)
                .with_span_list(false)
                .with_target(true),
            tracer_provider,
        ),
    }
}

fn install<L>(
    config: &ServerConfig,
    filter: EnvFilter,
    fmt_layer: L,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::registry().with(fmt_layer).with(filter);

    match tracer_provider {
        Some(provider) => {
            let tracer = provider.tracer(config.observability.otel_service_name.clone());

            subscriber
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .try_init()?;
        }
        None => subscriber.try_init()?,
    }

    Ok(())
}
