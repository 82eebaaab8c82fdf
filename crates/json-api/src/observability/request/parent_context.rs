//! W3C `traceparent` extraction for incoming requests.

use opentelemetry::{
    Context, global,
    propagation::{Extractor, TextMapPropagator},
    trace::TraceContextExt as _,
};
use salvo::http::HeaderMap;

/// Request headers seen through the propagator's extractor interface.
struct Headers<'a>(&'a HeaderMap);

impl Extractor for Headers<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(|name| name.as_str()).collect()
    }
}

/// The caller's trace context, when the request carries a valid one.
pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    global::get_text_map_propagator(|propagator| extract_with(propagator, headers))
}

fn extract_with(propagator: &dyn TextMapPropagator, headers: &HeaderMap) -> Option<Context> {
    // Start from an empty context so a request without trace headers becomes a new root.
    let context = propagator.extract_with_context(&Context::new(), &Headers(headers));
    let valid = context.span().span_context().is_valid();

    valid.then_some(context)
}
