//! HTTP span helpers.

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) otel_path: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let otel_path = normalise_path_for_span_name(path);
    let otel_span_name = format!("{method} {otel_path}");

    RequestSpanName {
        otel_path,
        otel_span_name,
    }
}

/// Collapse identifiers so every product, order or customer shares one route label.
fn normalise_path_for_span_name(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised: Vec<&str> = Vec::new();

    for segment in path.trim_start_matches('/').split('/') {
        let placeholder = match normalised.last() {
            Some(&"customer") => Some("{email}"),
            _ if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) => {
                Some("{id}")
            }
            _ => None,
        };

        normalised.push(placeholder.unwrap_or(segment));
    }

    format!("/{}", normalised.join("/"))
}
