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

/// Collapse offer codes so metrics and span names stay low-cardinality.
fn normalise_path_for_span_name(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");
    let mut previous = "";

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if previous == "offers" && !segment.is_empty() {
            normalised.push_str("{code}");
        } else {
            normalised.push_str(segment);
        }

        previous = segment;
    }

    normalised
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offer_codes_are_collapsed() {
        let names = request_span_name("POST", "/admin/offers/SAVE10/enable");

        assert_eq!(names.otel_path, "/admin/offers/{code}/enable");
        assert_eq!(names.otel_span_name, "POST /admin/offers/{code}/enable");
    }

    #[test]
    fn static_paths_are_kept() {
        assert_eq!(request_span_name("GET", "/admin/offers").otel_path, "/admin/offers");
        assert_eq!(request_span_name("GET", "/").otel_path, "/");
        assert_eq!(
            request_span_name("POST", "/checkout/one-time").otel_path,
            "/checkout/one-time"
        );
    }
}
