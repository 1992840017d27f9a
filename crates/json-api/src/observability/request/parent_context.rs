//! Parent trace context extraction from HTTP headers.

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::http::{HeaderMap, HeaderName};

pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    let extractor = HeaderExtractor::new(headers);

    global::get_text_map_propagator(|propagator| {
        // Use a fresh base context so missing trace headers don't inherit the
        // currently active in-process span chain.
        let context = propagator.extract_with_context(&Context::new(), &extractor);
        let span = context.span();
        let span_context = span.span_context();

        span_context.is_valid().then_some(context)
    })
}

/// Read-only view of request headers for the W3C propagator.
#[derive(Debug)]
struct HeaderExtractor<'a>(&'a HeaderMap);

impl<'a> HeaderExtractor<'a> {
    fn new(headers: &'a HeaderMap) -> Self {
        Self(headers)
    }
}

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use opentelemetry_sdk::propagation::TraceContextPropagator;
    use salvo::http::HeaderValue;

    use super::*;

    const TRACEPARENT: &str = "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01";

    fn headers(traceparent: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(value) = traceparent {
            headers.insert("traceparent", HeaderValue::from_static(value));
        }

        headers
    }

    #[test]
    fn valid_traceparent_yields_parent_context() {
        global::set_text_map_propagator(TraceContextPropagator::new());

        let context = extract_parent_context(&headers(Some(TRACEPARENT)));

        let trace_id = context.map(|context| context.span().span_context().trace_id().to_string());

        assert_eq!(trace_id.as_deref(), Some("4bf92f3577b34da6a3ce929d0e0e4736"));
    }

    #[test]
    fn missing_or_malformed_traceparent_is_ignored() {
        global::set_text_map_propagator(TraceContextPropagator::new());

        assert!(extract_parent_context(&headers(None)).is_none(), "no header");
        assert!(
            extract_parent_context(&headers(Some("not-a-traceparent"))).is_none(),
            "malformed header"
        );
    }

    #[test]
    fn extractor_reads_header_values() {
        let headers = headers(Some(TRACEPARENT));
        let extractor = HeaderExtractor::new(&headers);

        assert_eq!(extractor.get("traceparent"), Some(TRACEPARENT));
        assert_eq!(extractor.keys(), vec!["traceparent"]);
    }
}
