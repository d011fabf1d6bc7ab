//! Trace id extraction for inbound push requests.
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TRACEPARENT_REGEX: Option<Regex> =
        Regex::new(r"^[0-9a-f]{2}-([0-9a-f]{32})-").ok();
}

/// Extracts the trace id from a W3C `traceparent` header value.
///
/// `00-7fb76f99d75f56708e5b7f611910fe90-39e5b0878897fa79-01` yields
/// `7fb76f99d75f56708e5b7f611910fe90`. Falls back to `fallback` when the
/// header is absent or malformed.
pub fn extract_trace_id(traceparent: Option<&str>, fallback: &str) -> String {
    traceparent
        .and_then(parse_traceparent)
        .unwrap_or(fallback)
        .to_string()
}

fn parse_traceparent(value: &str) -> Option<&str> {
    TRACEPARENT_REGEX
        .as_ref()?
        .captures(value)
        .and_then(|captures| captures.get(1))
        .map(|trace_id| trace_id.as_str())
}
