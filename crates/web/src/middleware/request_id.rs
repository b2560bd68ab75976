//! Correlation ids for page requests.
//!
//! A proxy in front of the site may already have tagged the request with
//! `x-request-id`. That value is kept only when it looks like an id: short and
//! limited to URL-safe characters, since it is echoed into a response header
//! and into logs. Anything else is replaced by a fresh UUID v4.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest inbound id that is trusted as is.
const MAX_INBOUND_ID_LEN: usize = 128;

fn is_acceptable_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_INBOUND_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}

/// The inbound id when acceptable, otherwise a new UUID.
fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|id| is_acceptable_id(id))
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned)
}

/// Tag the request span, the Sentry scope when Sentry is on, and the response.
///
/// The `TraceLayer` span built in [`crate::app`] declares the `request_id`
/// field this records into.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers());

    Span::current().record("request_id", request_id.as_str());

    if sentry::Hub::current()
        .client()
        .is_some_and(|client| client.is_enabled())
    {
        sentry::configure_scope(|scope| scope.set_tag("request_id", &request_id));
    }

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(id: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(id).unwrap());
        headers
    }

    #[test]
    fn test_keeps_well_formed_inbound_id() {
        let headers = headers_with("edge-01_abc.42");
        assert_eq!(resolve_request_id(&headers), "edge-01_abc.42");
    }

    #[test]
    fn test_replaces_missing_or_suspicious_ids() {
        let too_long = "a".repeat(MAX_INBOUND_ID_LEN + 1);
        for headers in [
            HeaderMap::new(),
            headers_with(""),
            headers_with("has space"),
            headers_with("<script>"),
            headers_with(&too_long),
        ] {
            let id = resolve_request_id(&headers);
            assert!(Uuid::parse_str(&id).is_ok(), "expected a fresh uuid, got {id}");
        }
    }

    #[test]
    fn test_length_limit_is_inclusive() {
        let longest = "b".repeat(MAX_INBOUND_ID_LEN);
        assert_eq!(resolve_request_id(&headers_with(&longest)), longest);
    }
}
