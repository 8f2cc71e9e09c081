//! Request ID middleware.
//!
//! Every request carries an ID that ties its log lines, its Sentry events,
//! and its response together. An upstream `x-request-id` is kept when it is
//! a sane token; anything else is replaced with a fresh UUID v4.

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

/// Longest upstream ID that is accepted as-is.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Pick the request ID: the upstream value if acceptable, otherwise a new one.
fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| {
            !id.is_empty()
                && id.len() <= MAX_REQUEST_ID_LEN
                && id
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
        })
        .map_or_else(|| Uuid::new_v4().to_string(), String::from)
}

/// Middleware that ensures every request has a request ID.
///
/// The ID is recorded on the current span, tagged on the Sentry scope, and
/// echoed in the response headers.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers());

    Span::current().record("request_id", &request_id);
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let header = HeaderValue::from_str(&request_id).ok();
    if let Some(value) = &header {
        request.headers_mut().insert(REQUEST_ID_HEADER, value.clone());
    }

    let mut response = next.run(request).await;

    if let Some(value) = header {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(id: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(id) {
            headers.insert(REQUEST_ID_HEADER, value);
        }
        headers
    }

    #[test]
    fn test_keeps_upstream_id() {
        assert_eq!(resolve_request_id(&headers_with("cf-ray_8a1b.2")), "cf-ray_8a1b.2");
    }

    #[test]
    fn test_generates_id_when_missing() {
        let id = resolve_request_id(&HeaderMap::new());
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_replaces_unacceptable_id() {
        let long = "a".repeat(MAX_REQUEST_ID_LEN + 1);
        for bad in ["", "has space", "semi;colon", long.as_str()] {
            let id = resolve_request_id(&headers_with(bad));
            assert!(Uuid::parse_str(&id).is_ok(), "{bad:?}");
        }
    }
}
