//! Security headers for every response.

use axum::http::HeaderValue;
use axum::http::header::{HeaderName, REFERRER_POLICY};
use axum::response::Response;

/// Pages are rendered on the server and carry no scripts; document images
/// may come from anywhere over https.
const CSP: &str = "default-src 'self'; \
                   script-src 'none'; \
                   style-src 'self' 'unsafe-inline'; \
                   img-src 'self' data: https:; \
                   frame-ancestors 'none'";

/// Headers replacing whatever a handler set.
const ENFORCED: [(&str, &str); 3] = [
    ("content-security-policy", CSP),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
];

/// Response mapper for `axum::middleware::map_response`.
pub(crate) async fn add_security_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    for (name, value) in ENFORCED {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
    headers
        .entry(REFERRER_POLICY)
        .or_insert(HeaderValue::from_static("same-origin"));
    response
}
