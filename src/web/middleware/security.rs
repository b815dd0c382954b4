//! Response hardening headers.

use axum::{
    body::Body,
    http::{header::HeaderValue, Request},
    middleware::Next,
    response::Response,
};

/// Headers stamped onto every response unconditionally. X-XSS-Protection is
/// pinned to 0; the CSP on published pages covers script injection.
/// Strict-Transport-Security belongs at the TLS-terminating proxy.
const BASELINE_HEADERS: [(&str, &str); 4] = [
    ("X-Content-Type-Options", "nosniff"),
    ("X-Frame-Options", "DENY"),
    ("Referrer-Policy", "strict-origin-when-cross-origin"),
    ("X-XSS-Protection", "0"),
];

/// Security headers middleware.
pub async fn security_headers(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    for (name, value) in BASELINE_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }

    // API responses carry user-private data and must not be cached. Only
    // filled when absent: the published-page handler sets its own policy.
    if !headers.contains_key("Cache-Control") {
        headers.insert(
            "Cache-Control",
            HeaderValue::from_static("no-store, max-age=0"),
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CACHE_CONTROL;
    use axum::response::IntoResponse;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use tower::util::ServiceExt;

    async fn send(app: Router) -> Response {
        app.oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_security_headers_added() {
        let app = Router::new()
            .route("/", get(|| async { "OK" }))
            .layer(middleware::from_fn(security_headers));

        let response = send(app).await;
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        for (name, value) in BASELINE_HEADERS {
            assert_eq!(headers.get(name).unwrap(), value, "{name}");
        }
        assert_eq!(headers.get("Cache-Control").unwrap(), "no-store, max-age=0");
    }

    #[tokio::test]
    async fn test_existing_cache_control_is_preserved() {
        async fn cached() -> Response {
            ([(CACHE_CONTROL, "public, max-age=3600")], "page").into_response()
        }

        let app = Router::new()
            .route("/", get(cached))
            .layer(middleware::from_fn(security_headers));

        let response = send(app).await;
        assert_eq!(
            response.headers().get("Cache-Control").unwrap(),
            "public, max-age=3600"
        );
    }
}
