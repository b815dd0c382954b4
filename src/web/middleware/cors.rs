//! CORS configuration for the API surface.
//!
//! Two modes: an explicit origin allowlist with credentials (production), or
//! a permissive wildcard layer when no origins are configured (development).
//! Published pages are anonymous GETs and work under either mode.

use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

const API_METHODS: [Method; 6] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::OPTIONS,
];

fn permissive_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_methods(API_METHODS)
        .allow_headers(Any)
        .allow_origin(Any)
}

/// Build the CORS layer from the configured origin list.
///
/// Origins that do not parse as header values are skipped with a warning;
/// if none survive, the layer falls back to permissive mode rather than
/// locking every browser client out.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return permissive_layer();
    }

    let mut allowed: Vec<HeaderValue> = Vec::with_capacity(origins.len());
    for origin in origins {
        match origin.parse::<HeaderValue>() {
            Ok(value) => allowed.push(value),
            Err(_) => tracing::warn!(%origin, "skipping unparseable CORS origin"),
        }
    }

    if allowed.is_empty() {
        tracing::warn!("no usable CORS origins configured, serving permissive CORS");
        return permissive_layer();
    }

    CorsLayer::new()
        .allow_methods(API_METHODS)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT])
        .allow_credentials(true)
        .allow_origin(allowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::util::ServiceExt;

    fn app(origins: &[String]) -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(create_cors_layer(origins))
    }

    async fn allow_origin_for(app: Router, origin: &str) -> Option<String> {
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::ORIGIN, origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_no_origins_is_wildcard() {
        let allowed = allow_origin_for(app(&[]), "http://anywhere.example").await;
        assert_eq!(allowed.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn test_configured_origin_is_echoed() {
        let origins = vec!["http://localhost:5173".to_string()];
        let allowed = allow_origin_for(app(&origins), "http://localhost:5173").await;
        assert_eq!(allowed.as_deref(), Some("http://localhost:5173"));
    }

    #[tokio::test]
    async fn test_unlisted_origin_is_refused() {
        let origins = vec!["http://localhost:5173".to_string()];
        let allowed = allow_origin_for(app(&origins), "http://evil.example").await;
        assert_eq!(allowed, None);
    }

    #[tokio::test]
    async fn test_all_origins_unparseable_falls_back_to_wildcard() {
        let origins = vec!["http://bad\norigin".to_string()];
        let allowed = allow_origin_for(app(&origins), "http://anywhere.example").await;
        assert_eq!(allowed.as_deref(), Some("*"));
    }
}
