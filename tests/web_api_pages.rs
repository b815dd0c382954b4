//! Web API published page tests.
//!
//! Integration tests for the /api/pages management endpoints and the public
//! /published/:username/:filename serving route.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{access_token, bearer, register_test_user, spawn_app};

const HTML: &str = "<!DOCTYPE html><html><body><h1>Hello</h1></body></html>";

async fn publish(
    app: &common::TestApp,
    token: &str,
    name: &str,
    content: &str,
) -> axum_test::TestResponse {
    app.server
        .post("/api/pages")
        .add_header(AUTHORIZATION, bearer(token))
        .json(&json!({"name": name, "content": content}))
        .await
}

#[tokio::test]
async fn test_pages_require_authentication() {
    let app = spawn_app().await;

    let response = app.server.get("/api/pages").await;
    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_publish_and_serve_anonymously() {
    let app = spawn_app().await;
    let token = access_token(&register_test_user(&app.server, "alice").await);

    let response = publish(&app, &token, "index.html", HTML).await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["data"]["name"], "index.html");
    assert_eq!(body["data"]["url"], "/published/alice/index.html");

    // No Authorization header: the page is world-readable
    let response = app.server.get("/published/alice/index.html").await;
    response.assert_status_ok();
    assert_eq!(response.text(), HTML);

    let headers = response.headers();
    assert_eq!(
        headers.get("content-type").unwrap(),
        "text/html; charset=utf-8"
    );
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(
        headers.get("content-security-policy").unwrap(),
        "default-src 'self';"
    );
    assert_eq!(
        headers.get("cache-control").unwrap(),
        "public, max-age=3600"
    );
}

#[tokio::test]
async fn test_serve_is_case_insensitive_on_username() {
    let app = spawn_app().await;
    let token = access_token(&register_test_user(&app.server, "alice").await);

    publish(&app, &token, "index.html", HTML)
        .await
        .assert_status(StatusCode::CREATED);

    let response = app.server.get("/published/ALICE/index.html").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_publish_rejects_non_html_content() {
    let app = spawn_app().await;
    let token = access_token(&register_test_user(&app.server, "alice").await);

    let response = publish(&app, &token, "notes.html", "just some plain text").await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_publish_rejects_bad_names() {
    let app = spawn_app().await;
    let token = access_token(&register_test_user(&app.server, "alice").await);

    for name in ["index.htm", "no-extension", "../evil.html", "spaced name.html"] {
        let response = publish(&app, &token, name, HTML).await;
        response.assert_status_bad_request();
    }
}

#[tokio::test]
async fn test_duplicate_page_name_conflicts() {
    let app = spawn_app().await;
    let token = access_token(&register_test_user(&app.server, "alice").await);

    publish(&app, &token, "index.html", HTML)
        .await
        .assert_status(StatusCode::CREATED);
    publish(&app, &token, "index.html", HTML)
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_different_owners_can_reuse_a_name() {
    let app = spawn_app().await;
    let alice = access_token(&register_test_user(&app.server, "alice").await);
    let bob = access_token(&register_test_user(&app.server, "bob").await);

    publish(&app, &alice, "index.html", HTML)
        .await
        .assert_status(StatusCode::CREATED);
    publish(&app, &bob, "index.html", "<html><body>bob</body></html>")
        .await
        .assert_status(StatusCode::CREATED);

    let response = app.server.get("/published/bob/index.html").await;
    assert_eq!(response.text(), "<html><body>bob</body></html>");
}

#[tokio::test]
async fn test_update_replaces_served_content() {
    let app = spawn_app().await;
    let token = access_token(&register_test_user(&app.server, "alice").await);

    let response = publish(&app, &token, "index.html", HTML).await;
    let id = response.json::<Value>()["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let v2 = "<html><body>version two</body></html>";
    let response = app
        .server
        .put(&format!("/api/pages/{id}"))
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({"content": v2}))
        .await;
    response.assert_status_ok();

    let response = app.server.get("/published/alice/index.html").await;
    assert_eq!(response.text(), v2);
}

#[tokio::test]
async fn test_update_rejects_non_html_content() {
    let app = spawn_app().await;
    let token = access_token(&register_test_user(&app.server, "alice").await);

    let response = publish(&app, &token, "index.html", HTML).await;
    let id = response.json::<Value>()["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .server
        .put(&format!("/api/pages/{id}"))
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({"content": "plain text now"}))
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_pages_are_owner_scoped() {
    let app = spawn_app().await;
    let alice = access_token(&register_test_user(&app.server, "alice").await);
    let bob = access_token(&register_test_user(&app.server, "bob").await);

    let response = publish(&app, &alice, "index.html", HTML).await;
    let id = response.json::<Value>()["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Bob cannot read, update, or unpublish alice's page through the API
    app.server
        .get(&format!("/api/pages/{id}"))
        .add_header(AUTHORIZATION, bearer(&bob))
        .await
        .assert_status_not_found();

    app.server
        .put(&format!("/api/pages/{id}"))
        .add_header(AUTHORIZATION, bearer(&bob))
        .json(&json!({"content": HTML}))
        .await
        .assert_status_not_found();

    app.server
        .delete(&format!("/api/pages/{id}"))
        .add_header(AUTHORIZATION, bearer(&bob))
        .await
        .assert_status_not_found();

    // The listing only shows the caller's own pages
    let response = app
        .server
        .get("/api/pages")
        .add_header(AUTHORIZATION, bearer(&bob))
        .await;
    assert!(response.json::<Value>()["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unpublish_removes_public_page() {
    let app = spawn_app().await;
    let token = access_token(&register_test_user(&app.server, "alice").await);

    let response = publish(&app, &token, "index.html", HTML).await;
    let id = response.json::<Value>()["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .server
        .delete(&format!("/api/pages/{id}"))
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    app.server
        .get("/published/alice/index.html")
        .await
        .assert_status_not_found();

    // The name is free for a fresh publication
    publish(&app, &token, "index.html", HTML)
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_serve_unknown_page_or_user() {
    let app = spawn_app().await;
    register_test_user(&app.server, "alice").await;

    app.server
        .get("/published/alice/missing.html")
        .await
        .assert_status_not_found();

    app.server
        .get("/published/nobody/index.html")
        .await
        .assert_status_not_found();
}
