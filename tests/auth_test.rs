mod support;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::json;

use support::{TestApp, error_body, make_bookmarks_array};

const TOKEN: &str = "test-api-token";

fn get_with_auth(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn requests_without_a_token_are_unauthorized() {
    let app = TestApp::with_token(Some(TOKEN)).await;

    let res = app.send(get_with_auth("/api/bookmarks", None)).await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body, error_body("Unauthorized request"));
}

#[tokio::test]
async fn requests_with_the_wrong_token_are_unauthorized() {
    let app = TestApp::with_token(Some(TOKEN)).await;

    for value in ["Bearer nope", "Basic dGVzdA==", TOKEN] {
        let res = app.send(get_with_auth("/api/bookmarks", Some(value))).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED, "{value}");
    }
}

#[tokio::test]
async fn requests_with_the_token_pass() {
    let app = TestApp::with_token(Some(TOKEN)).await;
    let seeded = app.seed(make_bookmarks_array()).await;

    let res = app
        .send(get_with_auth("/api/bookmarks", Some(&format!("Bearer {TOKEN}"))))
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, support::to_json(&seeded));
}

#[tokio::test]
async fn unauthorized_writes_never_reach_the_store() {
    let app = TestApp::with_token(Some(TOKEN)).await;

    let res = app
        .post(
            "/api/bookmarks",
            json!({
                "title": "t",
                "url": "https://example.com",
                "description": "d",
                "rating": 3
            }),
        )
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let listed = app
        .send(get_with_auth("/api/bookmarks", Some(&format!("Bearer {TOKEN}"))))
        .await;
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn healthcheck_needs_no_token() {
    let app = TestApp::with_token(Some(TOKEN)).await;

    let res = app.send(get_with_auth("/", None)).await;

    assert_eq!(res.status, StatusCode::OK);
}
