//! Full-stack API tests: real router, real service, in-memory SQLite.

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use domains::ReportId;
use integration_tests::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn call(app: &TestApp, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn frodo() -> Value {
    json!({
        "title": "Disappearing Being",
        "location": "Middle Earth",
        "description": "the little fellow put on a ring, and i swear he disappeared",
        "password": "FrodoIsMysterious"
    })
}

#[tokio::test]
async fn listing_returns_seeded_open_reports_without_passwords() {
    let app = TestApp::new().await.unwrap();
    app.seed_patronus().await.unwrap();

    let (status, body) = call(&app, Method::GET, "/api/reports", None).await;

    assert_eq!(status, StatusCode::OK);
    let reports = body["reports"].as_array().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["title"], "floating patronus");
    assert!(reports[0].get("password").is_none());
    assert_eq!(reports.len() as i64, app.stored_report_count().await.unwrap());

    let listed = &reports[0];
    let id = ReportId(listed["id"].as_i64().unwrap() as i32);
    let (title, location, description, is_open) = app.stored_row(id).await.unwrap();
    assert_eq!(listed["title"], title);
    assert_eq!(listed["location"], location);
    assert_eq!(listed["description"], description);
    assert_eq!(listed["isOpen"], is_open);
}

#[tokio::test]
async fn created_report_echoes_input_and_hides_password() {
    let app = TestApp::new().await.unwrap();

    let (status, created) = call(&app, Method::POST, "/api/reports", Some(frodo())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["title"], "Disappearing Being");
    assert_eq!(created["location"], "Middle Earth");
    assert_eq!(
        created["description"],
        "the little fellow put on a ring, and i swear he disappeared"
    );
    assert_eq!(created["isOpen"], true);
    assert!(created.get("password").is_none());
    assert!(created["id"].is_i64());
}

#[tokio::test]
async fn create_with_missing_fields_is_500_and_stores_nothing() {
    let app = TestApp::new().await.unwrap();

    for body in [
        json!({ "pizza": "party" }),
        json!({ "title": "t", "location": "l", "description": "d" }),
        json!({ "title": "t", "location": "l", "password": "p" }),
    ] {
        let (status, _) = call(&app, Method::POST, "/api/reports", Some(body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
    assert_eq!(app.stored_report_count().await.unwrap(), 0);
}

#[tokio::test]
async fn close_flow_flips_is_open_once() {
    let app = TestApp::new().await.unwrap();
    let (_, created) = call(&app, Method::POST, "/api/reports", Some(frodo())).await;
    let id = ReportId(created["id"].as_i64().unwrap() as i32);
    let uri = format!("/api/reports/{id}");

    // unknown id, wrong password, missing password
    let (status, _) = call(
        &app,
        Method::DELETE,
        "/api/reports/pizza",
        Some(json!({ "password": "FrodoIsMysterious" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let (status, _) = call(&app, Method::DELETE, &uri, Some(json!({ "password": "MyPrecious" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let (status, _) = call(&app, Method::DELETE, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(app.stored_is_open(id).await.unwrap());

    let (status, body) = call(
        &app,
        Method::DELETE,
        &uri,
        Some(json!({ "password": "FrodoIsMysterious" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Report successfully closed!");
    assert!(!app.stored_is_open(id).await.unwrap());

    // already closed
    let (status, _) = call(
        &app,
        Method::DELETE,
        &uri,
        Some(json!({ "password": "FrodoIsMysterious" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn closed_reports_disappear_from_listing() {
    let app = TestApp::new().await.unwrap();
    let seeded = app.seed_patronus().await.unwrap();
    call(&app, Method::POST, "/api/reports", Some(frodo())).await;

    let (_, body) = call(&app, Method::GET, "/api/reports", None).await;
    assert_eq!(body["reports"].as_array().unwrap().len(), 2);

    call(
        &app,
        Method::DELETE,
        &format!("/api/reports/{seeded}"),
        Some(json!({ "password": "ExpectoPatronum" })),
    )
    .await;

    let (_, body) = call(&app, Method::GET, "/api/reports", None).await;
    let reports = body["reports"].as_array().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["title"], "Disappearing Being");
    assert!(reports.iter().all(|r| r["isOpen"] == true));
}

#[tokio::test]
async fn comments_attach_to_reports() {
    let app = TestApp::new().await.unwrap();
    let id = app.seed_patronus().await.unwrap();
    let uri = format!("/api/reports/{id}/comments");

    let (status, comment) = call(
        &app,
        Method::POST,
        &uri,
        Some(json!({ "content": "he is quite small to hold the one ring to rule them all..." })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        comment["content"],
        "he is quite small to hold the one ring to rule them all..."
    );
    assert_eq!(comment["reportId"], id.get());

    let (_, body) = call(&app, Method::GET, "/api/reports", None).await;
    let comments = body["reports"][0]["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["id"], comment["id"]);
}

#[tokio::test]
async fn malformed_or_orphan_comments_are_500() {
    let app = TestApp::new().await.unwrap();
    let id = app.seed_patronus().await.unwrap();

    let (status, _) = call(
        &app,
        Method::POST,
        &format!("/api/reports/{id}/comments"),
        Some(json!({ "pizza": "party" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/reports/9999/comments",
        Some(json!({ "content": "anyone there?" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn comments_are_accepted_on_closed_reports() {
    let app = TestApp::new().await.unwrap();
    let id = app.seed_patronus().await.unwrap();
    call(
        &app,
        Method::DELETE,
        &format!("/api/reports/{id}"),
        Some(json!({ "password": "ExpectoPatronum" })),
    )
    .await;

    let (status, _) = call(
        &app,
        Method::POST,
        &format!("/api/reports/{id}/comments"),
        Some(json!({ "content": "too late" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unmatched_routes_are_404() {
    let app = TestApp::new().await.unwrap();

    let (status, _) = call(&app, Method::GET, "/api/pizza", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(status.canonical_reason(), Some("Not Found"));
}

#[tokio::test]
async fn storage_failures_do_not_leak_driver_text() {
    let app = TestApp::new().await.unwrap();
    app.repo.pool().close().await;

    let (status, body) = call(&app, Method::GET, "/api/reports", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["name"], "RequestFailed");
    let message = body["message"].as_str().unwrap();
    assert_eq!(message, "storage unavailable: database request failed");
    assert!(!message.contains("list_open_reports"));
    assert!(!message.to_lowercase().contains("pool"));
}
