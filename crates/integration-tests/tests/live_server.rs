//! Walks the patronus scenario over real HTTP against a bound listener.

use domains::ReportId;
use integration_tests::TestApp;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn patronus_report_lifecycle_over_http() {
    let app = TestApp::new().await.unwrap();
    let addr = app.spawn().await.unwrap();
    let api = format!("http://{addr}/api");
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{api}/reports"))
        .json(&json!({
            "title": "floating patronus",
            "location": "hogwarts",
            "description": "glow",
            "password": "ExpectoPatronum"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["isOpen"], true);
    assert!(created.get("password").is_none());
    let id = ReportId(created["id"].as_i64().unwrap() as i32);

    let response = client
        .delete(format!("{api}/reports/{id}"))
        .json(&json!({ "password": "ExpectoPatronum" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Report successfully closed!" }));

    assert!(!app.stored_is_open(id).await.unwrap());

    let listed: Value = client
        .get(format!("{api}/reports"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed["reports"], json!([]));
}

#[tokio::test]
async fn unknown_route_over_http_is_not_found() {
    let app = TestApp::new().await.unwrap();
    let addr = app.spawn().await.unwrap();

    let response = reqwest::get(format!("http://{addr}/api/pizza")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.status().canonical_reason(), Some("Not Found"));
    let headers = response.headers();
    assert!(headers["content-type"].to_str().unwrap().starts_with("text/html"));
    assert!(headers.contains_key("x-request-id"));
}
