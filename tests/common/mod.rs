#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use hbnb_api::{apply_migrations, build_app, connect_url, AppState, DataManager};
use serde_json::{json, Value};
use tower::util::ServiceExt;

pub struct TestContext {
    pub app: axum::Router,
    pub manager: DataManager,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::new("hbnb_api=debug"))
        .try_init();
}

pub async fn build_test_context() -> TestContext {
    init_tracing();
    let pool = connect_url("sqlite::memory:", 1).await.expect("pool should open");
    apply_migrations(&pool).await.expect("schema should apply");
    let manager = DataManager::new(pool);
    let app = build_app(AppState::new(manager.clone()), 64 * 1024);
    TestContext { app, manager }
}

pub async fn request_raw(app: &axum::Router, method: &str, uri: &str, body: Option<String>) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .expect("request should build");

    let resp = app.clone().oneshot(req).await.expect("request should be handled");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body should read");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice::<Value>(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
    };
    (status, json)
}

pub async fn request_json(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    request_raw(app, method, uri, body.map(|b| b.to_string())).await
}

pub async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    request_json(app, "GET", uri, None).await
}

pub async fn post(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request_json(app, "POST", uri, Some(body)).await
}

pub async fn put(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request_json(app, "PUT", uri, Some(body)).await
}

pub async fn delete(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    request_json(app, "DELETE", uri, None).await
}

pub fn user_body(first: &str, last: &str, email: &str) -> Value {
    json!({
        "first_name": first,
        "last_name": last,
        "email": email,
        "password": "securepassword"
    })
}

/// POST a body and return the new record's id, asserting 201.
pub async fn create_id(app: &axum::Router, uri: &str, body: Value) -> String {
    let (status, json) = post(app, uri, body).await;
    assert_eq!(status, StatusCode::CREATED, "POST {} failed: {}", uri, json);
    json["id"].as_str().expect("id should be a string").to_string()
}

pub async fn create_user(app: &axum::Router, email: &str) -> String {
    create_id(app, "/users", user_body("Youssef", "Boughanmi", email)).await
}

pub async fn create_country(app: &axum::Router, name: &str, code: &str) -> String {
    create_id(app, "/countries", json!({ "name": name, "code": code })).await
}

pub async fn create_city(app: &axum::Router, name: &str, country_id: &str) -> String {
    create_id(app, "/cities", json!({ "name": name, "country_id": country_id })).await
}

pub async fn create_place(app: &axum::Router, city_id: &str, host_id: &str) -> String {
    create_id(
        app,
        "/places",
        json!({
            "name": "Loft",
            "description": "Bright loft near the river",
            "city_id": city_id,
            "host_id": host_id,
            "number_of_rooms": 2,
            "number_of_bathrooms": 1,
            "price_per_night": 120.5,
            "latitude": 48.85,
            "longitude": 2.35
        }),
    )
    .await
}
