mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use common::*;
use serde_json::{json, Value};
use tower::util::ServiceExt;

#[tokio::test]
async fn country_and_city_flow() {
    let ctx = build_test_context().await;
    let france = create_country(&ctx.app, "France", "FR").await;
    let paris = create_city(&ctx.app, "Paris", &france).await;
    create_city(&ctx.app, "Lyon", &france).await;

    let (status, body) = get(&ctx.app, &format!("/cities/{}", paris)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["country_id"], france.as_str());

    let (status, body) = get(&ctx.app, &format!("/countries/{}/cities", france)).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body.as_array().unwrap().iter().map(|c| c["name"].as_str().unwrap()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Paris"));
}

#[tokio::test]
async fn country_code_is_validated_and_unique() {
    let ctx = build_test_context().await;
    create_country(&ctx.app, "France", "FR").await;

    let (status, _) = post(&ctx.app, "/countries", json!({ "name": "Francia", "code": "FR" })).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = post(&ctx.app, "/countries", json!({ "name": "Spain", "code": "esp" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "code does not match required pattern");
}

#[tokio::test]
async fn city_with_unknown_country_returns_400() {
    let ctx = build_test_context().await;
    let (status, body) = post(
        &ctx.app,
        "/cities",
        json!({ "name": "Atlantis", "country_id": uuid::Uuid::new_v4().to_string() }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "country_id does not match any record in countries");

    let (status, body) = post(&ctx.app, "/cities", json!({ "name": "Atlantis", "country_id": "nowhere" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "country_id must be a valid UUID");
}

#[tokio::test]
async fn reference_ids_accept_any_uuid_spelling() {
    let ctx = build_test_context().await;
    let france = create_country(&ctx.app, "France", "FR").await;

    let upper = create_city(&ctx.app, "Paris", &france.to_uppercase()).await;
    let (_, body) = get(&ctx.app, &format!("/cities/{}", upper)).await;
    assert_eq!(body["country_id"], france.as_str());

    let simple = france.replace('-', "");
    let lyon = create_city(&ctx.app, "Lyon", &simple).await;
    let (_, body) = get(&ctx.app, &format!("/cities/{}", lyon)).await;
    assert_eq!(body["country_id"], france.as_str());

    let (status, body) = get(&ctx.app, &format!("/countries/{}/cities", france.to_uppercase())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn update_with_unknown_reference_returns_400() {
    let ctx = build_test_context().await;
    let host = create_user(&ctx.app, "host@example.com").await;
    let france = create_country(&ctx.app, "France", "FR").await;
    let paris = create_city(&ctx.app, "Paris", &france).await;
    let place = create_place(&ctx.app, &paris, &host).await;

    let missing = uuid::Uuid::new_v4().to_string();
    let (status, body) = put(&ctx.app, &format!("/cities/{}", paris), json!({ "country_id": missing })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "country_id does not match any record in countries");

    let (status, body) = put(&ctx.app, &format!("/places/{}", place), json!({ "city_id": missing })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "city_id does not match any record in cities");

    let (_, body) = get(&ctx.app, &format!("/places/{}", place)).await;
    assert_eq!(body["city_id"], paris.as_str());
}

#[tokio::test]
async fn oversized_body_returns_413() {
    let ctx = build_test_context().await;
    let payload = json!({ "name": "x".repeat(128 * 1024) }).to_string();

    let (status, body) = request_raw(&ctx.app, "POST", "/amenities", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].is_string(), "unexpected body: {}", body);

    let req = Request::builder()
        .method("POST")
        .uri("/amenities")
        .header("Content-Type", "application/json")
        .header("Content-Length", payload.len())
        .body(Body::from(payload))
        .unwrap();
    let resp = ctx.app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());

    let (_, list) = get(&ctx.app, "/amenities").await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn nested_cities_of_unknown_country_returns_404() {
    let ctx = build_test_context().await;
    let (status, body) = get(&ctx.app, &format!("/countries/{}/cities", uuid::Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Country not found");

    let (status, body) = get(&ctx.app, "/countries/FR/cities").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid country ID");
}

#[tokio::test]
async fn deleting_a_referenced_country_conflicts() {
    let ctx = build_test_context().await;
    let france = create_country(&ctx.app, "France", "FR").await;
    let paris = create_city(&ctx.app, "Paris", &france).await;

    let (status, _) = delete(&ctx.app, &format!("/countries/{}", france)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = delete(&ctx.app, &format!("/cities/{}", paris)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = delete(&ctx.app, &format!("/countries/{}", france)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn amenity_crud() {
    let ctx = build_test_context().await;
    let wifi = create_id(&ctx.app, "/amenities", json!({ "name": "Wi-Fi" })).await;

    let (status, _) = post(&ctx.app, "/amenities", json!({ "name": "Wi-Fi" })).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = put(&ctx.app, &format!("/amenities/{}", wifi), json!({ "name": "Fast Wi-Fi" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Fast Wi-Fi");

    let (status, body) = put(&ctx.app, &format!("/amenities/{}", wifi), json!({ "name": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "name must be at least 1 characters");

    let (status, _) = delete(&ctx.app, &format!("/amenities/{}", wifi)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, list) = get(&ctx.app, "/amenities").await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn place_and_review_flow() {
    let ctx = build_test_context().await;
    let host = create_user(&ctx.app, "host@example.com").await;
    let guest = create_user(&ctx.app, "guest@example.com").await;
    let france = create_country(&ctx.app, "France", "FR").await;
    let paris = create_city(&ctx.app, "Paris", &france).await;
    let place = create_place(&ctx.app, &paris, &host).await;

    let (status, body) = get(&ctx.app, &format!("/places/{}", place)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price_per_night"], 120.5);
    assert_eq!(body["number_of_rooms"], 2);
    assert_eq!(body["max_guests"], 0);
    assert!(body["address"].is_null());

    let review = json!({ "place_id": place, "user_id": guest, "rating": 6, "comment": "Great stay" });
    let (status, body) = post(&ctx.app, "/reviews", review).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "rating must be at most 5");

    let review_id = create_id(
        &ctx.app,
        "/reviews",
        json!({ "place_id": place, "user_id": guest, "rating": 5, "comment": "Great stay" }),
    )
    .await;

    let (status, body) = get(&ctx.app, &format!("/places/{}/reviews", place)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], review_id.as_str());

    let (status, body) = put(&ctx.app, &format!("/reviews/{}", review_id), json!({ "rating": 4 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rating"], 4);
    assert_eq!(body["comment"], "Great stay");
}

#[tokio::test]
async fn place_fields_are_range_checked() {
    let ctx = build_test_context().await;
    let host = create_user(&ctx.app, "host@example.com").await;
    let france = create_country(&ctx.app, "France", "FR").await;
    let paris = create_city(&ctx.app, "Paris", &france).await;
    let place = create_place(&ctx.app, &paris, &host).await;

    let (status, body) = put(&ctx.app, &format!("/places/{}", place), json!({ "latitude": 95.0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "latitude must be at most 90");

    let (status, body) = put(&ctx.app, &format!("/places/{}", place), json!({ "price_per_night": -1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "price_per_night must be at least 0");

    let (status, body) = put(&ctx.app, &format!("/places/{}", place), json!({ "latitude": null })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["latitude"].is_null());
}

#[tokio::test]
async fn common_routes_answer() {
    let ctx = build_test_context().await;
    let (status, body) = get(&ctx.app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get(&ctx.app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");

    let (_, body) = get(&ctx.app, "/version").await;
    assert_eq!(body["name"], "hbnb-api");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn health_omits_database_state() {
    let ctx = build_test_context().await;
    let (status, body) = get(&ctx.app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}
