//! End-to-end tests for the restaurant routes against the in-memory store

mod support;

use axum::http::{Method, StatusCode};
use serde_json::Value;
use std::collections::HashSet;
use support::{SAMPLE_SIZE, TestApp, restaurant_payload};
use uuid::Uuid;

fn ids(list: &Value) -> HashSet<String> {
    list.as_array()
        .expect("array body")
        .iter()
        .map(|r| r["id"].as_str().expect("id").to_string())
        .collect()
}

#[tokio::test]
async fn create_without_token_is_unauthorized_and_stores_nothing() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            Method::POST,
            "/api/restaurant",
            None,
            Some(restaurant_payload("41007428")),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, body) = app
        .send(
            Method::POST,
            "/api/restaurant",
            Some("not-a-jwt"),
            Some(restaurant_payload("41007428")),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, body) = app
        .send(Method::GET, "/api/restaurant/all/41007428", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn vendor_creates_a_restaurant_they_own() {
    let app = TestApp::new();
    let (vendor, token) = app.user_with_token("vendor@foodl.io", "Vendor").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/restaurant",
            Some(&token),
            Some(restaurant_payload("41007428")),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["owner"], vendor.id.to_string());
    assert_eq!(body["code"], "41007428");
    assert_eq!(body["verified"], false);
    assert_eq!(body["isAvailable"], true);
    assert_eq!(body["ratingCount"], 0);
}

#[tokio::test]
async fn only_admins_may_create_for_another_owner() {
    let app = TestApp::new();
    let (_, client_token) = app.user_with_token("client@foodl.io", "Client").await;
    let (_, admin_token) = app.user_with_token("admin@foodl.io", "Admin").await;
    let someone_else = Uuid::new_v4();

    let mut payload = restaurant_payload("10001");
    payload["owner"] = Value::String(someone_else.to_string());

    let (status, body) = app
        .send(
            Method::POST,
            "/api/restaurant",
            Some(&client_token),
            Some(payload.clone()),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Forbidden");

    let (status, body) = app
        .send(Method::POST, "/api/restaurant", Some(&admin_token), Some(payload))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["owner"], someone_else.to_string());
}

#[tokio::test]
async fn incomplete_payload_is_a_validation_error() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("vendor@foodl.io", "Vendor").await;

    let mut payload = restaurant_payload("10001");
    payload.as_object_mut().unwrap().remove("title");

    let (status, body) = app
        .send(Method::POST, "/api/restaurant", Some(&token), Some(payload))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "title is required");
}

#[tokio::test]
async fn unreadable_payloads_are_json_validation_errors() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("vendor@foodl.io", "Vendor").await;

    let (status, body) = app
        .send_raw(
            Method::POST,
            "/api/restaurant",
            Some(&token),
            Some("{\"title\": ".to_string()),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let mut payload = restaurant_payload("10001");
    payload["coords"]["latitude"] = serde_json::json!("north");
    let (status, body) = app
        .send(Method::POST, "/api/restaurant", Some(&token), Some(payload))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("coords.latitude"));

    let (status, all) = app.send(Method::GET, "/api/restaurant/all/10001", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(ids(&all).is_empty());
}

#[tokio::test]
async fn unknown_or_malformed_id_is_not_found() {
    let app = TestApp::new();

    for uri in [
        format!("/api/restaurant/byId/{}", Uuid::new_v4()),
        "/api/restaurant/byId/not-a-uuid".to_string(),
    ] {
        let (status, body) = app.send(Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Restaurant not found");
    }

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/restaurant/restaurants/verify/{}", Uuid::new_v4()),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn verification_is_visible_on_later_reads() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("vendor@foodl.io", "Vendor").await;

    let (_, created) = app
        .send(
            Method::POST,
            "/api/restaurant",
            Some(&token),
            Some(restaurant_payload("10001")),
        )
        .await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["verified"], false);

    let (status, verified) = app
        .send(
            Method::PUT,
            &format!("/api/restaurant/restaurants/verify/{}", id),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verified["id"], id.as_str());
    assert_eq!(verified["verified"], true);

    let (status, fetched) = app
        .send(Method::GET, &format!("/api/restaurant/byId/{}", id), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["verified"], true);
}

#[tokio::test]
async fn random_listing_is_a_subset_of_the_full_listing() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("vendor@foodl.io", "Vendor").await;

    for code in ["41007428"; 8].into_iter().chain(["10001"; 2]) {
        let (status, _) = app
            .send(
                Method::POST,
                "/api/restaurant",
                Some(&token),
                Some(restaurant_payload(code)),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, all) = app
        .send(Method::GET, "/api/restaurant/all/41007428", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let all = ids(&all);
    assert_eq!(all.len(), 8);

    for _ in 0..10 {
        let (status, sample) = app
            .send(Method::GET, "/api/restaurant/41007428", None, None)
            .await;
        assert_eq!(status, StatusCode::OK);

        let sample = ids(&sample);
        assert_eq!(sample.len(), SAMPLE_SIZE);
        assert!(sample.is_subset(&all));
    }

    let (status, small_region) = app
        .send(Method::GET, "/api/restaurant/10001", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&small_region).len(), 2);
}

#[tokio::test]
async fn empty_region_is_not_an_error() {
    let app = TestApp::new();

    for uri in ["/api/restaurant/nowhere", "/api/restaurant/all/nowhere"] {
        let (status, body) = app.send(Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "foodl-api");
}
