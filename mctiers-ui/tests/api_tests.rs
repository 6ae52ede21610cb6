//! Integration tests for the mctiers-ui API endpoints
//!
//! Tests cover:
//! - Health endpoint (no auth required)
//! - Admin login, logout, and bearer-token middleware
//! - Player CRUD including merge-on-duplicate create
//! - Tier list classification with manual order applied
//! - Reorder endpoint: round trip, version conflict, validation failure
//! - Deletion cascade into stored orders

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use mctiers_ui::{build_router, AppState};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: app over a fresh in-memory database
async fn setup_app() -> axum::Router {
    let pool = mctiers_common::db::init_memory_database()
        .await
        .expect("Should create in-memory database");
    build_router(AppState::new(pool))
}

/// Test helper: request without body
fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: JSON request, optionally authenticated
fn json_request(method: &str, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Test helper: extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Test helper: log in with the seeded default password
async fn login(app: &axum::Router) -> String {
    let request = json_request(
        "POST",
        "/api/admin/auth",
        json!({"password": "admin123"}),
        None,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    body["token"].as_str().unwrap().to_string()
}

/// Test helper: create a player with one skywars tier, returns its id
async fn create_skywars_player(app: &axum::Router, token: &str, name: &str, tier: &str) -> String {
    let request = json_request(
        "POST",
        "/api/players",
        json!({"name": name, "skywarsTier": tier}),
        Some(token),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = extract_json(response.into_body()).await;
    body["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Health Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint_no_auth_required() {
    let app = setup_app().await;

    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "mctiers-ui");
    assert!(body["version"].is_string());
}

// =============================================================================
// Authentication Tests
// =============================================================================

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let app = setup_app().await;

    let request = json_request(
        "POST",
        "/api/admin/auth",
        json!({"password": "hunter2"}),
        None,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_route_requires_token() {
    let app = setup_app().await;

    // No token at all
    let request = json_request("POST", "/api/players", json!({"name": "X"}), None);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Garbage token
    let request = json_request(
        "POST",
        "/api/players",
        json!({"name": "X"}),
        Some("not-a-session"),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_session() {
    let app = setup_app().await;
    let token = login(&app).await;

    let request = json_request("POST", "/api/admin/logout", json!({}), Some(&token));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The revoked token no longer opens admin routes
    let request = json_request("POST", "/api/players", json!({"name": "X"}), Some(&token));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Player CRUD Tests
// =============================================================================

#[tokio::test]
async fn test_create_and_fetch_player() {
    let app = setup_app().await;
    let token = login(&app).await;

    let id = create_skywars_player(&app, &token, "Velfair", "HT1").await;

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/players/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["name"], "Velfair");
    assert_eq!(body["skywarsTier"], "HT1");
    assert_eq!(body["midfightTier"], "NR");
    // Computed fields ride along
    assert_eq!(body["points"], 100);
    assert_eq!(body["title"], "Cadet");
}

#[tokio::test]
async fn test_get_unknown_player_is_not_found() {
    let app = setup_app().await;
    let response = app
        .oneshot(get_request("/api/players/no-such-id"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_duplicate_name_merges_non_nr_tiers() {
    let app = setup_app().await;
    let token = login(&app).await;

    let id = create_skywars_player(&app, &token, "DR0IDv", "HT1").await;

    // Re-posting the same name merges: uhc is added, the NR skywars field in
    // the request must not clobber the existing HT1
    let request = json_request(
        "POST",
        "/api/players",
        json!({"name": "DR0IDv", "uhcTier": "HT2"}),
        Some(&token),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["skywarsTier"], "HT1");
    assert_eq!(body["uhcTier"], "HT2");
}

#[tokio::test]
async fn test_create_rejects_unknown_tier_code() {
    let app = setup_app().await;
    let token = login(&app).await;

    let request = json_request(
        "POST",
        "/api/players",
        json!({"name": "Bad", "skywarsTier": "MT1"}),
        Some(&token),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_rejects_empty_name() {
    let app = setup_app().await;
    let token = login(&app).await;

    let request = json_request("POST", "/api/players", json!({"name": "  "}), Some(&token));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_set_player_tier() {
    let app = setup_app().await;
    let token = login(&app).await;
    let id = create_skywars_player(&app, &token, "Torqueyckpio", "MIDT1").await;

    let request = json_request(
        "PATCH",
        &format!("/api/players/{id}/tier"),
        json!({"gameMode": "bedfight", "tier": "LT1"}),
        Some(&token),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["bedfightTier"], "LT1");
    assert_eq!(body["skywarsTier"], "MIDT1");

    // Overall is derived and cannot be written
    let request = json_request(
        "PATCH",
        &format!("/api/players/{id}/tier"),
        json!({"gameMode": "overall", "tier": "HT1"}),
        Some(&token),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_players_sorted_by_points() {
    let app = setup_app().await;
    let token = login(&app).await;
    create_skywars_player(&app, &token, "Low", "LT3").await; // 40 points
    create_skywars_player(&app, &token, "High", "HT1").await; // 100 points

    let response = app.oneshot(get_request("/api/players")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["High", "Low"]);
}

// =============================================================================
// Tier List Tests
// =============================================================================

#[tokio::test]
async fn test_tier_list_buckets_and_natural_sort() {
    let app = setup_app().await;
    let token = login(&app).await;
    create_skywars_player(&app, &token, "MidOne", "MIDT1").await;
    create_skywars_player(&app, &token, "HighOne", "HT1").await;
    create_skywars_player(&app, &token, "BTier", "HT3").await;

    let response = app
        .oneshot(get_request("/api/tiers/skywars"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["mode"], "skywars");

    let tiers = body["tiers"].as_array().unwrap();
    assert_eq!(tiers.len(), 5);
    assert_eq!(tiers[0]["key"], "S Tier");

    let s_names: Vec<&str> = tiers[0]["players"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    // HT1 sorts before MIDT1
    assert_eq!(s_names, vec!["HighOne", "MidOne"]);

    let b_names: Vec<&str> = tiers[2]["players"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(b_names, vec!["BTier"]);
}

#[tokio::test]
async fn test_tier_list_unknown_mode_is_bad_request() {
    let app = setup_app().await;
    let response = app.oneshot(get_request("/api/tiers/bridge")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Manual Order Tests
// =============================================================================

#[tokio::test]
async fn test_reorder_round_trip_and_tier_list_overlay() {
    let app = setup_app().await;
    let token = login(&app).await;
    let p1 = create_skywars_player(&app, &token, "Alpha", "HT1").await;
    let p2 = create_skywars_player(&app, &token, "Bravo", "MIDT1").await;

    // Fresh key reads empty at version 0
    let response = app
        .clone()
        .oneshot(get_request("/api/tiers/skywars/S/order"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["version"], 0);
    assert_eq!(body["playerIds"].as_array().unwrap().len(), 0);

    // Curate Bravo above Alpha, against the version just read
    let request = json_request(
        "PUT",
        "/api/tiers/skywars/S/order",
        json!({"playerIds": [p2, p1], "expectedVersion": 0}),
        Some(&token),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["version"], 1);

    // The tier list now reflects the curated order
    let response = app
        .oneshot(get_request("/api/tiers/skywars"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    let s_names: Vec<&str> = body["tiers"][0]["players"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(s_names, vec!["Bravo", "Alpha"]);
}

#[tokio::test]
async fn test_reorder_stale_version_conflicts() {
    let app = setup_app().await;
    let token = login(&app).await;
    let p1 = create_skywars_player(&app, &token, "Alpha", "HT1").await;

    let request = json_request(
        "PUT",
        "/api/tiers/skywars/S/order",
        json!({"playerIds": [p1], "expectedVersion": 0}),
        Some(&token),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Same stale expectedVersion again: the second writer must get a conflict
    let p1 = {
        let response = app.clone().oneshot(get_request("/api/players")).await.unwrap();
        let body = extract_json(response.into_body()).await;
        body[0]["id"].as_str().unwrap().to_string()
    };
    let request = json_request(
        "PUT",
        "/api/tiers/skywars/S/order",
        json!({"playerIds": [p1], "expectedVersion": 0}),
        Some(&token),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_reorder_with_out_of_bucket_player_fails_validation() {
    let app = setup_app().await;
    let token = login(&app).await;
    let p1 = create_skywars_player(&app, &token, "Alpha", "HT1").await;
    let p2 = create_skywars_player(&app, &token, "Bravo", "HT2").await; // A tier

    let request = json_request(
        "PUT",
        "/api/tiers/skywars/S/order",
        json!({"playerIds": [p1, p2]}),
        Some(&token),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Nothing was applied
    let response = app
        .oneshot(get_request("/api/tiers/skywars/S/order"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["version"], 0);
}

#[tokio::test]
async fn test_reorder_requires_auth() {
    let app = setup_app().await;
    let request = json_request(
        "PUT",
        "/api/tiers/skywars/S/order",
        json!({"playerIds": []}),
        None,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_player_cascades_out_of_orders() {
    let app = setup_app().await;
    let token = login(&app).await;
    let p1 = create_skywars_player(&app, &token, "Alpha", "HT1").await;
    let p2 = create_skywars_player(&app, &token, "Bravo", "MIDT1").await;

    let request = json_request(
        "PUT",
        "/api/tiers/skywars/S/order",
        json!({"playerIds": [p2.clone(), p1.clone()]}),
        Some(&token),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/players/{p2}"))
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);

    // The deleted id never comes back out of the order store
    let response = app
        .oneshot(get_request("/api/tiers/skywars/S/order"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    let ids: Vec<&str> = body["playerIds"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![p1.as_str()]);
}
