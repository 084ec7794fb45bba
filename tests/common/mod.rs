// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use skynav::config::Config;
use skynav::db::{FirestoreDb, MemoryDb};
use skynav::services::verifier::create_jwt;
use skynav::services::{JwtVerifier, ProfileService, TripService};
use skynav::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

fn build_state(config: Config, trips: TripService, profiles: ProfileService) -> Arc<AppState> {
    let verifier = Arc::new(JwtVerifier::new(&config));
    Arc::new(AppState {
        config,
        trips,
        profiles,
        verifier,
    })
}

/// Create a test app over a fresh in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with_config(Config::test_default())
}

#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (Router, Arc<AppState>) {
    let db = MemoryDb::new();
    let state = build_state(
        config,
        TripService::new(Arc::new(db.clone())),
        ProfileService::new(Arc::new(db)),
    );
    (skynav::routes::create_router(state.clone()), state)
}

/// Create a test app whose store is an offline Firestore client.
#[allow(dead_code)]
pub fn create_offline_app() -> Router {
    let db = FirestoreDb::new_mock();
    let state = build_state(
        Config::test_default(),
        TripService::new(Arc::new(db.clone())),
        ProfileService::new(Arc::new(db)),
    );
    skynav::routes::create_router(state)
}

/// Mint a valid token for `subject` with the test signing key.
#[allow(dead_code)]
pub fn create_test_jwt(subject: &str) -> String {
    let config = Config::test_default();
    create_jwt(subject, Some("jumper@example.com"), &config.jwt_signing_key, 3600)
        .expect("Failed to create test JWT")
}

/// Send a request as `token` and return the status and parsed JSON body
/// (`Value::Null` for empty bodies).
#[allow(dead_code)]
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Create a trip through the API and return its JSON.
#[allow(dead_code)]
pub async fn create_trip(app: &Router, token: &str, name: &str, start: &str, end: &str) -> Value {
    let (status, json) = send(
        app,
        Method::POST,
        "/trips",
        Some(token),
        Some(serde_json::json!({"name": name, "startDate": start, "endDate": end})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create trip failed: {}", json);
    json
}
