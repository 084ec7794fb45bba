// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API input validation tests.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{create_test_app, create_test_jwt, create_trip, send};

#[tokio::test]
async fn test_trip_name_too_long() {
    let (app, _) = create_test_app();
    let token = create_test_jwt("auth0|alice");

    let (status, json) = send(
        &app,
        Method::POST,
        "/trips",
        Some(&token),
        Some(json!({"name": "a".repeat(201), "startDate": "2026-03-15", "endDate": "2026-03-16"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "name must be at most 200 characters");
}

#[tokio::test]
async fn test_invalid_calendar_date() {
    let (app, _) = create_test_app();
    let token = create_test_jwt("auth0|alice");

    let (status, _) = send(
        &app,
        Method::POST,
        "/trips",
        Some(&token),
        Some(json!({"name": "Leap", "startDate": "2026-02-29", "endDate": "2026-03-01"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_content_type() {
    let (app, _) = create_test_app();
    let token = create_test_jwt("auth0|alice");

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/trips")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::from(
                    r#"{"name":"x","startDate":"2026-03-15","endDate":"2026-03-16"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_jump_count_limit() {
    let (app, _) = create_test_app();
    let token = create_test_jwt("auth0|alice");
    let trip = create_trip(&app, &token, "AZ Boogie", "2026-03-15", "2026-03-22").await;

    let (status, json) = send(
        &app,
        Method::POST,
        &format!("/trips/{}/segments", trip["id"].as_str().unwrap()),
        Some(&token),
        Some(json!({
            "type": "drive",
            "startDate": "2026-03-15",
            "endDate": "2026-03-15",
            "driveDetails": {"departureLocation": "A", "arrivalLocation": "B"},
            "plannedJumpCount": 1001
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "plannedJumpCount must be at most 1000");
}

#[tokio::test]
async fn test_unknown_jump_type() {
    let (app, _) = create_test_app();
    let token = create_test_jwt("auth0|alice");
    let trip = create_trip(&app, &token, "AZ Boogie", "2026-03-15", "2026-03-22").await;

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/trips/{}/segments", trip["id"].as_str().unwrap()),
        Some(&token),
        Some(json!({
            "type": "drive",
            "startDate": "2026-03-15",
            "endDate": "2026-03-15",
            "driveDetails": {"departureLocation": "A", "arrivalLocation": "B"},
            "jumpTypes": ["base"]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blank_dropzone_id() {
    let (app, _) = create_test_app();
    let token = create_test_jwt("auth0|alice");
    let trip = create_trip(&app, &token, "AZ Boogie", "2026-03-15", "2026-03-22").await;

    let (status, json) = send(
        &app,
        Method::POST,
        &format!("/trips/{}/segments", trip["id"].as_str().unwrap()),
        Some(&token),
        Some(json!({
            "type": "lodging",
            "startDate": "2026-03-15",
            "endDate": "2026-03-16",
            "lodgingDetails": {"name": "Inn"},
            "dropzoneId": " "
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "dropzoneId must not be blank");
}

#[tokio::test]
async fn test_undecodable_path_param_uses_error_envelope() {
    let (app, _) = create_test_app();
    let token = create_test_jwt("auth0|alice");

    let (status, json) = send(&app, Method::GET, "/trips/%FF", Some(&token), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "bad_request");
    assert!(json["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid path parameters"));
}

#[tokio::test]
async fn test_padded_trip_date_rejected() {
    let (app, _) = create_test_app();
    let token = create_test_jwt("auth0|alice");

    let (status, json) = send(
        &app,
        Method::POST,
        "/trips",
        Some(&token),
        Some(json!({"name": "Boogie", "startDate": "2026- 3-15", "endDate": "2026-03-16"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["message"].as_str().unwrap().starts_with("startDate"));
}
