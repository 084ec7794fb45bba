// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use skynav::db::StoreError;
use skynav::error::AppError;
use skynav::services::verifier::AuthError;
use skynav::services::TripError;
use std::collections::BTreeMap;

async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[test]
fn test_auth_error_statuses() {
    let cases = [
        (AuthError::MissingCredential, StatusCode::UNAUTHORIZED, "unauthorized"),
        (
            AuthError::Malformed("bad".to_string()),
            StatusCode::UNAUTHORIZED,
            "invalid_token",
        ),
        (AuthError::Expired, StatusCode::UNAUTHORIZED, "token_expired"),
        (
            AuthError::Misconfigured("no key".to_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
            "auth_misconfigured",
        ),
    ];

    for (err, status, category) in cases {
        assert_eq!(
            AppError::from(err).status_and_category(),
            (status, category)
        );
    }
}

#[test]
fn test_trip_errors_map_to_statuses() {
    let status = |err: TripError| AppError::from(err).status_and_category().0;

    assert_eq!(status(TripError::TripNotFound), StatusCode::NOT_FOUND);
    assert_eq!(status(TripError::TravelSegmentNotFound), StatusCode::NOT_FOUND);
    assert_eq!(status(TripError::ChecklistItemNotFound), StatusCode::NOT_FOUND);
    assert_eq!(
        status(TripError::DateOrder("endDate must not be before startDate".to_string())),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(status(TripError::VersionConflict), StatusCode::CONFLICT);
    assert_eq!(
        status(TripError::Store(StoreError::Backend("down".to_string()))),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_internal_detail_is_not_leaked() {
    let (status, json) =
        render(AppError::Database("connection refused to 10.0.0.3".to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "database_error");
    assert!(!json["message"].as_str().unwrap().contains("10.0.0.3"));

    let (_, json) = render(AppError::Internal(anyhow::anyhow!("secret stack"))).await;
    assert!(!json["message"].as_str().unwrap().contains("secret"));
}

#[tokio::test]
async fn test_validation_envelope_carries_details() {
    let details = BTreeMap::from([
        ("name".to_string(), "is required".to_string()),
        ("startDate".to_string(), "is required".to_string()),
    ]);

    let (status, json) = render(AppError::Validation {
        message: "Some fields are invalid".to_string(),
        details,
    })
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "validation_failed");
    assert_eq!(json["details"]["name"], "is required");
}

#[tokio::test]
async fn test_conflict_envelope() {
    let (status, json) = render(AppError::from(TripError::VersionConflict)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "conflict");
    assert_eq!(
        json["message"],
        "Trip was modified concurrently, retry the request"
    );
    assert!(json.get("details").is_none());
}
