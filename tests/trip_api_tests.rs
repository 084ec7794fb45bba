// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trip endpoint tests over the in-memory store.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{create_offline_app, create_test_app, create_test_jwt, create_trip, send};

#[tokio::test]
async fn test_boogie_walkthrough() {
    let (app, _) = create_test_app();
    let token = create_test_jwt("auth0|alice");

    let trip = create_trip(&app, &token, "AZ Boogie", "2026-03-15", "2026-03-22").await;
    let trip_id = trip["id"].as_str().unwrap().to_string();
    assert!(trip_id.starts_with("trip-"));
    assert_eq!(trip["status"], "planned");
    assert_eq!(trip["segments"].as_array().unwrap().len(), 0);

    let checklist = trip["checklist"].as_array().unwrap();
    assert_eq!(checklist.len(), 6);
    assert_eq!(checklist[0]["label"], "Reserve rigger inspection current");
    assert_eq!(checklist[5]["label"], "Checked weather forecast");
    assert!(checklist.iter().all(|i| i["completed"] == false));

    let (status, segment) = send(
        &app,
        Method::POST,
        &format!("/trips/{}/segments", trip_id),
        Some(&token),
        Some(json!({
            "type": "flight",
            "startDate": "2026-03-15",
            "endDate": "2026-03-15",
            "flightDetails": {"departureAirport": "LAX", "arrivalAirport": "PHX"}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", segment);
    assert_eq!(segment["type"], "flight");
    assert_eq!(segment["completed"], false);

    let (status, fetched) = send(
        &app,
        Method::GET,
        &format!("/trips/{}", trip_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["segments"].as_array().unwrap().len(), 1);
    assert_eq!(fetched["segments"][0]["id"], segment["id"]);

    let (status, json) = send(
        &app,
        Method::PUT,
        &format!("/trips/{}", trip_id),
        Some(&token),
        Some(json!({"endDate": "2026-03-10"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "bad_request");
    assert_eq!(json["message"], "endDate must not be before startDate");
}

#[tokio::test]
async fn test_other_owner_gets_not_found_everywhere() {
    let (app, _) = create_test_app();
    let alice = create_test_jwt("auth0|alice");
    let bob = create_test_jwt("auth0|bob");

    let trip = create_trip(&app, &alice, "AZ Boogie", "2026-03-15", "2026-03-22").await;
    let trip_id = trip["id"].as_str().unwrap();
    let item_id = trip["checklist"][0]["id"].as_str().unwrap();

    let (_, segment) = send(
        &app,
        Method::POST,
        &format!("/trips/{}/segments", trip_id),
        Some(&alice),
        Some(json!({
            "type": "lodging",
            "startDate": "2026-03-15",
            "endDate": "2026-03-22",
            "lodgingDetails": {"name": "Skydive Inn"}
        })),
    )
    .await;
    let segment_id = segment["id"].as_str().unwrap();

    let trip_uri = format!("/trips/{}", trip_id);
    let segment_uri = format!("/trips/{}/segments/{}", trip_id, segment_id);
    let attempts = vec![
        (Method::GET, trip_uri.clone(), None),
        (Method::PUT, trip_uri.clone(), Some(json!({"name": "Mine now"}))),
        (Method::DELETE, trip_uri.clone(), None),
        (
            Method::POST,
            format!("/trips/{}/segments", trip_id),
            Some(json!({
                "type": "drive",
                "startDate": "2026-03-15",
                "endDate": "2026-03-15",
                "driveDetails": {"departureLocation": "A", "arrivalLocation": "B"}
            })),
        ),
        (Method::GET, segment_uri.clone(), None),
        (Method::PUT, segment_uri.clone(), Some(json!({"notes": "hi"}))),
        (Method::DELETE, segment_uri.clone(), None),
        (
            Method::PUT,
            format!("/trips/{}/checklist/{}", trip_id, item_id),
            Some(json!({"completed": true})),
        ),
    ];

    for (method, uri, body) in attempts {
        let (status, json) = send(&app, method.clone(), &uri, Some(&bob), body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
        assert_eq!(json["error"], "not_found");
    }

    // Alice's trip is untouched.
    let (status, fetched) = send(&app, Method::GET, &trip_uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "AZ Boogie");
    assert_eq!(fetched["segments"].as_array().unwrap().len(), 1);
    assert_eq!(fetched["checklist"][0]["completed"], false);
}

#[tokio::test]
async fn test_missing_trip_and_foreign_trip_look_the_same() {
    let (app, _) = create_test_app();
    let alice = create_test_jwt("auth0|alice");
    let bob = create_test_jwt("auth0|bob");
    let trip = create_trip(&app, &alice, "AZ Boogie", "2026-03-15", "2026-03-22").await;

    let (_, foreign) = send(
        &app,
        Method::GET,
        &format!("/trips/{}", trip["id"].as_str().unwrap()),
        Some(&bob),
        None,
    )
    .await;
    let (_, missing) = send(&app, Method::GET, "/trips/trip-nope", Some(&bob), None).await;

    assert_eq!(foreign, missing);
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let (app, _) = create_test_app();
    let token = create_test_jwt("auth0|alice");
    let trip = create_trip(&app, &token, "AZ Boogie", "2026-03-15", "2026-03-22").await;
    let uri = format!("/trips/{}", trip["id"].as_str().unwrap());

    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({"status": "in_progress", "notes": "Bring sunscreen"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "in_progress");
    assert_eq!(updated["notes"], "Bring sunscreen");
    assert_eq!(updated["name"], trip["name"]);
    assert_eq!(updated["startDate"], trip["startDate"]);
    assert_eq!(updated["endDate"], trip["endDate"]);
    assert_eq!(updated["checklist"], trip["checklist"]);
    assert_eq!(updated["createdAt"], trip["createdAt"]);
    assert_eq!(updated["version"], 2);
}

#[tokio::test]
async fn test_update_start_date_checked_against_stored_end() {
    let (app, _) = create_test_app();
    let token = create_test_jwt("auth0|alice");
    let trip = create_trip(&app, &token, "AZ Boogie", "2026-03-15", "2026-03-22").await;
    let uri = format!("/trips/{}", trip["id"].as_str().unwrap());

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({"startDate": "2026-03-23"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({"startDate": "2026-03-22"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["startDate"], "2026-03-22");
}

#[tokio::test]
async fn test_empty_update_is_rejected() {
    let (app, _) = create_test_app();
    let token = create_test_jwt("auth0|alice");
    let trip = create_trip(&app, &token, "AZ Boogie", "2026-03-15", "2026-03-22").await;

    let (status, json) = send(
        &app,
        Method::PUT,
        &format!("/trips/{}", trip["id"].as_str().unwrap()),
        Some(&token),
        Some(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "At least one field must be provided");
}

#[tokio::test]
async fn test_create_trip_field_errors() {
    let (app, _) = create_test_app();
    let token = create_test_jwt("auth0|alice");

    // One bad field: plain 400.
    let (status, json) = send(
        &app,
        Method::POST,
        "/trips",
        Some(&token),
        Some(json!({"name": "AZ Boogie", "startDate": "March 15", "endDate": "2026-03-22"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("details").is_none());
    assert_eq!(json["message"], "startDate must be a date in YYYY-MM-DD format");

    // Several bad fields: 422 with details.
    let (status, json) = send(
        &app,
        Method::POST,
        "/trips",
        Some(&token),
        Some(json!({"name": "", "startDate": "2026/03/15"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "validation_failed");
    assert_eq!(json["details"]["name"], "must not be blank");
    assert!(json["details"]["startDate"].is_string());
    assert_eq!(json["details"]["endDate"], "is required");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (app, _) = create_test_app();
    let token = create_test_jwt("auth0|alice");

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/trips")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"name\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_status_is_bad_request() {
    let (app, _) = create_test_app();
    let token = create_test_jwt("auth0|alice");
    let trip = create_trip(&app, &token, "AZ Boogie", "2026-03-15", "2026-03-22").await;

    let (status, json) = send(
        &app,
        Method::PUT,
        &format!("/trips/{}", trip["id"].as_str().unwrap()),
        Some(&token),
        Some(json!({"status": "postponed"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "bad_request");
}

#[tokio::test]
async fn test_delete_trip() {
    let (app, _) = create_test_app();
    let token = create_test_jwt("auth0|alice");
    let trip = create_trip(&app, &token, "AZ Boogie", "2026-03-15", "2026-03-22").await;
    let uri = format!("/trips/{}", trip["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_checklist_item_update() {
    let (app, _) = create_test_app();
    let token = create_test_jwt("auth0|alice");
    let trip = create_trip(&app, &token, "AZ Boogie", "2026-03-15", "2026-03-22").await;
    let trip_id = trip["id"].as_str().unwrap();
    let item_id = trip["checklist"][2]["id"].as_str().unwrap();

    let (status, item) = send(
        &app,
        Method::PUT,
        &format!("/trips/{}/checklist/{}", trip_id, item_id),
        Some(&token),
        Some(json!({"completed": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["completed"], true);
    assert_eq!(item["order"], 3);

    let (_, page) = send(&app, Method::GET, "/trips", Some(&token), None).await;
    assert_eq!(page["trips"][0]["completedChecklistItems"], 1);
    assert_eq!(page["trips"][0]["totalChecklistItems"], 6);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/trips/{}/checklist/item-missing", trip_id),
        Some(&token),
        Some(json!({"completed": true})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/trips/{}/checklist/{}", trip_id, item_id),
        Some(&token),
        Some(json!({"label": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_store_failure_is_generic_server_error() {
    let app = create_offline_app();
    let token = create_test_jwt("auth0|alice");

    let (status, json) = send(&app, Method::GET, "/trips/trip-1", Some(&token), None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "database_error");
    assert_eq!(json["message"], "Something went wrong, please try again");
}
