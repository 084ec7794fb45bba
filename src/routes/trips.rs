// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trip, travel segment and checklist endpoints.
//!
//! Handlers only sequence the request: ids, body, validation, then the trip
//! service. The auth middleware is applied in routes/mod.rs.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{ChecklistItem, TravelSegment, Trip, TripPage};
use crate::routes::extract::{require_id, ApiJson, ApiPath, ApiQuery};
use crate::validation::{
    validate_checklist_update, validate_create_segment, validate_create_trip,
    validate_list_params, validate_update_segment, validate_update_trip, CreateSegmentRequest,
    CreateTripRequest, ListTripsParams, UpdateChecklistItemRequest, UpdateSegmentRequest,
    UpdateTripRequest,
};
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trips", get(list_trips).post(create_trip))
        .route(
            "/trips/{trip_id}",
            get(get_trip).put(update_trip).delete(delete_trip),
        )
        .route("/trips/{trip_id}/segments", post(add_segment))
        .route(
            "/trips/{trip_id}/segments/{segment_id}",
            get(get_segment).put(update_segment).delete(delete_segment),
        )
        .route(
            "/trips/{trip_id}/checklist/{item_id}",
            put(update_checklist_item),
        )
}

// ─── Trips ───────────────────────────────────────────────────

async fn create_trip(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiJson(body): ApiJson<CreateTripRequest>,
) -> Result<(StatusCode, Json<Trip>)> {
    let input = validate_create_trip(&body)?;
    let trip = state.trips.create_trip(&user.subject, input).await?;
    Ok((StatusCode::CREATED, Json(trip)))
}

async fn list_trips(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiQuery(params): ApiQuery<ListTripsParams>,
) -> Result<Json<TripPage>> {
    let query = validate_list_params(&params)?;
    let page = state.trips.list_trips(&user.subject, query).await?;
    Ok(Json(page))
}

async fn get_trip(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiPath(trip_id): ApiPath<String>,
) -> Result<Json<Trip>> {
    let trip_id = require_id("tripId", &trip_id)?;
    let trip = state.trips.get_trip(trip_id, &user.subject).await?;
    Ok(Json(trip))
}

async fn update_trip(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiPath(trip_id): ApiPath<String>,
    ApiJson(body): ApiJson<UpdateTripRequest>,
) -> Result<Json<Trip>> {
    let trip_id = require_id("tripId", &trip_id)?;
    let patch = validate_update_trip(&body)?;
    let trip = state.trips.update_trip(trip_id, &user.subject, patch).await?;
    Ok(Json(trip))
}

async fn delete_trip(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiPath(trip_id): ApiPath<String>,
) -> Result<StatusCode> {
    let trip_id = require_id("tripId", &trip_id)?;
    state.trips.delete_trip(trip_id, &user.subject).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Travel segments ─────────────────────────────────────────

fn segment_of(trip: &Trip, segment_id: &str) -> Result<TravelSegment> {
    trip.segment(segment_id).cloned().ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "segment {} missing from trip {} after write",
            segment_id,
            trip.id
        ))
    })
}

async fn add_segment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiPath(trip_id): ApiPath<String>,
    ApiJson(body): ApiJson<CreateSegmentRequest>,
) -> Result<(StatusCode, Json<TravelSegment>)> {
    let trip_id = require_id("tripId", &trip_id)?;
    let input = validate_create_segment(&body)?;
    let trip = state
        .trips
        .add_travel_segment(trip_id, &user.subject, input)
        .await?;

    let segment = trip.segments.last().cloned().ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("trip {} has no segments after append", trip.id))
    })?;
    Ok((StatusCode::CREATED, Json(segment)))
}

async fn get_segment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiPath((trip_id, segment_id)): ApiPath<(String, String)>,
) -> Result<Json<TravelSegment>> {
    let trip_id = require_id("tripId", &trip_id)?;
    let segment_id = require_id("segmentId", &segment_id)?;
    let segment = state
        .trips
        .get_travel_segment(trip_id, &user.subject, segment_id)
        .await?;
    Ok(Json(segment))
}

async fn update_segment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiPath((trip_id, segment_id)): ApiPath<(String, String)>,
    ApiJson(body): ApiJson<UpdateSegmentRequest>,
) -> Result<Json<TravelSegment>> {
    let trip_id = require_id("tripId", &trip_id)?;
    let segment_id = require_id("segmentId", &segment_id)?;
    let patch = validate_update_segment(&body)?;
    let trip = state
        .trips
        .update_travel_segment(trip_id, &user.subject, segment_id, patch)
        .await?;
    Ok(Json(segment_of(&trip, segment_id)?))
}

async fn delete_segment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiPath((trip_id, segment_id)): ApiPath<(String, String)>,
) -> Result<StatusCode> {
    let trip_id = require_id("tripId", &trip_id)?;
    let segment_id = require_id("segmentId", &segment_id)?;
    state
        .trips
        .delete_travel_segment(trip_id, &user.subject, segment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Checklist ───────────────────────────────────────────────

async fn update_checklist_item(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiPath((trip_id, item_id)): ApiPath<(String, String)>,
    ApiJson(body): ApiJson<UpdateChecklistItemRequest>,
) -> Result<Json<ChecklistItem>> {
    let trip_id = require_id("tripId", &trip_id)?;
    let item_id = require_id("itemId", &item_id)?;
    let patch = validate_checklist_update(&body)?;
    let item = state
        .trips
        .update_checklist_item(trip_id, &user.subject, item_id, patch)
        .await?;
    Ok(Json(item))
}
