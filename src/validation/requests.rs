// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Raw request payloads as they arrive from clients.
//!
//! Everything the client may omit is an `Option` so that a missing required
//! field is reported per field instead of failing JSON parsing.

use crate::models::{JumpType, LodgingType, SegmentType, TripStatus};
use serde::Deserialize;
use std::collections::BTreeSet;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CreateTripRequest {
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UpdateTripRequest {
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub description: Option<String>,
    pub status: Option<TripStatus>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub notes: Option<String>,
}

impl UpdateTripRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.notes.is_none()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FlightDetailsInput {
    pub airline: Option<String>,
    pub flight_number: Option<String>,
    pub departure_airport: Option<String>,
    pub arrival_airport: Option<String>,
    pub confirmation_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DriveDetailsInput {
    pub departure_location: Option<String>,
    pub arrival_location: Option<String>,
    pub distance: Option<f64>,
    pub estimated_duration: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LodgingDetailsInput {
    #[serde(rename = "type")]
    pub lodging_type: Option<LodgingType>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub confirmation_number: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CreateSegmentRequest {
    #[serde(rename = "type")]
    pub segment_type: Option<SegmentType>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub flight_details: Option<FlightDetailsInput>,
    pub drive_details: Option<DriveDetailsInput>,
    pub lodging_details: Option<LodgingDetailsInput>,
    pub dropzone_id: Option<String>,
    #[validate(range(max = 1000, message = "must be at most 1000"))]
    pub planned_jump_count: Option<u32>,
    #[validate(range(max = 1000, message = "must be at most 1000"))]
    pub actual_jump_count: Option<u32>,
    pub jump_types: Option<BTreeSet<JumpType>>,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub jump_goals: Option<String>,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UpdateSegmentRequest {
    /// Accepted only when it matches the stored type.
    #[serde(rename = "type")]
    pub segment_type: Option<SegmentType>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub flight_details: Option<FlightDetailsInput>,
    pub drive_details: Option<DriveDetailsInput>,
    pub lodging_details: Option<LodgingDetailsInput>,
    pub dropzone_id: Option<String>,
    #[validate(range(max = 1000, message = "must be at most 1000"))]
    pub planned_jump_count: Option<u32>,
    #[validate(range(max = 1000, message = "must be at most 1000"))]
    pub actual_jump_count: Option<u32>,
    pub jump_types: Option<BTreeSet<JumpType>>,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub jump_goals: Option<String>,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub notes: Option<String>,
    pub completed: Option<bool>,
}

impl UpdateSegmentRequest {
    /// True when no updatable field is present. `type` alone does not count.
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.flight_details.is_none()
            && self.drive_details.is_none()
            && self.lodging_details.is_none()
            && self.dropzone_id.is_none()
            && self.planned_jump_count.is_none()
            && self.actual_jump_count.is_none()
            && self.jump_types.is_none()
            && self.jump_goals.is_none()
            && self.notes.is_none()
            && self.completed.is_none()
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UpdateChecklistItemRequest {
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub label: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub display_name: Option<String>,
    pub home_dropzone_id: Option<String>,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub license_number: Option<String>,
    #[validate(range(max = 100000, message = "must be at most 100000"))]
    pub total_jumps: Option<u32>,
}

/// Query string of `GET /trips`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTripsParams {
    pub status: Option<TripStatus>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}
fn default_page_size() -> u32 {
    20
}
