// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trip aggregate: the owner-scoped travel plan with its embedded segments
//! and preparation checklist.

use crate::models::segment::TravelSegment;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Labels of the checklist every new trip starts with, in display order.
pub const DEFAULT_CHECKLIST: [&str; 6] = [
    "Reserve rigger inspection current",
    "Gear packed and ready",
    "Reviewed dropzone landing areas",
    "Reviewed local hazards and patterns",
    "Confirmed dropzone operating hours",
    "Checked weather forecast",
];

/// Lifecycle state of a trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum TripStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

/// Stored trip document.
///
/// Segments and checklist items are embedded; every mutation rewrites the
/// whole document and bumps `version`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Trip {
    /// `trip-` prefixed id (also used as document ID)
    pub id: String,
    /// Authenticated subject that created the trip (partition key)
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: TripStatus,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub start_date: NaiveDate,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub end_date: NaiveDate,
    /// Travel legs in creation order
    pub segments: Vec<TravelSegment>,
    pub checklist: Vec<ChecklistItem>,
    pub notes: Option<String>,
    /// Optimistic concurrency token, incremented on every write
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub version: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub updated_at: DateTime<Utc>,
}

/// One entry in a trip's preparation checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ChecklistItem {
    pub id: String,
    pub label: String,
    pub completed: bool,
    /// 1-based display position
    pub order: u32,
}

/// Validated input for trip creation.
#[derive(Debug, Clone)]
pub struct NewTrip {
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: Option<String>,
}

/// Validated partial trip update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct TripPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<TripStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Validated partial checklist item update.
#[derive(Debug, Clone, Default)]
pub struct ChecklistPatch {
    pub label: Option<String>,
    pub completed: Option<bool>,
}

/// Validated `GET /trips` parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripListQuery {
    pub status: Option<TripStatus>,
    /// 1-based page number
    pub page: u32,
    pub page_size: u32,
}

/// One page of trip summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TripPage {
    pub trips: Vec<TripSummary>,
    /// Matching trips across all pages
    pub total_count: u32,
    pub page: u32,
    pub page_size: u32,
}

/// Generate a fresh id with the given prefix (e.g. `trip-`).
pub fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}

/// Build the default checklist with fresh ids.
pub fn default_checklist() -> Vec<ChecklistItem> {
    DEFAULT_CHECKLIST
        .iter()
        .enumerate()
        .map(|(i, label)| ChecklistItem {
            id: new_id("item"),
            label: label.to_string(),
            completed: false,
            order: i as u32 + 1,
        })
        .collect()
}

impl Trip {
    /// Create a new planned trip for `owner_id`.
    ///
    /// Does not check the date order; callers go through the trip service.
    pub fn new(owner_id: &str, input: NewTrip, now: DateTime<Utc>) -> Self {
        Self {
            id: new_id("trip"),
            owner_id: owner_id.to_string(),
            name: input.name,
            description: input.description,
            status: TripStatus::Planned,
            start_date: input.start_date,
            end_date: input.end_date,
            segments: Vec::new(),
            checklist: default_checklist(),
            notes: input.notes,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `subject` owns this trip.
    pub fn is_owned_by(&self, subject: &str) -> bool {
        self.owner_id == subject
    }

    /// Find an embedded segment by id.
    pub fn segment(&self, segment_id: &str) -> Option<&TravelSegment> {
        self.segments.iter().find(|s| s.id == segment_id)
    }
}

/// List projection of a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TripSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: TripStatus,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub start_date: NaiveDate,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub end_date: NaiveDate,
    /// Number of travel segments on the trip
    pub dropzone_count: u32,
    /// Actual jumps where recorded, planned jumps otherwise
    pub total_jumps: u32,
    pub completed_checklist_items: u32,
    pub total_checklist_items: u32,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub updated_at: DateTime<Utc>,
}

impl From<&Trip> for TripSummary {
    fn from(trip: &Trip) -> Self {
        let total_jumps = trip
            .segments
            .iter()
            .map(|s| s.actual_jump_count.or(s.planned_jump_count).unwrap_or(0))
            .fold(0u32, u32::saturating_add);

        Self {
            id: trip.id.clone(),
            name: trip.name.clone(),
            description: trip.description.clone(),
            status: trip.status,
            start_date: trip.start_date,
            end_date: trip.end_date,
            dropzone_count: trip.segments.len() as u32,
            total_jumps,
            completed_checklist_items: trip.checklist.iter().filter(|i| i.completed).count()
                as u32,
            total_checklist_items: trip.checklist.len() as u32,
            created_at: trip.created_at,
            updated_at: trip.updated_at,
        }
    }
}
