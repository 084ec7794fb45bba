// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Travel segment model: one flight, drive, or lodging leg of a trip.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Segment discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum SegmentType {
    Flight,
    Drive,
    Lodging,
}

impl SegmentType {
    pub fn as_str(self) -> &'static str {
        match self {
            SegmentType::Flight => "flight",
            SegmentType::Drive => "drive",
            SegmentType::Lodging => "lodging",
        }
    }

    /// Wire name of the details object belonging to this type.
    pub fn details_field(self) -> &'static str {
        match self {
            SegmentType::Flight => "flightDetails",
            SegmentType::Drive => "driveDetails",
            SegmentType::Lodging => "lodgingDetails",
        }
    }
}

/// Kinds of jumps planned for a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum JumpType {
    Belly,
    Freefly,
    Angle,
    Tracking,
    Wingsuit,
    Crw,
    HopNPop,
    HighPull,
    Night,
    Tandem,
    Aff,
    Coaching,
    CanopyCourse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FlightDetails {
    pub airline: Option<String>,
    pub flight_number: Option<String>,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub confirmation_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DriveDetails {
    pub departure_location: String,
    pub arrival_location: String,
    /// Distance in miles
    pub distance: Option<f64>,
    /// Free-form duration, e.g. "2h 30m"
    pub estimated_duration: Option<String>,
}

/// Kind of accommodation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum LodgingType {
    Hotel,
    Motel,
    Rental,
    Bunkhouse,
    Camping,
    #[default]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LodgingDetails {
    #[serde(rename = "type", default)]
    pub lodging_type: LodgingType,
    pub name: String,
    pub address: Option<String>,
    pub confirmation_number: Option<String>,
    pub notes: Option<String>,
}

/// Type-specific payload of a segment.
///
/// Serialized inline with the segment as `"type"` plus exactly one of
/// `flightDetails`, `driveDetails`, or `lodgingDetails`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum SegmentDetails {
    Flight {
        #[serde(rename = "flightDetails")]
        flight_details: FlightDetails,
    },
    Drive {
        #[serde(rename = "driveDetails")]
        drive_details: DriveDetails,
    },
    Lodging {
        #[serde(rename = "lodgingDetails")]
        lodging_details: LodgingDetails,
    },
}

impl SegmentDetails {
    pub fn segment_type(&self) -> SegmentType {
        match self {
            SegmentDetails::Flight { .. } => SegmentType::Flight,
            SegmentDetails::Drive { .. } => SegmentType::Drive,
            SegmentDetails::Lodging { .. } => SegmentType::Lodging,
        }
    }
}

/// A travel leg embedded in a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TravelSegment {
    /// `seg-` prefixed id, unique within the trip
    pub id: String,
    #[serde(flatten)]
    #[cfg_attr(feature = "binding-generation", ts(flatten))]
    pub details: SegmentDetails,
    /// Date (YYYY-MM-DD) or datetime, as submitted
    pub start_date: String,
    pub end_date: String,
    /// Soft reference to a dropzone; never checked for existence
    pub dropzone_id: Option<String>,
    pub planned_jump_count: Option<u32>,
    pub actual_jump_count: Option<u32>,
    pub jump_types: Option<BTreeSet<JumpType>>,
    pub jump_goals: Option<String>,
    pub notes: Option<String>,
    pub completed: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub updated_at: DateTime<Utc>,
}

impl TravelSegment {
    pub fn segment_type(&self) -> SegmentType {
        self.details.segment_type()
    }
}

/// Validated input for a new segment.
#[derive(Debug, Clone)]
pub struct NewSegment {
    pub details: SegmentDetails,
    pub start_date: String,
    pub end_date: String,
    pub dropzone_id: Option<String>,
    pub planned_jump_count: Option<u32>,
    pub actual_jump_count: Option<u32>,
    pub jump_types: Option<BTreeSet<JumpType>>,
    pub jump_goals: Option<String>,
    pub notes: Option<String>,
}

/// Validated partial segment update. `details` replaces the whole details
/// object and must match the segment's existing type.
#[derive(Debug, Clone, Default)]
pub struct SegmentPatch {
    /// Echo of the segment type; must match the stored one when present
    pub segment_type: Option<SegmentType>,
    pub details: Option<SegmentDetails>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub dropzone_id: Option<String>,
    pub planned_jump_count: Option<u32>,
    pub actual_jump_count: Option<u32>,
    pub jump_types: Option<BTreeSet<JumpType>>,
    pub jump_goals: Option<String>,
    pub notes: Option<String>,
    pub completed: Option<bool>,
}
