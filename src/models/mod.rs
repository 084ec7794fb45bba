// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod profile;
pub mod segment;
pub mod trip;

pub use profile::{ProfilePatch, UserProfile};
pub use segment::{
    DriveDetails, FlightDetails, JumpType, LodgingDetails, LodgingType, NewSegment,
    SegmentDetails, SegmentPatch, SegmentType, TravelSegment,
};
pub use trip::{
    new_id, ChecklistItem, ChecklistPatch, NewTrip, Trip, TripListQuery, TripPage, TripPatch,
    TripStatus, TripSummary,
};
