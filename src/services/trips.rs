// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trip service: ownership checks, partial-update merging and date-order
//! invariants for trips and their embedded segments.
//!
//! Every mutation is a read-modify-write of the whole trip document. The
//! write only lands if the stored version is still the one that was read.

use crate::db::{StoreError, TripStore};
use crate::error::AppError;
use crate::models::{
    new_id, ChecklistItem, ChecklistPatch, NewSegment, NewTrip, SegmentPatch, TravelSegment, Trip,
    TripListQuery, TripPage, TripPatch, TripSummary,
};
use crate::validation::segment_dates_ordered;
use chrono::Utc;
use std::cmp::Reverse;
use std::sync::Arc;

/// Trip service failures.
#[derive(Debug, thiserror::Error)]
pub enum TripError {
    /// Absent, or owned by someone else.
    #[error("trip not found")]
    TripNotFound,

    #[error("travel segment not found")]
    TravelSegmentNotFound,

    #[error("checklist item not found")]
    ChecklistItemNotFound,

    #[error("{0}")]
    DateOrder(String),

    #[error("segment type cannot be changed from {0}")]
    SegmentTypeImmutable(&'static str),

    #[error("trip was modified concurrently")]
    VersionConflict,

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for TripError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { .. } | StoreError::Contended(_) => TripError::VersionConflict,
            // Deleted between our read and our write.
            StoreError::Missing(_) => TripError::TripNotFound,
            other => TripError::Store(other),
        }
    }
}

impl From<TripError> for AppError {
    fn from(err: TripError) -> Self {
        match err {
            TripError::TripNotFound => AppError::NotFound("Trip not found".to_string()),
            TripError::TravelSegmentNotFound => {
                AppError::NotFound("Travel segment not found".to_string())
            }
            TripError::ChecklistItemNotFound => {
                AppError::NotFound("Checklist item not found".to_string())
            }
            TripError::DateOrder(msg) => AppError::BadRequest(msg),
            TripError::SegmentTypeImmutable(current) => AppError::BadRequest(format!(
                "type cannot be changed on an existing {} segment",
                current
            )),
            TripError::VersionConflict => AppError::Conflict(
                "Trip was modified concurrently, retry the request".to_string(),
            ),
            TripError::Store(e) => e.into(),
        }
    }
}

const DATE_ORDER: &str = "endDate must not be before startDate";

/// Business logic over a [`TripStore`].
#[derive(Clone)]
pub struct TripService {
    store: Arc<dyn TripStore>,
}

impl TripService {
    pub fn new(store: Arc<dyn TripStore>) -> Self {
        Self { store }
    }

    /// Load a trip, treating another owner's trip as absent.
    async fn load(&self, trip_id: &str, owner_id: &str) -> Result<Trip, TripError> {
        match self.store.get_trip(trip_id).await? {
            Some(trip) if trip.is_owned_by(owner_id) => Ok(trip),
            Some(_) => {
                tracing::debug!(trip_id, owner_id, "Trip owned by another subject");
                Err(TripError::TripNotFound)
            }
            None => Err(TripError::TripNotFound),
        }
    }

    /// Write `candidate` over the version it was derived from.
    async fn persist(&self, mut candidate: Trip) -> Result<Trip, TripError> {
        let read_version = candidate.version;
        candidate.version = read_version + 1;
        candidate.updated_at = Utc::now();

        if let Err(e) = self.store.replace_trip(&candidate, read_version).await {
            tracing::warn!(
                trip_id = %candidate.id,
                read_version,
                error = %e,
                "Trip write rejected"
            );
            return Err(e.into());
        }
        Ok(candidate)
    }

    pub async fn create_trip(&self, owner_id: &str, input: NewTrip) -> Result<Trip, TripError> {
        if input.end_date < input.start_date {
            return Err(TripError::DateOrder(DATE_ORDER.to_string()));
        }

        let trip = Trip::new(owner_id, input, Utc::now());
        self.store.insert_trip(&trip).await?;

        tracing::info!(owner_id, trip_id = %trip.id, "Created trip");
        Ok(trip)
    }

    pub async fn get_trip(&self, trip_id: &str, owner_id: &str) -> Result<Trip, TripError> {
        self.load(trip_id, owner_id).await
    }

    pub async fn update_trip(
        &self,
        trip_id: &str,
        owner_id: &str,
        patch: TripPatch,
    ) -> Result<Trip, TripError> {
        let existing = self.load(trip_id, owner_id).await?;
        let candidate = merge_trip(existing, patch);

        if candidate.end_date < candidate.start_date {
            return Err(TripError::DateOrder(DATE_ORDER.to_string()));
        }

        let trip = self.persist(candidate).await?;
        tracing::info!(owner_id, trip_id, version = trip.version, "Updated trip");
        Ok(trip)
    }

    pub async fn delete_trip(&self, trip_id: &str, owner_id: &str) -> Result<(), TripError> {
        self.load(trip_id, owner_id).await?;

        if !self.store.delete_trip(trip_id).await? {
            return Err(TripError::TripNotFound);
        }

        tracing::info!(owner_id, trip_id, "Deleted trip");
        Ok(())
    }

    /// One page of the owner's trips, newest start date first.
    pub async fn list_trips(
        &self,
        owner_id: &str,
        query: TripListQuery,
    ) -> Result<TripPage, TripError> {
        let mut trips: Vec<Trip> = self
            .store
            .list_trips(owner_id)
            .await?
            .into_iter()
            .filter(|t| query.status.is_none_or(|s| t.status == s))
            .collect();

        // Ties broken so that pages never overlap.
        trips.sort_by(|a, b| {
            (Reverse(a.start_date), Reverse(a.created_at), &a.id).cmp(&(
                Reverse(b.start_date),
                Reverse(b.created_at),
                &b.id,
            ))
        });

        let total_count = trips.len() as u32;
        let offset =
            (query.page.saturating_sub(1) as usize).saturating_mul(query.page_size as usize);
        let summaries = trips
            .iter()
            .skip(offset)
            .take(query.page_size as usize)
            .map(TripSummary::from)
            .collect();

        tracing::debug!(owner_id, total_count, page = query.page, "Listed trips");

        Ok(TripPage {
            trips: summaries,
            total_count,
            page: query.page,
            page_size: query.page_size,
        })
    }

    /// Append a segment. Returns the updated trip; the new segment is last.
    pub async fn add_travel_segment(
        &self,
        trip_id: &str,
        owner_id: &str,
        input: NewSegment,
    ) -> Result<Trip, TripError> {
        if !segment_dates_ordered(&input.start_date, &input.end_date) {
            return Err(TripError::DateOrder(DATE_ORDER.to_string()));
        }

        let mut trip = self.load(trip_id, owner_id).await?;
        let now = Utc::now();
        let segment = TravelSegment {
            id: new_id("seg"),
            details: input.details,
            start_date: input.start_date,
            end_date: input.end_date,
            dropzone_id: input.dropzone_id,
            planned_jump_count: input.planned_jump_count,
            actual_jump_count: input.actual_jump_count,
            jump_types: input.jump_types,
            jump_goals: input.jump_goals,
            notes: input.notes,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        let segment_id = segment.id.clone();
        trip.segments.push(segment);

        let trip = self.persist(trip).await?;
        tracing::info!(owner_id, trip_id, segment_id = %segment_id, "Added travel segment");
        Ok(trip)
    }

    pub async fn get_travel_segment(
        &self,
        trip_id: &str,
        owner_id: &str,
        segment_id: &str,
    ) -> Result<TravelSegment, TripError> {
        let trip = self.load(trip_id, owner_id).await?;
        trip.segment(segment_id)
            .cloned()
            .ok_or(TripError::TravelSegmentNotFound)
    }

    /// Merge `patch` onto one segment. Returns the updated trip.
    pub async fn update_travel_segment(
        &self,
        trip_id: &str,
        owner_id: &str,
        segment_id: &str,
        patch: SegmentPatch,
    ) -> Result<Trip, TripError> {
        let mut trip = self.load(trip_id, owner_id).await?;
        let index = trip
            .segments
            .iter()
            .position(|s| s.id == segment_id)
            .ok_or(TripError::TravelSegmentNotFound)?;

        let existing = trip.segments[index].clone();
        let current_type = existing.segment_type();
        let patch_type = patch
            .details
            .as_ref()
            .map(|d| d.segment_type())
            .or(patch.segment_type);
        if patch_type.is_some_and(|t| t != current_type) {
            return Err(TripError::SegmentTypeImmutable(current_type.as_str()));
        }

        let candidate = merge_segment(existing, patch);
        if !segment_dates_ordered(&candidate.start_date, &candidate.end_date) {
            return Err(TripError::DateOrder(DATE_ORDER.to_string()));
        }
        trip.segments[index] = candidate;

        let trip = self.persist(trip).await?;
        tracing::info!(owner_id, trip_id, segment_id, "Updated travel segment");
        Ok(trip)
    }

    pub async fn delete_travel_segment(
        &self,
        trip_id: &str,
        owner_id: &str,
        segment_id: &str,
    ) -> Result<(), TripError> {
        let mut trip = self.load(trip_id, owner_id).await?;
        let before = trip.segments.len();
        trip.segments.retain(|s| s.id != segment_id);
        if trip.segments.len() == before {
            return Err(TripError::TravelSegmentNotFound);
        }

        self.persist(trip).await?;
        tracing::info!(owner_id, trip_id, segment_id, "Deleted travel segment");
        Ok(())
    }

    pub async fn update_checklist_item(
        &self,
        trip_id: &str,
        owner_id: &str,
        item_id: &str,
        patch: ChecklistPatch,
    ) -> Result<ChecklistItem, TripError> {
        let mut trip = self.load(trip_id, owner_id).await?;
        let item = trip
            .checklist
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or(TripError::ChecklistItemNotFound)?;

        if let Some(label) = patch.label {
            item.label = label;
        }
        if let Some(completed) = patch.completed {
            item.completed = completed;
        }
        let updated = item.clone();

        self.persist(trip).await?;
        tracing::info!(
            owner_id,
            trip_id,
            item_id,
            completed = updated.completed,
            "Updated checklist item"
        );
        Ok(updated)
    }
}

/// Apply the fields present in `patch`; everything else is kept.
pub fn merge_trip(mut trip: Trip, patch: TripPatch) -> Trip {
    if let Some(name) = patch.name {
        trip.name = name;
    }
    if let Some(description) = patch.description {
        trip.description = Some(description);
    }
    if let Some(status) = patch.status {
        trip.status = status;
    }
    if let Some(start_date) = patch.start_date {
        trip.start_date = start_date;
    }
    if let Some(end_date) = patch.end_date {
        trip.end_date = end_date;
    }
    if let Some(notes) = patch.notes {
        trip.notes = Some(notes);
    }
    trip
}

/// Shallow merge: a details object in the patch replaces the stored one whole.
pub fn merge_segment(mut segment: TravelSegment, patch: SegmentPatch) -> TravelSegment {
    if let Some(details) = patch.details {
        segment.details = details;
    }
    if let Some(start_date) = patch.start_date {
        segment.start_date = start_date;
    }
    if let Some(end_date) = patch.end_date {
        segment.end_date = end_date;
    }
    if let Some(dropzone_id) = patch.dropzone_id {
        segment.dropzone_id = Some(dropzone_id);
    }
    if let Some(planned) = patch.planned_jump_count {
        segment.planned_jump_count = Some(planned);
    }
    if let Some(actual) = patch.actual_jump_count {
        segment.actual_jump_count = Some(actual);
    }
    if let Some(jump_types) = patch.jump_types {
        segment.jump_types = Some(jump_types);
    }
    if let Some(jump_goals) = patch.jump_goals {
        segment.jump_goals = Some(jump_goals);
    }
    if let Some(notes) = patch.notes {
        segment.notes = Some(notes);
    }
    if let Some(completed) = patch.completed {
        segment.completed = completed;
    }
    segment.updated_at = Utc::now();
    segment
}
