// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request validation.
//!
//! Pure functions that turn raw client payloads into the typed inputs the
//! services accept. A failure touching a single field is reported as a plain
//! message (400); failures touching several fields carry a per-field
//! `details` map (422).

pub mod requests;

pub use requests::{
    CreateSegmentRequest, CreateTripRequest, DriveDetailsInput, FlightDetailsInput,
    ListTripsParams, LodgingDetailsInput, UpdateChecklistItemRequest, UpdateProfileRequest,
    UpdateSegmentRequest, UpdateTripRequest,
};

use crate::error::AppError;
use crate::models::{
    ChecklistPatch, DriveDetails, FlightDetails, LodgingDetails, NewSegment, NewTrip,
    ProfilePatch, SegmentDetails, SegmentPatch, SegmentType, TripListQuery, TripPatch,
};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;
use validator::{Validate, ValidationErrors};

pub const MAX_PAGE_SIZE: u32 = 100;

const NO_FIELDS: &str = "At least one field must be provided";

/// Rejected payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{error}")]
pub struct ValidationFailure {
    pub error: String,
    /// Per-field messages, present only when several fields failed
    pub details: Option<BTreeMap<String, String>>,
}

impl ValidationFailure {
    pub fn simple(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

impl From<ValidationFailure> for AppError {
    fn from(failure: ValidationFailure) -> Self {
        match failure.details {
            Some(details) => AppError::Validation {
                message: failure.error,
                details,
            },
            None => AppError::BadRequest(failure.error),
        }
    }
}

/// Collects per-field problems; the first message for a field wins.
#[derive(Debug, Default)]
struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    /// Merge errors reported by the `validator` derive.
    fn absorb(&mut self, result: Result<(), ValidationErrors>) {
        let Err(errors) = result else {
            return;
        };
        for (field, errs) in errors.field_errors() {
            let message = errs
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| "is invalid".to_string());
            self.add(&camel_case(&field), message);
        }
    }

    fn finish(self) -> Result<(), ValidationFailure> {
        let mut fields = self.0;
        match fields.len() {
            0 => Ok(()),
            1 => {
                let (field, message) = fields.pop_first().unwrap_or_default();
                Err(ValidationFailure::simple(format!("{} {}", field, message)))
            }
            _ => Err(ValidationFailure {
                error: "Some fields are invalid".to_string(),
                details: Some(fields),
            }),
        }
    }
}

/// `start_date` -> `startDate`, matching the JSON field names.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

// ─── Dates ───────────────────────────────────────────────────

/// `YYYY-MM-DD` digits and dashes at the start of `raw`. chrono alone
/// tolerates signs and padded fields.
fn has_date_prefix(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 10
        && bytes[..10].iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_trip_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.len() != 10 || !has_date_prefix(raw) {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// A segment bound: either a calendar date or a point in time (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentInstant {
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

const LOCAL_DATETIME_FORMATS: [&str; 3] =
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

impl SegmentInstant {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if !has_date_prefix(raw) {
            return None;
        }
        if let Some(date) = parse_trip_date(raw) {
            return Some(SegmentInstant::Date(date));
        }
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
            return Some(SegmentInstant::Timestamp(dt.naive_utc()));
        }
        LOCAL_DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(SegmentInstant::Timestamp)
    }

    fn date(&self) -> NaiveDate {
        match self {
            SegmentInstant::Date(d) => *d,
            SegmentInstant::Timestamp(dt) => dt.date(),
        }
    }

    /// Dates compare by day; two timestamps compare exactly.
    pub fn is_before(&self, other: &SegmentInstant) -> bool {
        match (self, other) {
            (SegmentInstant::Timestamp(a), SegmentInstant::Timestamp(b)) => a < b,
            _ => self.date() < other.date(),
        }
    }
}

/// False only when both bounds parse and `end` precedes `start`.
pub fn segment_dates_ordered(start: &str, end: &str) -> bool {
    match (SegmentInstant::parse(start), SegmentInstant::parse(end)) {
        (Some(s), Some(e)) => !e.is_before(&s),
        _ => true,
    }
}

pub fn date_order_failure() -> ValidationFailure {
    ValidationFailure::simple("endDate must not be before startDate")
}

fn trip_date(errors: &mut FieldErrors, field: &str, raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?;
    let parsed = parse_trip_date(raw);
    if parsed.is_none() {
        errors.add(field, "must be a date in YYYY-MM-DD format");
    }
    parsed
}

fn segment_instant(
    errors: &mut FieldErrors,
    field: &str,
    raw: Option<&str>,
) -> Option<(String, SegmentInstant)> {
    let raw = raw?.trim();
    match SegmentInstant::parse(raw) {
        Some(instant) => Some((raw.to_string(), instant)),
        None => {
            errors.add(field, "must be a date or date-time");
            None
        }
    }
}

// ─── Text ────────────────────────────────────────────────────

/// Trimmed non-empty value, or an error when missing or blank.
fn required_text(errors: &mut FieldErrors, field: &str, raw: Option<&str>) -> Option<String> {
    match raw.map(str::trim) {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        Some(_) => {
            errors.add(field, "must not be blank");
            None
        }
        None => {
            errors.add(field, "is required");
            None
        }
    }
}

/// Optional free text on create: blank becomes `None`.
fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Optional value in an update: absent stays `None`, blank is rejected.
fn non_blank(errors: &mut FieldErrors, field: &str, raw: Option<&str>) -> Option<String> {
    raw?;
    required_text(errors, field, raw)
}

// ─── Trips ───────────────────────────────────────────────────

pub fn validate_create_trip(req: &CreateTripRequest) -> Result<NewTrip, ValidationFailure> {
    let mut errors = FieldErrors::default();
    errors.absorb(req.validate());

    let name = required_text(&mut errors, "name", req.name.as_deref());
    let start_date = trip_date(&mut errors, "startDate", req.start_date.as_deref());
    let end_date = trip_date(&mut errors, "endDate", req.end_date.as_deref());
    if req.start_date.is_none() {
        errors.add("startDate", "is required");
    }
    if req.end_date.is_none() {
        errors.add("endDate", "is required");
    }
    errors.finish()?;

    let (Some(name), Some(start_date), Some(end_date)) = (name, start_date, end_date) else {
        return Err(ValidationFailure::simple("Trip payload is incomplete"));
    };
    if end_date < start_date {
        return Err(date_order_failure());
    }

    Ok(NewTrip {
        name,
        description: optional_text(req.description.as_deref()),
        start_date,
        end_date,
        notes: optional_text(req.notes.as_deref()),
    })
}

/// Checks the fields present in the update. The merged date order is
/// checked again by the service against the stored trip.
pub fn validate_update_trip(req: &UpdateTripRequest) -> Result<TripPatch, ValidationFailure> {
    if req.is_empty() {
        return Err(ValidationFailure::simple(NO_FIELDS));
    }

    let mut errors = FieldErrors::default();
    errors.absorb(req.validate());

    let patch = TripPatch {
        name: non_blank(&mut errors, "name", req.name.as_deref()),
        description: non_blank(&mut errors, "description", req.description.as_deref()),
        status: req.status,
        start_date: trip_date(&mut errors, "startDate", req.start_date.as_deref()),
        end_date: trip_date(&mut errors, "endDate", req.end_date.as_deref()),
        notes: non_blank(&mut errors, "notes", req.notes.as_deref()),
    };
    errors.finish()?;

    if let (Some(start), Some(end)) = (patch.start_date, patch.end_date) {
        if end < start {
            return Err(date_order_failure());
        }
    }

    Ok(patch)
}

pub fn validate_checklist_update(
    req: &UpdateChecklistItemRequest,
) -> Result<ChecklistPatch, ValidationFailure> {
    if req.label.is_none() && req.completed.is_none() {
        return Err(ValidationFailure::simple(NO_FIELDS));
    }

    let mut errors = FieldErrors::default();
    errors.absorb(req.validate());
    let label = non_blank(&mut errors, "label", req.label.as_deref());
    errors.finish()?;

    Ok(ChecklistPatch {
        label,
        completed: req.completed,
    })
}

pub fn validate_list_params(params: &ListTripsParams) -> Result<TripListQuery, ValidationFailure> {
    if params.page < 1 {
        return Err(ValidationFailure::simple("page must be at least 1"));
    }
    if params.page_size < 1 || params.page_size > MAX_PAGE_SIZE {
        return Err(ValidationFailure::simple(format!(
            "pageSize must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }

    Ok(TripListQuery {
        status: params.status,
        page: params.page,
        page_size: params.page_size,
    })
}

// ─── Segments ────────────────────────────────────────────────

fn flight_details(errors: &mut FieldErrors, input: &FlightDetailsInput) -> Option<FlightDetails> {
    let departure = required_text(
        errors,
        "flightDetails.departureAirport",
        input.departure_airport.as_deref(),
    );
    let arrival = required_text(
        errors,
        "flightDetails.arrivalAirport",
        input.arrival_airport.as_deref(),
    );

    Some(FlightDetails {
        airline: optional_text(input.airline.as_deref()),
        flight_number: optional_text(input.flight_number.as_deref()),
        departure_airport: departure?,
        arrival_airport: arrival?,
        confirmation_number: optional_text(input.confirmation_number.as_deref()),
    })
}

fn drive_details(errors: &mut FieldErrors, input: &DriveDetailsInput) -> Option<DriveDetails> {
    let departure = required_text(
        errors,
        "driveDetails.departureLocation",
        input.departure_location.as_deref(),
    );
    let arrival = required_text(
        errors,
        "driveDetails.arrivalLocation",
        input.arrival_location.as_deref(),
    );
    if let Some(distance) = input.distance {
        if !distance.is_finite() || distance < 0.0 {
            errors.add("driveDetails.distance", "must be a non-negative number");
        }
    }

    Some(DriveDetails {
        departure_location: departure?,
        arrival_location: arrival?,
        distance: input.distance,
        estimated_duration: optional_text(input.estimated_duration.as_deref()),
    })
}

fn lodging_details(
    errors: &mut FieldErrors,
    input: &LodgingDetailsInput,
) -> Option<LodgingDetails> {
    let name = required_text(errors, "lodgingDetails.name", input.name.as_deref());

    Some(LodgingDetails {
        lodging_type: input.lodging_type.unwrap_or_default(),
        name: name?,
        address: optional_text(input.address.as_deref()),
        confirmation_number: optional_text(input.confirmation_number.as_deref()),
        notes: optional_text(input.notes.as_deref()),
    })
}

/// Details objects present in a payload, by the type they belong to.
struct DetailsInputs<'a> {
    flight: Option<&'a FlightDetailsInput>,
    drive: Option<&'a DriveDetailsInput>,
    lodging: Option<&'a LodgingDetailsInput>,
}

impl DetailsInputs<'_> {
    fn present(&self) -> Vec<SegmentType> {
        let mut types = Vec::new();
        if self.flight.is_some() {
            types.push(SegmentType::Flight);
        }
        if self.drive.is_some() {
            types.push(SegmentType::Drive);
        }
        if self.lodging.is_some() {
            types.push(SegmentType::Lodging);
        }
        types
    }

    /// Validate the details object for `segment_type`, if it was sent.
    fn build(&self, errors: &mut FieldErrors, segment_type: SegmentType) -> Option<SegmentDetails> {
        match segment_type {
            SegmentType::Flight => self
                .flight
                .and_then(|input| flight_details(errors, input))
                .map(|flight_details| SegmentDetails::Flight { flight_details }),
            SegmentType::Drive => self
                .drive
                .and_then(|input| drive_details(errors, input))
                .map(|drive_details| SegmentDetails::Drive { drive_details }),
            SegmentType::Lodging => self
                .lodging
                .and_then(|input| lodging_details(errors, input))
                .map(|lodging_details| SegmentDetails::Lodging { lodging_details }),
        }
    }
}

fn reject_foreign_details(
    errors: &mut FieldErrors,
    present: &[SegmentType],
    segment_type: SegmentType,
) {
    for other in present.iter().filter(|t| **t != segment_type) {
        errors.add(
            other.details_field(),
            format!("is not allowed for {} segments", segment_type.as_str()),
        );
    }
}

pub fn validate_create_segment(
    req: &CreateSegmentRequest,
) -> Result<NewSegment, ValidationFailure> {
    let mut errors = FieldErrors::default();
    errors.absorb(req.validate());

    let start = segment_instant(&mut errors, "startDate", req.start_date.as_deref());
    let end = segment_instant(&mut errors, "endDate", req.end_date.as_deref());
    if req.start_date.is_none() {
        errors.add("startDate", "is required");
    }
    if req.end_date.is_none() {
        errors.add("endDate", "is required");
    }

    let inputs = DetailsInputs {
        flight: req.flight_details.as_ref(),
        drive: req.drive_details.as_ref(),
        lodging: req.lodging_details.as_ref(),
    };
    let details = match req.segment_type {
        None => {
            errors.add("type", "is required");
            None
        }
        Some(segment_type) => {
            let present = inputs.present();
            reject_foreign_details(&mut errors, &present, segment_type);
            if !present.contains(&segment_type) {
                errors.add(
                    segment_type.details_field(),
                    format!("is required for {} segments", segment_type.as_str()),
                );
            }
            inputs.build(&mut errors, segment_type)
        }
    };

    let dropzone_id = non_blank(&mut errors, "dropzoneId", req.dropzone_id.as_deref());
    errors.finish()?;

    let (Some(details), Some((start_date, start)), Some((end_date, end))) = (details, start, end)
    else {
        return Err(ValidationFailure::simple("Segment payload is incomplete"));
    };
    if end.is_before(&start) {
        return Err(date_order_failure());
    }

    Ok(NewSegment {
        details,
        start_date,
        end_date,
        dropzone_id,
        planned_jump_count: req.planned_jump_count,
        actual_jump_count: req.actual_jump_count,
        jump_types: req.jump_types.clone(),
        jump_goals: optional_text(req.jump_goals.as_deref()),
        notes: optional_text(req.notes.as_deref()),
    })
}

/// Checks the fields present in the update. Type compatibility with the
/// stored segment and the merged date order are checked by the service.
pub fn validate_update_segment(
    req: &UpdateSegmentRequest,
) -> Result<SegmentPatch, ValidationFailure> {
    if req.is_empty() {
        return Err(ValidationFailure::simple(NO_FIELDS));
    }

    let mut errors = FieldErrors::default();
    errors.absorb(req.validate());

    let start = segment_instant(&mut errors, "startDate", req.start_date.as_deref());
    let end = segment_instant(&mut errors, "endDate", req.end_date.as_deref());

    let inputs = DetailsInputs {
        flight: req.flight_details.as_ref(),
        drive: req.drive_details.as_ref(),
        lodging: req.lodging_details.as_ref(),
    };
    let present = inputs.present();
    let details = match present.as_slice() {
        [] => None,
        [provided] => {
            if let Some(segment_type) = req.segment_type {
                reject_foreign_details(&mut errors, &present, segment_type);
            }
            inputs.build(&mut errors, *provided)
        }
        _ => {
            for t in &present {
                errors.add(t.details_field(), "only one details object may be sent");
            }
            None
        }
    };

    let dropzone_id = non_blank(&mut errors, "dropzoneId", req.dropzone_id.as_deref());
    let jump_goals = non_blank(&mut errors, "jumpGoals", req.jump_goals.as_deref());
    let notes = non_blank(&mut errors, "notes", req.notes.as_deref());
    errors.finish()?;

    if let (Some((_, s)), Some((_, e))) = (&start, &end) {
        if e.is_before(s) {
            return Err(date_order_failure());
        }
    }

    Ok(SegmentPatch {
        segment_type: req.segment_type,
        details,
        start_date: start.map(|(raw, _)| raw),
        end_date: end.map(|(raw, _)| raw),
        dropzone_id,
        planned_jump_count: req.planned_jump_count,
        actual_jump_count: req.actual_jump_count,
        jump_types: req.jump_types.clone(),
        jump_goals,
        notes,
        completed: req.completed,
    })
}

// ─── Profile ─────────────────────────────────────────────────

pub fn validate_profile_update(
    req: &UpdateProfileRequest,
) -> Result<ProfilePatch, ValidationFailure> {
    if req.display_name.is_none()
        && req.home_dropzone_id.is_none()
        && req.license_number.is_none()
        && req.total_jumps.is_none()
    {
        return Err(ValidationFailure::simple(NO_FIELDS));
    }

    let mut errors = FieldErrors::default();
    errors.absorb(req.validate());

    let patch = ProfilePatch {
        display_name: non_blank(&mut errors, "displayName", req.display_name.as_deref()),
        home_dropzone_id: non_blank(
            &mut errors,
            "homeDropzoneId",
            req.home_dropzone_id.as_deref(),
        ),
        license_number: non_blank(&mut errors, "licenseNumber", req.license_number.as_deref()),
        total_jumps: req.total_jumps,
    };
    errors.finish()?;

    Ok(patch)
}
