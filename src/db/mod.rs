//! Record store layer (Firestore, with an in-memory store for tests and local runs).
//!
//! Trips are addressed by id and partitioned by `ownerId`. Writes that modify
//! an existing trip go through [`TripStore::replace_trip`], which only succeeds
//! when the stored version still matches the version the caller read.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::error::AppError;
use crate::models::{Trip, UserProfile};
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    pub const TRIPS: &str = "trips";
    pub const PROFILES: &str = "profiles";
}

/// Record store failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The stored version advanced since the caller read the record.
    #[error("version conflict on {id}: expected {expected}, found {actual}")]
    Conflict {
        id: String,
        expected: u64,
        actual: u64,
    },

    /// The backend aborted the write because another transaction touched
    /// the record first.
    #[error("write to {0} aborted by a concurrent transaction")]
    Contended(String),

    /// The record to replace no longer exists.
    #[error("record {0} not found")]
    Missing(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { .. } | StoreError::Contended(_) => AppError::Conflict(
                "Trip was modified concurrently, retry the request".to_string(),
            ),
            StoreError::Missing(id) => AppError::NotFound(format!("Record {} not found", id)),
            StoreError::Backend(msg) => AppError::Database(msg),
        }
    }
}

/// Trip persistence.
#[async_trait]
pub trait TripStore: Send + Sync {
    /// Fetch a trip by id regardless of owner. Callers enforce ownership.
    async fn get_trip(&self, trip_id: &str) -> Result<Option<Trip>, StoreError>;

    /// All trips in the owner's partition, in no particular order.
    async fn list_trips(&self, owner_id: &str) -> Result<Vec<Trip>, StoreError>;

    /// Store a freshly created trip.
    async fn insert_trip(&self, trip: &Trip) -> Result<(), StoreError>;

    /// Overwrite a trip if its stored version equals `expected_version`.
    async fn replace_trip(&self, trip: &Trip, expected_version: u64) -> Result<(), StoreError>;

    /// Delete a trip. Returns whether a record was removed.
    async fn delete_trip(&self, trip_id: &str) -> Result<bool, StoreError>;
}

/// Profile persistence.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, subject: &str) -> Result<Option<UserProfile>, StoreError>;

    async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), StoreError>;
}
