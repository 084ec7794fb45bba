// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory record store for tests and `STORE_BACKEND=memory`.

use crate::db::{ProfileStore, StoreError, TripStore};
use crate::models::{Trip, UserProfile};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// DashMap-backed store. Clones share the same maps.
#[derive(Clone, Default)]
pub struct MemoryDb {
    trips: Arc<DashMap<String, Trip>>,
    profiles: Arc<DashMap<String, UserProfile>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TripStore for MemoryDb {
    async fn get_trip(&self, trip_id: &str) -> Result<Option<Trip>, StoreError> {
        Ok(self.trips.get(trip_id).map(|t| t.value().clone()))
    }

    async fn list_trips(&self, owner_id: &str) -> Result<Vec<Trip>, StoreError> {
        Ok(self
            .trips
            .iter()
            .filter(|t| t.owner_id == owner_id)
            .map(|t| t.value().clone())
            .collect())
    }

    async fn insert_trip(&self, trip: &Trip) -> Result<(), StoreError> {
        self.trips.insert(trip.id.clone(), trip.clone());
        Ok(())
    }

    async fn replace_trip(&self, trip: &Trip, expected_version: u64) -> Result<(), StoreError> {
        // The shard write lock is held for the compare and the swap.
        let mut stored = self
            .trips
            .get_mut(&trip.id)
            .ok_or_else(|| StoreError::Missing(trip.id.clone()))?;

        if stored.version != expected_version {
            return Err(StoreError::Conflict {
                id: trip.id.clone(),
                expected: expected_version,
                actual: stored.version,
            });
        }

        *stored = trip.clone();
        Ok(())
    }

    async fn delete_trip(&self, trip_id: &str) -> Result<bool, StoreError> {
        Ok(self.trips.remove(trip_id).is_some())
    }
}

#[async_trait]
impl ProfileStore for MemoryDb {
    async fn get_profile(&self, subject: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.profiles.get(subject).map(|p| p.value().clone()))
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        self.profiles.insert(profile.id.clone(), profile.clone());
        Ok(())
    }
}
