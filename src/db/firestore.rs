// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Trips (one document per trip, segments and checklist embedded)
//! - Profiles (one document per authenticated subject)

use crate::db::{collections, ProfileStore, StoreError, TripStore};
use crate::models::{Trip, UserProfile};
use async_trait::async_trait;
use firestore::errors::FirestoreError;
use firestore::FirestoreConsistencySelector;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

fn backend_error(e: impl std::fmt::Display) -> StoreError {
    StoreError::Backend(e.to_string())
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, StoreError> {
        // The emulator rejects real credentials, so skip the default token source.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, StoreError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            StoreError::Backend(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, StoreError> {
        self.client
            .as_ref()
            .ok_or_else(|| StoreError::Backend("Database not connected (offline mode)".to_string()))
    }
}

// ─── Trip Operations ─────────────────────────────────────────

#[async_trait]
impl TripStore for FirestoreDb {
    async fn get_trip(&self, trip_id: &str) -> Result<Option<Trip>, StoreError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::TRIPS)
            .obj()
            .one(trip_id)
            .await
            .map_err(backend_error)
    }

    async fn list_trips(&self, owner_id: &str) -> Result<Vec<Trip>, StoreError> {
        let owner_id = owner_id.to_string();

        self.get_client()?
            .fluent()
            .select()
            .from(collections::TRIPS)
            .filter(move |q| q.for_all([q.field("ownerId").eq(owner_id.clone())]))
            .obj::<Trip>()
            .query()
            .await
            .map_err(backend_error)
    }

    async fn insert_trip(&self, trip: &Trip) -> Result<(), StoreError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::TRIPS)
            .document_id(&trip.id)
            .object(trip)
            .execute()
            .await
            .map_err(backend_error)?;
        Ok(())
    }

    /// Version-checked overwrite inside a Firestore transaction.
    ///
    /// The version is read through the transaction, so a writer that commits
    /// between our read and our commit makes Firestore abort the commit.
    async fn replace_trip(&self, trip: &Trip, expected_version: u64) -> Result<(), StoreError> {
        let client = self.get_client()?;

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to begin transaction: {}", e)))?;

        let reader = client.clone_with_consistency_selector(
            FirestoreConsistencySelector::Transaction(transaction.transaction_id().clone()),
        );

        let current: Option<Trip> = reader
            .fluent()
            .select()
            .by_id_in(collections::TRIPS)
            .obj()
            .one(&trip.id)
            .await
            .map_err(|e| {
                StoreError::Backend(format!("Failed to read trip in transaction: {}", e))
            })?;

        let actual = match current {
            Some(stored) => stored.version,
            None => {
                let _ = transaction.rollback().await;
                return Err(StoreError::Missing(trip.id.clone()));
            }
        };

        if actual != expected_version {
            let _ = transaction.rollback().await;
            tracing::warn!(
                trip_id = %trip.id,
                expected = expected_version,
                actual,
                "Trip version conflict"
            );
            return Err(StoreError::Conflict {
                id: trip.id.clone(),
                expected: expected_version,
                actual,
            });
        }

        client
            .fluent()
            .update()
            .in_col(collections::TRIPS)
            .document_id(&trip.id)
            .object(trip)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                StoreError::Backend(format!("Failed to add trip to transaction: {}", e))
            })?;

        transaction
            .commit()
            .await
            .map_err(|e| match e {
                FirestoreError::DatabaseError(ref db_err) if db_err.retry_possible => {
                    tracing::warn!(trip_id = %trip.id, error = %e, "Trip commit contended");
                    StoreError::Contended(trip.id.clone())
                }
                other => StoreError::Backend(format!("Transaction commit failed: {}", other)),
            })?;

        Ok(())
    }

    async fn delete_trip(&self, trip_id: &str) -> Result<bool, StoreError> {
        if self.get_trip(trip_id).await?.is_none() {
            return Ok(false);
        }

        self.get_client()?
            .fluent()
            .delete()
            .from(collections::TRIPS)
            .document_id(trip_id)
            .execute()
            .await
            .map_err(backend_error)?;
        Ok(true)
    }
}

// ─── Profile Operations ──────────────────────────────────────

#[async_trait]
impl ProfileStore for FirestoreDb {
    async fn get_profile(&self, subject: &str) -> Result<Option<UserProfile>, StoreError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::PROFILES)
            .obj()
            .one(subject)
            .await
            .map_err(backend_error)
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::PROFILES)
            .document_id(&profile.id)
            .object(profile)
            .execute()
            .await
            .map_err(backend_error)?;
        Ok(())
    }
}
