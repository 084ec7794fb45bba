// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile service.

use crate::db::{ProfileStore, StoreError};
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::models::{ProfilePatch, UserProfile};
use chrono::Utc;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ProfileError> for AppError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::Store(e) => e.into(),
        }
    }
}

#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Fetch the caller's profile, creating it from the identity on first use.
    pub async fn get_or_create(&self, user: &AuthUser) -> Result<UserProfile, ProfileError> {
        if let Some(profile) = self.store.get_profile(&user.subject).await? {
            return Ok(profile);
        }

        let now = Utc::now();
        let profile = UserProfile {
            id: user.subject.clone(),
            email: user.email.clone(),
            display_name: user.name.clone(),
            home_dropzone_id: None,
            license_number: None,
            total_jumps: None,
            created_at: now,
            updated_at: now,
        };
        self.store.upsert_profile(&profile).await?;

        tracing::info!(subject = %user.subject, "Created user profile");
        Ok(profile)
    }

    pub async fn update(
        &self,
        user: &AuthUser,
        patch: ProfilePatch,
    ) -> Result<UserProfile, ProfileError> {
        let mut profile = self.get_or_create(user).await?;

        if let Some(display_name) = patch.display_name {
            profile.display_name = Some(display_name);
        }
        if let Some(home_dropzone_id) = patch.home_dropzone_id {
            profile.home_dropzone_id = Some(home_dropzone_id);
        }
        if let Some(license_number) = patch.license_number {
            profile.license_number = Some(license_number);
        }
        if let Some(total_jumps) = patch.total_jumps {
            profile.total_jumps = Some(total_jumps);
        }
        profile.updated_at = Utc::now();

        self.store.upsert_profile(&profile).await?;
        tracing::info!(subject = %user.subject, "Updated user profile");
        Ok(profile)
    }
}
