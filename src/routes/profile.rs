// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Current user profile.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::UserProfile;
use crate::routes::extract::ApiJson;
use crate::validation::{validate_profile_update, UpdateProfileRequest};
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/me", get(get_me).put(update_me))
}

/// Get the caller's profile, creating it on first access.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserProfile>> {
    let profile = state.profiles.get_or_create(&user).await?;
    Ok(Json(profile))
}

async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiJson(body): ApiJson<UpdateProfileRequest>,
) -> Result<Json<UserProfile>> {
    let patch = validate_profile_update(&body)?;
    let profile = state.profiles.update(&user, patch).await?;
    Ok(Json(profile))
}
