// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! SkyNav: trip planning for skydivers.
//!
//! This crate provides the backend API for planning trips to dropzones:
//! trips with embedded travel segments (flights, drives, lodging) and a
//! preparation checklist, scoped to the authenticated owner.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod validation;

use config::Config;
use services::{ProfileService, TokenVerifier, TripService};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub trips: TripService,
    pub profiles: ProfileService,
    pub verifier: Arc<dyn TokenVerifier>,
}
