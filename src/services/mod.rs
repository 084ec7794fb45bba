// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod profiles;
pub mod trips;
pub mod verifier;

pub use profiles::{ProfileError, ProfileService};
pub use trips::{TripError, TripService};
pub use verifier::{JwtVerifier, TokenVerifier, VerifiedIdentity};
