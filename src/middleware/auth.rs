// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer authentication middleware.

use crate::error::AppError;
use crate::services::verifier::AuthError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Cookie the PWA uses to hold the session token.
pub const SESSION_COOKIE: &str = "skynav_token";

/// Authenticated user extracted from the credential.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub subject: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub roles: BTreeSet<String>,
}

/// Pull the token out of `Authorization: Bearer ...`.
fn bearer_token(headers: &HeaderMap) -> Result<Option<String>, AuthError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| AuthError::Malformed("authorization header is not ASCII".to_string()))?;

    // Scheme names are case-insensitive.
    let token = match (value.get(..7), value.get(7..)) {
        (Some(scheme), Some(rest)) if scheme.eq_ignore_ascii_case("bearer ") => Some(rest),
        _ => None,
    };

    match token {
        Some(token) if !token.trim().is_empty() => Ok(Some(token.trim().to_string())),
        Some(_) => Err(AuthError::MissingCredential),
        None => Err(AuthError::Malformed(
            "authorization scheme must be Bearer".to_string(),
        )),
    }
}

/// Middleware that requires a valid credential.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Header first, then cookie
    let token = match bearer_token(request.headers())? {
        Some(token) => token,
        None => jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(AuthError::MissingCredential)?,
    };

    let identity = state.verifier.verify(&token).await.map_err(|err| {
        tracing::debug!(error = %err, "Rejected credential");
        err
    })?;

    request.extensions_mut().insert(AuthUser {
        subject: identity.subject,
        email: identity.email,
        name: identity.name,
        roles: identity.roles,
    });

    Ok(next.run(request).await)
}
