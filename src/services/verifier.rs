// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer token verification.
//!
//! The identity provider issues HS256-signed JWTs. Handlers only see the
//! [`VerifiedIdentity`] produced here, so tests can swap in any
//! [`TokenVerifier`].

use crate::config::Config;
use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identity extracted from a valid credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub subject: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub roles: BTreeSet<String>,
}

/// Authentication failure categories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("missing credential")]
    MissingCredential,

    #[error("malformed credential: {0}")]
    Malformed(String),

    #[error("credential expired")]
    Expired,

    /// Operator error, not the caller's fault.
    #[error("token verifier misconfigured: {0}")]
    Misconfigured(String),
}

impl AuthError {
    /// Message safe to show to the caller.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "Authentication required",
            AuthError::Malformed(_) => "Token invalid",
            AuthError::Expired => "Session expired, sign in again",
            AuthError::Misconfigured(_) => "Authentication service misconfigured",
        }
    }
}

/// Verifies bearer credentials.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError>;
}

/// JWT claims issued by the identity provider.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (stable user id)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// HS256 JWT verifier using the shared signing key from configuration.
pub struct JwtVerifier {
    signing_key: Vec<u8>,
    issuer: Option<String>,
    audience: Option<String>,
}

impl JwtVerifier {
    pub fn new(config: &Config) -> Self {
        Self {
            signing_key: config.jwt_signing_key.clone(),
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // A configured iss/aud must also be present in the token.
        match &self.issuer {
            Some(iss) => {
                validation.set_issuer(&[iss]);
                validation.required_spec_claims.insert("iss".to_string());
            }
            None => validation.iss = None,
        }
        match &self.audience {
            Some(aud) => {
                validation.set_audience(&[aud]);
                validation.required_spec_claims.insert("aud".to_string());
            }
            None => validation.validate_aud = false,
        }
        validation
    }
}

#[async_trait]
impl TokenVerifier for JwtVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
        if self.signing_key.is_empty() {
            return Err(AuthError::Misconfigured(
                "JWT signing key is empty".to_string(),
            ));
        }

        let key = DecodingKey::from_secret(&self.signing_key);
        let token_data =
            decode::<Claims>(token, &key, &self.validation()).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::InvalidKeyFormat | ErrorKind::InvalidAlgorithmName => {
                    AuthError::Misconfigured(e.to_string())
                }
                _ => AuthError::Malformed(e.to_string()),
            })?;

        let claims = token_data.claims;
        if claims.sub.trim().is_empty() {
            return Err(AuthError::Malformed("empty subject".to_string()));
        }

        Ok(VerifiedIdentity {
            subject: claims.sub,
            email: claims.email,
            name: claims.name,
            roles: claims.roles.into_iter().collect(),
        })
    }
}

/// Create a session JWT. Used by local tooling and tests to mint credentials
/// the way the identity provider does.
pub fn create_jwt(
    subject: &str,
    email: Option<&str>,
    signing_key: &[u8],
    ttl_secs: i64,
) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: subject.to_string(),
        iat: now.max(0) as usize,
        exp: (now + ttl_secs).max(0) as usize,
        email: email.map(str::to_string),
        name: None,
        roles: vec!["user".to_string()],
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}
