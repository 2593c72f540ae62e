// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Validation};

use super::claims::IdentityClaims;
use super::{AuthError, AuthenticatedUser, JwksManager};
use crate::state::{AppState, AuthConfig};

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Extractor for authenticated users.
///
/// ## Authentication Modes
///
/// - **Production mode** (`AUTH_JWKS_URL` set): signature, expiry, issuer and
///   audience are verified against the identity provider's JWKS
/// - **Development mode** (no `AUTH_JWKS_URL`): claims are decoded without a
///   signature check; expiry is still enforced
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>().cloned() {
            return Ok(Auth(user));
        }

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?;

        let user = verify_jwt(token, &state.auth_config).await?;
        parts.extensions.insert(user.clone());

        Ok(Auth(user))
    }
}

async fn verify_jwt(token: &str, auth_config: &AuthConfig) -> Result<AuthenticatedUser, AuthError> {
    let claims = match auth_config.jwks {
        Some(ref jwks) => verify_jwt_production(token, jwks, auth_config).await?,
        None => verify_jwt_development(token)?,
    };
    Ok(AuthenticatedUser::from_claims(claims))
}

async fn verify_jwt_production(
    token: &str,
    jwks: &JwksManager,
    auth_config: &AuthConfig,
) -> Result<IdentityClaims, AuthError> {
    let header = decode_header(token).map_err(|_| AuthError::MalformedToken)?;

    let (decoding_key, algorithm) = match &header.kid {
        Some(kid) => jwks.get_decoding_key(kid).await?,
        None => jwks.get_any_decoding_key().await?,
    };

    let mut validation = Validation::new(algorithm);
    validation.leeway = CLOCK_SKEW_LEEWAY;

    if let Some(ref issuer) = auth_config.issuer {
        validation.set_issuer(&[issuer]);
    }

    match auth_config.audience {
        Some(ref audience) => validation.set_audience(&[audience]),
        None => validation.validate_aud = false,
    }

    let token_data = decode::<IdentityClaims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "JWT rejected");
        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
            ErrorKind::InvalidAudience => AuthError::InvalidAudience,
            ErrorKind::ImmatureSignature => AuthError::TokenNotYetValid,
            _ => AuthError::MalformedToken,
        }
    })?;

    Ok(token_data.claims)
}

/// Development JWT decoding (no signature check).
///
/// WARNING: only reachable when no JWKS URL is configured.
fn verify_jwt_development(token: &str) -> Result<IdentityClaims, AuthError> {
    let token_data = jsonwebtoken::dangerous::insecure_decode::<IdentityClaims>(token)
        .map_err(|_| AuthError::MalformedToken)?;

    let claims = token_data.claims;
    let now = chrono::Utc::now().timestamp();

    if claims.exp > 0 && claims.exp < now - CLOCK_SKEW_LEEWAY as i64 {
        return Err(AuthError::TokenExpired);
    }

    Ok(claims)
}

/// Extractor that requires the staff role (admins included).
pub struct StaffOnly(pub AuthenticatedUser);

impl FromRequestParts<AppState> for StaffOnly {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Auth(user) = Auth::from_request_parts(parts, state).await?;

        if !user.is_staff() {
            tracing::info!(user_id = %user.user_id, role = %user.role, "Staff endpoint refused");
            return Err(AuthError::InsufficientPermissions);
        }

        Ok(StaffOnly(user))
    }
}

/// Optional authentication extractor.
///
/// Yields `None` instead of rejecting when the request carries no valid token.
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match Auth::from_request_parts(parts, state).await {
            Ok(Auth(user)) => Ok(OptionalAuth(Some(user))),
            Err(_) => Ok(OptionalAuth(None)),
        }
    }
}
