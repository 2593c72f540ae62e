// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Profile endpoints.
//!
//! The identity provider owns credentials; the profile only holds what the
//! user chooses to show (name, contact details, avatar).

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    api::extract::ApiJson,
    auth::Auth,
    error::ApiError,
    state::AppState,
    storage::{ProfileChanges, ProfileRepository, StoredProfile},
};

/// Fields to change. Omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    /// Digits, spaces, `+` and `-` only.
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
}

impl UpdateProfileRequest {
    fn into_changes(self) -> Result<ProfileChanges, ApiError> {
        let full_name = match self.full_name {
            Some(name) if name.trim().is_empty() => {
                return Err(ApiError::bad_request("full_name must not be empty"))
            }
            other => other.map(|name| name.trim().to_string()),
        };

        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(ApiError::bad_request("email is not a valid address"));
            }
        }

        if let Some(phone) = &self.phone {
            let allowed = phone
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-'));
            if !allowed || !phone.chars().any(|c| c.is_ascii_digit()) {
                return Err(ApiError::bad_request(
                    "phone may only contain digits, spaces, '+' and '-'",
                ));
            }
        }

        Ok(ProfileChanges {
            full_name,
            email: self.email.map(|e| e.trim().to_string()),
            phone: self.phone.map(|p| p.trim().to_string()),
            avatar_url: self.avatar_url,
        })
    }
}

/// Get the caller's profile.
#[utoipa::path(
    get,
    path = "/v1/profile",
    tag = "Profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile", body = StoredProfile),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No profile saved yet")
    )
)]
pub async fn get_profile(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<StoredProfile>, ApiError> {
    let storage = state.storage();
    let profile = ProfileRepository::new(&storage).get(&user.user_id)?;
    Ok(Json(profile))
}

/// Create or update the caller's profile.
#[utoipa::path(
    put,
    path = "/v1/profile",
    tag = "Profile",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = StoredProfile),
        (status = 400, description = "Invalid field"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn update_profile(
    Auth(user): Auth,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> Result<Json<StoredProfile>, ApiError> {
    let changes = request.into_changes()?;
    let storage = state.storage();
    let profile = ProfileRepository::new(&storage).upsert(&user.user_id, changes, Utc::now())?;

    tracing::info!(user_id = %user.user_id, "Profile updated");
    Ok(Json(profile))
}
