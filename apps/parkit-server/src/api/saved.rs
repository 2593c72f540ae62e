// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Saved and recently viewed spots.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    api::spots::find_spot,
    auth::Auth,
    error::ApiError,
    models::{ParkingSpot, SpotId},
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct SaveSpotResponse {
    pub spot_id: SpotId,
    /// `false` when the spot was already saved.
    pub newly_saved: bool,
}

/// Resolve ids against the catalog, dropping any the catalog no longer knows.
fn resolve(state: &AppState, ids: Vec<SpotId>) -> Vec<ParkingSpot> {
    ids.iter()
        .filter_map(|id| state.catalog.find(id).cloned())
        .collect()
}

/// Bookmark a spot.
#[utoipa::path(
    post,
    path = "/v1/spots/{spot_id}/save",
    tag = "Saved",
    security(("bearer_auth" = [])),
    params(
        ("spot_id" = String, Path, description = "Spot ID")
    ),
    responses(
        (status = 201, description = "Spot saved", body = SaveSpotResponse),
        (status = 200, description = "Spot was already saved", body = SaveSpotResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Spot not found")
    )
)]
pub async fn save_spot(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(spot_id): Path<SpotId>,
) -> Result<(StatusCode, Json<SaveSpotResponse>), ApiError> {
    find_spot(&state, &spot_id)?;

    let newly_saved = state
        .store
        .write()
        .await
        .save_spot(&user.user_id, spot_id.clone());

    let status = if newly_saved {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(SaveSpotResponse {
            spot_id,
            newly_saved,
        }),
    ))
}

/// Remove a bookmark.
#[utoipa::path(
    delete,
    path = "/v1/spots/{spot_id}/save",
    tag = "Saved",
    security(("bearer_auth" = [])),
    params(
        ("spot_id" = String, Path, description = "Spot ID")
    ),
    responses(
        (status = 204, description = "Bookmark removed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Spot is not saved")
    )
)]
pub async fn unsave_spot(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(spot_id): Path<SpotId>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .write()
        .await
        .unsave_spot(&user.user_id, &spot_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Spots the caller has saved, in id order.
#[utoipa::path(
    get,
    path = "/v1/saved",
    tag = "Saved",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Saved spots", body = [ParkingSpot]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_saved(Auth(user): Auth, State(state): State<AppState>) -> Json<Vec<ParkingSpot>> {
    let ids = state.store.read().await.saved_spots(&user.user_id);
    Json(resolve(&state, ids))
}

/// Spots the caller viewed recently, most recent first.
#[utoipa::path(
    get,
    path = "/v1/recent",
    tag = "Saved",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Recently viewed spots (max 10)", body = [ParkingSpot]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_recent(Auth(user): Auth, State(state): State<AppState>) -> Json<Vec<ParkingSpot>> {
    let ids = state.store.read().await.recent_spots(&user.user_id);
    Json(resolve(&state, ids))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{test_state, test_user};
    use crate::auth::Role;

    #[tokio::test]
    async fn save_list_and_unsave() {
        let (state, _dir) = test_state();
        let user = test_user("user-1", Role::Customer);

        let (status, Json(body)) = save_spot(
            Auth(user.clone()),
            State(state.clone()),
            Path(SpotId::from("p004")),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert!(body.newly_saved);

        let (status, Json(body)) = save_spot(
            Auth(user.clone()),
            State(state.clone()),
            Path(SpotId::from("p004")),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::OK);
        assert!(!body.newly_saved);

        let Json(saved) = list_saved(Auth(user.clone()), State(state.clone())).await;
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name, "Koramangala Forum Mall");

        let status = unsave_spot(
            Auth(user.clone()),
            State(state.clone()),
            Path(SpotId::from("p004")),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let err = unsave_spot(Auth(user), State(state), Path(SpotId::from("p004")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn saving_unknown_spot_is_not_found() {
        let (state, _dir) = test_state();
        let err = save_spot(
            Auth(test_user("user-1", Role::Customer)),
            State(state),
            Path(SpotId::from("p042")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn recent_lists_most_recent_first() {
        let (state, _dir) = test_state();
        {
            let mut store = state.store.write().await;
            store.record_view("user-1", SpotId::from("p001"));
            store.record_view("user-1", SpotId::from("p002"));
            store.record_view("user-1", SpotId::from("p001"));
        }

        let Json(recent) = list_recent(Auth(test_user("user-1", Role::Customer)), State(state)).await;
        let ids: Vec<&str> = recent.iter().map(|s| s.id.0.as_str()).collect();
        assert_eq!(ids, vec!["p001", "p002"]);
    }
}
