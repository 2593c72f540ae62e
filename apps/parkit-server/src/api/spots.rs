// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Parking spot catalog endpoints.
//!
//! Browsing is public. A signed-in caller viewing a spot's details also gets
//! the view recorded in their recently viewed list.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    api::extract::ApiQuery,
    auth::OptionalAuth,
    catalog::{SpotSearch, DEFAULT_NEARBY_RADIUS_KM},
    error::ApiError,
    models::{NearbySpot, ParkingSpot, Quote, SortOption, SpotId},
    pricing,
    state::AppState,
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SpotListQuery {
    /// Case-insensitive text matched against name or address.
    pub q: Option<String>,
    /// Result ordering (default `distance`).
    pub sort: Option<SortOption>,
    /// Only spots offering this amenity, e.g. `EV Charging`.
    pub amenity: Option<String>,
    /// Maximum hourly rate in rupees.
    pub max_rate: Option<u32>,
    /// Caller latitude, used by `sort=distance`.
    pub lat: Option<f64>,
    /// Caller longitude, used by `sort=distance`.
    pub lon: Option<f64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lon: f64,
    /// Search radius in kilometres (default 5).
    pub radius_km: Option<f64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuoteQuery {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

fn validate_coordinates(lat: f64, lon: f64) -> Result<(), ApiError> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(ApiError::bad_request(
            "lat must be within [-90, 90] and lon within [-180, 180]",
        ));
    }
    Ok(())
}

pub(crate) fn find_spot<'a>(state: &'a AppState, spot_id: &SpotId) -> Result<&'a ParkingSpot, ApiError> {
    state
        .catalog
        .find(spot_id)
        .ok_or_else(|| ApiError::not_found("Parking spot not found"))
}

/// Search and sort parking spots.
#[utoipa::path(
    get,
    path = "/v1/spots",
    tag = "Spots",
    params(SpotListQuery),
    responses(
        (status = 200, description = "Matching spots", body = [ParkingSpot]),
        (status = 400, description = "Invalid coordinates")
    )
)]
pub async fn list_spots(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SpotListQuery>,
) -> Result<Json<Vec<ParkingSpot>>, ApiError> {
    let origin = match (params.lat, params.lon) {
        (Some(lat), Some(lon)) => {
            validate_coordinates(lat, lon)?;
            Some((lat, lon))
        }
        (None, None) => None,
        _ => return Err(ApiError::bad_request("lat and lon must be given together")),
    };

    let search = SpotSearch {
        query: params.q,
        amenity: params.amenity,
        max_rate: params.max_rate,
        sort: params.sort.unwrap_or_default(),
        origin,
    };

    Ok(Json(state.catalog.search(&search)))
}

/// Spots within a radius of a point, nearest first.
#[utoipa::path(
    get,
    path = "/v1/spots/nearby",
    tag = "Spots",
    params(NearbyQuery),
    responses(
        (status = 200, description = "Spots with distance", body = [NearbySpot]),
        (status = 400, description = "Invalid coordinates or radius")
    )
)]
pub async fn nearby_spots(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<NearbyQuery>,
) -> Result<Json<Vec<NearbySpot>>, ApiError> {
    validate_coordinates(params.lat, params.lon)?;

    let radius_km = params.radius_km.unwrap_or(DEFAULT_NEARBY_RADIUS_KM);
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(ApiError::bad_request("radius_km must be a positive number"));
    }

    Ok(Json(state.catalog.nearby(params.lat, params.lon, radius_km)))
}

/// Spot details.
///
/// When called with a valid bearer token the spot is added to the caller's
/// recently viewed list.
#[utoipa::path(
    get,
    path = "/v1/spots/{spot_id}",
    tag = "Spots",
    params(
        ("spot_id" = String, Path, description = "Spot ID, e.g. p001")
    ),
    responses(
        (status = 200, description = "Spot details", body = ParkingSpot),
        (status = 404, description = "Spot not found")
    )
)]
pub async fn get_spot(
    OptionalAuth(user): OptionalAuth,
    State(state): State<AppState>,
    Path(spot_id): Path<SpotId>,
) -> Result<Json<ParkingSpot>, ApiError> {
    let spot = find_spot(&state, &spot_id)?.clone();

    if let Some(user) = user {
        state
            .store
            .write()
            .await
            .record_view(&user.user_id, spot.id.clone());
    }

    Ok(Json(spot))
}

/// Price a prospective booking window without creating it.
#[utoipa::path(
    get,
    path = "/v1/spots/{spot_id}/quote",
    tag = "Spots",
    params(
        ("spot_id" = String, Path, description = "Spot ID"),
        QuoteQuery
    ),
    responses(
        (status = 200, description = "Price quote", body = Quote),
        (status = 400, description = "End time is not after start time"),
        (status = 404, description = "Spot not found")
    )
)]
pub async fn quote_spot(
    State(state): State<AppState>,
    Path(spot_id): Path<SpotId>,
    ApiQuery(params): ApiQuery<QuoteQuery>,
) -> Result<Json<Quote>, ApiError> {
    let spot = find_spot(&state, &spot_id)?;
    let quote = pricing::quote(spot, params.start_time, params.end_time)?;
    Ok(Json(quote))
}
