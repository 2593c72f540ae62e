// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Vehicle management endpoints.
//!
//! All operations require authentication and enforce ownership.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    api::extract::ApiJson,
    auth::Auth,
    error::ApiError,
    state::AppState,
    storage::{OwnershipEnforcer, StoredVehicle, VehicleRepository},
};

/// Request to register a vehicle.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateVehicleRequest {
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub year: Option<String>,
    pub license_plate: String,
}

/// Response containing a list of vehicles.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VehicleListResponse {
    pub vehicles: Vec<StoredVehicle>,
    pub total: usize,
}

fn required(value: &str, field: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::bad_request(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// List the caller's vehicles, oldest first.
#[utoipa::path(
    get,
    path = "/v1/vehicles",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of vehicles", body = VehicleListResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_vehicles(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<VehicleListResponse>, ApiError> {
    let storage = state.storage();
    let vehicles = VehicleRepository::new(&storage).list_by_owner(&user.user_id)?;
    let total = vehicles.len();
    Ok(Json(VehicleListResponse { vehicles, total }))
}

/// Register a vehicle.
#[utoipa::path(
    post,
    path = "/v1/vehicles",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    request_body = CreateVehicleRequest,
    responses(
        (status = 201, description = "Vehicle added", body = StoredVehicle),
        (status = 400, description = "Missing make, model or plate"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Plate already registered")
    )
)]
pub async fn add_vehicle(
    Auth(user): Auth,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<StoredVehicle>), ApiError> {
    let vehicle = StoredVehicle {
        id: uuid::Uuid::new_v4().to_string(),
        owner_user_id: user.user_id.clone(),
        make: required(&request.make, "make")?,
        model: required(&request.model, "model")?,
        year: request
            .year
            .map(|y| y.trim().to_string())
            .filter(|y| !y.is_empty()),
        license_plate: required(&request.license_plate, "license_plate")?,
        created_at: Utc::now(),
    };

    let storage = state.storage();
    VehicleRepository::new(&storage).create(&vehicle)?;

    tracing::info!(vehicle_id = %vehicle.id, user_id = %user.user_id, "Vehicle added");
    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// Remove one of the caller's vehicles.
#[utoipa::path(
    delete,
    path = "/v1/vehicles/{vehicle_id}",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(
        ("vehicle_id" = String, Path, description = "Vehicle ID")
    ),
    responses(
        (status = 204, description = "Vehicle removed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn delete_vehicle(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let storage = state.storage();
    let repo = VehicleRepository::new(&storage);

    repo.get(&vehicle_id)?.verify_ownership(&user)?;
    repo.delete(&vehicle_id)?;

    tracing::info!(vehicle_id = %vehicle_id, user_id = %user.user_id, "Vehicle removed");
    Ok(StatusCode::NO_CONTENT)
}
