// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Gate staff endpoints.
//!
//! Staff scan the QR code a customer shows at the entrance, look the booking
//! up, and approve or reject entry. All routes require the staff role.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use crate::{
    api::{extract::ApiJson, spots::find_spot},
    auth::StaffOnly,
    error::ApiError,
    models::{CheckInDecision, CheckInRequest, CheckInResponse, ScannedBooking, SpotId, SpotSummary},
    state::AppState,
    storage::ProfileRepository,
    store::is_admissible,
};

/// Look up a scanned booking.
#[utoipa::path(
    get,
    path = "/v1/staff/bookings/{booking_id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(
        ("booking_id" = String, Path, description = "Booking ID from the QR code")
    ),
    responses(
        (status = 200, description = "Booking with holder details", body = ScannedBooking),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Staff role required"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn scan_booking(
    StaffOnly(staff): StaffOnly,
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<ScannedBooking>, ApiError> {
    let booking = state.store.read().await.booking(&booking_id)?;

    let spot_name = state
        .catalog
        .find(&booking.parking_id)
        .map(|spot| spot.name.clone())
        .unwrap_or_else(|| booking.parking_id.to_string());

    let storage = state.storage();
    let profile = ProfileRepository::new(&storage).find(&booking.user_id)?;
    let valid = is_admissible(&booking, Utc::now());

    tracing::info!(
        booking_id = %booking.id,
        staff_id = %staff.user_id,
        valid,
        "Booking scanned"
    );

    Ok(Json(ScannedBooking {
        customer_name: profile.as_ref().and_then(|p| p.full_name.clone()),
        customer_phone: profile.and_then(|p| p.phone),
        spot_name,
        valid,
        booking,
    }))
}

/// Approve or reject entry for a booking.
///
/// Approval moves a confirmed, unexpired booking to `checked-in`. Rejection
/// leaves the booking unchanged.
#[utoipa::path(
    post,
    path = "/v1/staff/check-in",
    tag = "Staff",
    security(("bearer_auth" = [])),
    request_body = CheckInRequest,
    responses(
        (status = 200, description = "Decision recorded", body = CheckInResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Staff role required"),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Booking is not confirmed or has expired")
    )
)]
pub async fn check_in(
    StaffOnly(staff): StaffOnly,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CheckInRequest>,
) -> Result<Json<CheckInResponse>, ApiError> {
    let mut store = state.store.write().await;

    if !request.approve {
        let booking = store.booking(&request.booking_id)?;
        tracing::info!(
            booking_id = %booking.id,
            staff_id = %staff.user_id,
            "Check-in rejected"
        );
        return Ok(Json(CheckInResponse {
            decision: CheckInDecision::Rejected,
            booking,
        }));
    }

    let booking = store.check_in(&request.booking_id, Utc::now())?;
    tracing::info!(
        booking_id = %booking.id,
        staff_id = %staff.user_id,
        spot_id = %booking.parking_id,
        "Check-in approved"
    );

    Ok(Json(CheckInResponse {
        decision: CheckInDecision::Approved,
        booking,
    }))
}

/// Availability and today's check-ins for one spot.
#[utoipa::path(
    get,
    path = "/v1/staff/spots/{spot_id}/summary",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(
        ("spot_id" = String, Path, description = "Spot ID")
    ),
    responses(
        (status = 200, description = "Spot summary", body = SpotSummary),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Staff role required"),
        (status = 404, description = "Spot not found")
    )
)]
pub async fn spot_summary(
    StaffOnly(_staff): StaffOnly,
    State(state): State<AppState>,
    Path(spot_id): Path<SpotId>,
) -> Result<Json<SpotSummary>, ApiError> {
    let spot = find_spot(&state, &spot_id)?;
    let today = Utc::now().date_naive();
    let check_ins_today = state.store.read().await.check_ins_on(&spot.id, today);

    Ok(Json(SpotSummary {
        spot_id: spot.id.clone(),
        spot_name: spot.name.clone(),
        available_spots: spot.available_spots,
        total_spots: spot.total_spots,
        check_ins_today,
    }))
}
