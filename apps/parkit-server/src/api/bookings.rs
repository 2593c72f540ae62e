// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Booking API endpoints.
//!
//! A booking is created in one step: the client picks a window and a payment
//! method, the server prices it and returns it confirmed with a QR code.
//! No payment is processed. Customers only see their own bookings; another
//! user's booking id answers 404.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    api::{extract::ApiJson, spots::find_spot},
    auth::{Auth, AuthenticatedUser},
    error::ApiError,
    models::{Booking, CreateBookingRequest},
    state::AppState,
    storage::OwnershipEnforcer,
    store::InMemoryStore,
};

/// The caller's current booking, if any.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActiveBookingResponse {
    pub booking: Option<Booking>,
}

/// Create a confirmed booking.
#[utoipa::path(
    post,
    path = "/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking confirmed", body = Booking),
        (status = 400, description = "Invalid window or no payment method"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Spot not found")
    )
)]
pub async fn create_booking(
    Auth(user): Auth,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let payment_method = request
        .payment_method
        .ok_or_else(|| ApiError::bad_request("Please select a payment method"))?;
    let spot = find_spot(&state, &request.spot_id)?;

    let booking = state.store.write().await.create_booking(
        &user.user_id,
        spot,
        request.start_time,
        request.end_time,
        payment_method,
        Utc::now(),
    )?;

    tracing::info!(
        booking_id = %booking.id,
        user_id = %user.user_id,
        spot_id = %booking.parking_id,
        total_amount = booking.total_amount,
        payment_method = ?booking.payment_method,
        "Booking confirmed"
    );

    Ok((StatusCode::CREATED, Json(booking)))
}

/// List the caller's bookings in creation order.
#[utoipa::path(
    get,
    path = "/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bookings", body = [Booking]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_bookings(Auth(user): Auth, State(state): State<AppState>) -> Json<Vec<Booking>> {
    Json(state.store.read().await.bookings_for_user(&user.user_id))
}

/// The booking the caller made most recently that is still open.
#[utoipa::path(
    get,
    path = "/v1/bookings/active",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active booking or null", body = ActiveBookingResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn active_booking(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Json<ActiveBookingResponse> {
    let booking = state.store.read().await.active_booking(&user.user_id);
    Json(ActiveBookingResponse { booking })
}

/// Get a booking by ID.
///
/// Owners, staff and admins may read it.
#[utoipa::path(
    get,
    path = "/v1/bookings/{booking_id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(
        ("booking_id" = String, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking", body = Booking),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<Booking>, ApiError> {
    let booking = state.store.read().await.booking(&booking_id)?;
    if !user.is_staff() {
        booking.verify_ownership(&user)?;
    }
    Ok(Json(booking))
}

/// The booking, if `user` owns it.
fn owned_booking(
    store: &InMemoryStore,
    booking_id: &str,
    user: &AuthenticatedUser,
) -> Result<Booking, ApiError> {
    let booking = store.booking(booking_id)?;
    booking.verify_ownership(user)?;
    Ok(booking)
}

/// Mark a booking completed.
#[utoipa::path(
    post,
    path = "/v1/bookings/{booking_id}/complete",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(
        ("booking_id" = String, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking completed", body = Booking),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Booking already completed or cancelled")
    )
)]
pub async fn complete_booking(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<Booking>, ApiError> {
    let mut store = state.store.write().await;
    owned_booking(&store, &booking_id, &user)?;
    let booking = store.complete_booking(&booking_id)?;

    tracing::info!(booking_id = %booking.id, user_id = %user.user_id, "Booking completed");
    Ok(Json(booking))
}

/// Cancel a booking that has not been checked in.
#[utoipa::path(
    post,
    path = "/v1/bookings/{booking_id}/cancel",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(
        ("booking_id" = String, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking cancelled", body = Booking),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Booking can no longer be cancelled")
    )
)]
pub async fn cancel_booking(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<Booking>, ApiError> {
    let mut store = state.store.write().await;
    owned_booking(&store, &booking_id, &user)?;
    let booking = store.cancel_booking(&booking_id)?;

    tracing::info!(booking_id = %booking.id, user_id = %user.user_id, "Booking cancelled");
    Ok(Json(booking))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{test_state, test_user};
    use crate::auth::Role;
    use crate::models::{BookingStatus, PaymentMethod, SpotId};
    use chrono::Duration;

    fn request(spot: &str, hours: i64) -> CreateBookingRequest {
        let start = Utc::now() + Duration::hours(1);
        CreateBookingRequest {
            spot_id: SpotId::from(spot),
            start_time: start,
            end_time: start + Duration::hours(hours),
            payment_method: Some(PaymentMethod::Gpay),
        }
    }

    async fn book(state: &AppState, user_id: &str, spot: &str) -> Booking {
        let (_, Json(booking)) = create_booking(
            Auth(test_user(user_id, Role::Customer)),
            State(state.clone()),
            ApiJson(request(spot, 2)),
        )
        .await
        .unwrap();
        booking
    }

    #[tokio::test]
    async fn create_booking_confirms_and_prices() {
        let (state, _dir) = test_state();
        let (status, Json(booking)) = create_booking(
            Auth(test_user("user-1", Role::Customer)),
            State(state.clone()),
            ApiJson(request("p002", 3)),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(booking.status, BookingStatus::Confirmed);
        // p002 charges 60/h
        assert_eq!(booking.total_amount, 180);
        assert!(booking.id.starts_with("booking-"));
        assert!(booking.qr_code.starts_with("https://api.qrserver.com/"));

        let Json(active) = active_booking(
            Auth(test_user("user-1", Role::Customer)),
            State(state),
        )
        .await;
        assert_eq!(active.booking.map(|b| b.id), Some(booking.id));
    }

    #[tokio::test]
    async fn create_booking_requires_payment_method() {
        let (state, _dir) = test_state();
        let mut req = request("p001", 1);
        req.payment_method = None;

        let err = create_booking(
            Auth(test_user("user-1", Role::Customer)),
            State(state.clone()),
            ApiJson(req),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(state.store.read().await.bookings_for_user("user-1").is_empty());
    }

    #[tokio::test]
    async fn create_booking_rejects_unknown_spot_and_empty_window() {
        let (state, _dir) = test_state();
        let user = test_user("user-1", Role::Customer);

        let err = create_booking(
            Auth(user.clone()),
            State(state.clone()),
            ApiJson(request("p404", 1)),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = create_booking(Auth(user), State(state), ApiJson(request("p001", 0)))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn other_customers_cannot_see_or_change_a_booking() {
        let (state, _dir) = test_state();
        let booking = book(&state, "user-1", "p001").await;
        let stranger = test_user("user-2", Role::Customer);

        let err = get_booking(
            Auth(stranger.clone()),
            State(state.clone()),
            Path(booking.id.clone()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = cancel_booking(Auth(stranger), State(state.clone()), Path(booking.id.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let stored = state.store.read().await.booking(&booking.id).unwrap();
        assert_eq!(stored.status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn staff_can_read_any_booking() {
        let (state, _dir) = test_state();
        let booking = book(&state, "user-1", "p001").await;

        let Json(found) = get_booking(
            Auth(test_user("gate-1", Role::Staff)),
            State(state),
            Path(booking.id.clone()),
        )
        .await
        .unwrap();
        assert_eq!(found.id, booking.id);
    }

    #[tokio::test]
    async fn admin_can_cancel_and_complete_any_booking() {
        let (state, _dir) = test_state();
        let admin = test_user("ops", Role::Admin);
        let first = book(&state, "user-1", "p001").await;
        let second = book(&state, "user-1", "p002").await;

        let Json(cancelled) = cancel_booking(
            Auth(admin.clone()),
            State(state.clone()),
            Path(first.id.clone()),
        )
        .await
        .unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        assert_eq!(cancelled.user_id, "user-1");

        let Json(completed) = complete_booking(
            Auth(admin),
            State(state.clone()),
            Path(second.id.clone()),
        )
        .await
        .unwrap();
        assert_eq!(completed.status, BookingStatus::Completed);

        let Json(active) =
            active_booking(Auth(test_user("user-1", Role::Customer)), State(state)).await;
        assert!(active.booking.is_none());
    }

    #[tokio::test]
    async fn staff_cannot_cancel_a_customer_booking() {
        let (state, _dir) = test_state();
        let booking = book(&state, "user-1", "p001").await;

        let err = cancel_booking(
            Auth(test_user("gate-1", Role::Staff)),
            State(state),
            Path(booking.id),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cancel_then_complete_is_rejected() {
        let (state, _dir) = test_state();
        let booking = book(&state, "user-1", "p003").await;
        let owner = test_user("user-1", Role::Customer);

        let Json(cancelled) = cancel_booking(
            Auth(owner.clone()),
            State(state.clone()),
            Path(booking.id.clone()),
        )
        .await
        .unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);

        let err = complete_booking(Auth(owner.clone()), State(state.clone()), Path(booking.id))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);

        let Json(active) = active_booking(Auth(owner), State(state)).await;
        assert!(active.booking.is_none());
    }

    #[tokio::test]
    async fn list_returns_only_own_bookings_in_order() {
        let (state, _dir) = test_state();
        let first = book(&state, "user-1", "p001").await;
        book(&state, "user-2", "p002").await;
        let second = book(&state, "user-1", "p005").await;

        let Json(bookings) =
            list_bookings(Auth(test_user("user-1", Role::Customer)), State(state)).await;
        let ids: Vec<String> = bookings.into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }
}
