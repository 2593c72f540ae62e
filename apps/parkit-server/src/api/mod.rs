// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::Role,
    models::{
        Booking, BookingStatus, CheckInDecision, CheckInRequest, CheckInResponse,
        CreateBookingRequest, NearbySpot, OpeningHours, ParkingSpot, PaymentMethod, Quote,
        ScannedBooking, SortOption, SpotId, SpotSummary,
    },
    state::AppState,
    storage::{StoredProfile, StoredVehicle},
};

pub mod bookings;
pub mod extract;
pub mod health;
pub mod profile;
pub mod saved;
pub mod spots;
pub mod staff;
pub mod users;
pub mod vehicles;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        // Catalog
        .route("/spots", get(spots::list_spots))
        .route("/spots/nearby", get(spots::nearby_spots))
        .route("/spots/{spot_id}", get(spots::get_spot))
        .route("/spots/{spot_id}/quote", get(spots::quote_spot))
        .route(
            "/spots/{spot_id}/save",
            post(saved::save_spot).delete(saved::unsave_spot),
        )
        .route("/saved", get(saved::list_saved))
        .route("/recent", get(saved::list_recent))
        // Bookings
        .route(
            "/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/bookings/active", get(bookings::active_booking))
        .route("/bookings/{booking_id}", get(bookings::get_booking))
        .route(
            "/bookings/{booking_id}/complete",
            post(bookings::complete_booking),
        )
        .route("/bookings/{booking_id}/cancel", post(bookings::cancel_booking))
        // Staff
        .route("/staff/bookings/{booking_id}", get(staff::scan_booking))
        .route("/staff/check-in", post(staff::check_in))
        .route("/staff/spots/{spot_id}/summary", get(staff::spot_summary))
        // Users
        .route("/users/me", get(users::get_current_user))
        .route(
            "/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .route(
            "/vehicles",
            get(vehicles::list_vehicles).post(vehicles::add_vehicle),
        )
        .route("/vehicles/{vehicle_id}", delete(vehicles::delete_vehicle));

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Registers the `bearer_auth` scheme referenced by protected paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        health::readiness,
        spots::list_spots,
        spots::nearby_spots,
        spots::get_spot,
        spots::quote_spot,
        saved::save_spot,
        saved::unsave_spot,
        saved::list_saved,
        saved::list_recent,
        bookings::create_booking,
        bookings::list_bookings,
        bookings::active_booking,
        bookings::get_booking,
        bookings::complete_booking,
        bookings::cancel_booking,
        staff::scan_booking,
        staff::check_in,
        staff::spot_summary,
        users::get_current_user,
        profile::get_profile,
        profile::update_profile,
        vehicles::list_vehicles,
        vehicles::add_vehicle,
        vehicles::delete_vehicle
    ),
    components(
        schemas(
            SpotId,
            OpeningHours,
            ParkingSpot,
            NearbySpot,
            SortOption,
            Quote,
            BookingStatus,
            PaymentMethod,
            Booking,
            CreateBookingRequest,
            CheckInRequest,
            CheckInDecision,
            CheckInResponse,
            ScannedBooking,
            SpotSummary,
            Role,
            StoredProfile,
            StoredVehicle,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse,
            saved::SaveSpotResponse,
            bookings::ActiveBookingResponse,
            users::UserMeResponse,
            profile::UpdateProfileRequest,
            vehicles::CreateVehicleRequest,
            vehicles::VehicleListResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Spots", description = "Parking spot search and details"),
        (name = "Saved", description = "Saved and recently viewed spots"),
        (name = "Bookings", description = "Booking lifecycle"),
        (name = "Staff", description = "Gate check-in"),
        (name = "Users", description = "Authenticated identity"),
        (name = "Profile", description = "User profile"),
        (name = "Vehicles", description = "Registered vehicles")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
pub(crate) fn test_state() -> (AppState, tempfile::TempDir) {
    use crate::state::AuthConfig;
    use crate::storage::{JsonStorage, StoragePaths};

    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let mut storage = JsonStorage::new(StoragePaths::new(dir.path()));
    storage.initialize().expect("Failed to initialize storage");
    let state = AppState::new(storage).with_auth_config(AuthConfig {
        jwks: None,
        issuer: Some("test".to_string()),
        audience: None,
    });
    (state, dir)
}

#[cfg(test)]
pub(crate) fn test_user(user_id: &str, role: Role) -> crate::auth::AuthenticatedUser {
    crate::auth::AuthenticatedUser {
        user_id: user_id.to_string(),
        role,
        session_id: None,
        issuer: "test".to_string(),
        expires_at: 0,
    }
}
