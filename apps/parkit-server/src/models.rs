// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response structures shared by the catalog, booking and staff
//! endpoints. All types derive `Serialize`/`Deserialize` and `ToSchema` for
//! JSON handling and OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Parking spots**: read-only fixture records and search results
//! - **Bookings**: reserved time windows with a QR confirmation
//! - **Staff**: check-in decisions and per-spot summaries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Spot Identifier
// =============================================================================

/// Identifier of a parking spot fixture (e.g. `p001`).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpotId(pub String);

impl std::fmt::Display for SpotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SpotId {
    fn from(value: String) -> Self {
        SpotId(value)
    }
}

impl From<&str> for SpotId {
    fn from(value: &str) -> Self {
        SpotId(value.to_string())
    }
}

impl From<SpotId> for String {
    fn from(value: SpotId) -> Self {
        value.0
    }
}

// =============================================================================
// Parking Spot Models
// =============================================================================

/// Daily opening window, `HH:MM` local time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct OpeningHours {
    pub open: String,
    pub close: String,
}

/// A bookable parking facility.
///
/// Seeded once at startup and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ParkingSpot {
    pub id: SpotId,
    pub name: String,
    pub address: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub total_spots: u32,
    pub available_spots: u32,
    /// Price per hour in whole rupees.
    pub hourly_rate: u32,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
    pub opening_hours: OpeningHours,
    pub rating: f32,
    pub reviews: u32,
}

/// A spot together with its distance from the caller.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct NearbySpot {
    #[serde(flatten)]
    pub spot: ParkingSpot,
    /// Great-circle distance in kilometres.
    pub distance_km: f64,
}

/// Ordering applied to search results.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    /// Nearest first when a location is supplied, fixture order otherwise.
    #[default]
    Distance,
    /// Cheapest hourly rate first.
    Price,
    /// Most free spaces first.
    Availability,
    /// Highest rated first.
    Rating,
}

/// Price quote for a prospective booking window.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Quote {
    pub spot_id: SpotId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub hourly_rate: u32,
    pub total_amount: u64,
}

// =============================================================================
// Booking Models
// =============================================================================

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Completed and cancelled bookings accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::CheckedIn => "checked-in",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// Wallet used to pay for a booking. Payment itself is not processed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Gpay,
    Phonepe,
    Paytm,
}

/// A reserved time window at a parking spot.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Booking {
    /// `booking-<unix millis>-<5 base36 chars>`
    pub id: String,
    pub parking_id: SpotId,
    pub user_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// `ceil(hours × hourly_rate)` in whole rupees.
    pub total_amount: u64,
    pub status: BookingStatus,
    pub payment_method: PaymentMethod,
    /// URL of the QR image shown at the entrance.
    pub qr_code: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_in_at: Option<DateTime<Utc>>,
}

/// Request to book a spot for a time window.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    pub spot_id: SpotId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Required; a booking without a chosen payment method is rejected.
    pub payment_method: Option<PaymentMethod>,
}

// =============================================================================
// Staff Models
// =============================================================================

/// Request to approve or reject a customer at the gate.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckInRequest {
    pub booking_id: String,
    pub approve: bool,
}

/// Outcome of a check-in decision.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CheckInDecision {
    Approved,
    Rejected,
}

/// Response to a check-in decision.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckInResponse {
    pub decision: CheckInDecision,
    pub booking: Booking,
}

/// Result of scanning a booking QR code at the gate.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScannedBooking {
    pub booking: Booking,
    pub spot_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    /// Confirmed and not yet expired.
    pub valid: bool,
}

/// Gate dashboard figures for one spot.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SpotSummary {
    pub spot_id: SpotId,
    pub spot_name: String,
    pub available_spots: u32,
    pub total_spots: u32,
    pub check_ins_today: usize,
}
