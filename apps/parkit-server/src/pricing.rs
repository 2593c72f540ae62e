// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Booking price calculation.
//!
//! The amount charged is the exact booked duration in hours multiplied by the
//! spot's hourly rate, rounded up to the next whole rupee.

use chrono::{DateTime, Utc};

use crate::error::ApiError;
use crate::models::{ParkingSpot, Quote};

const MILLIS_PER_HOUR: u64 = 3_600_000;

/// `ceil(hours × hourly_rate)` for the window `[start, end)`.
///
/// Computed in integer milliseconds so fractional hours round up exactly.
pub fn total_amount(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    hourly_rate: u32,
) -> Result<u64, ApiError> {
    let millis = (end - start).num_milliseconds();
    if millis <= 0 {
        return Err(ApiError::bad_request("end_time must be after start_time"));
    }

    let scaled = (millis as u64)
        .checked_mul(u64::from(hourly_rate))
        .ok_or_else(|| ApiError::bad_request("Booking window is too long"))?;

    Ok(scaled.div_ceil(MILLIS_PER_HOUR))
}

/// Price a prospective booking at `spot`.
pub fn quote(
    spot: &ParkingSpot,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Quote, ApiError> {
    Ok(Quote {
        spot_id: spot.id.clone(),
        start_time: start,
        end_time: end,
        hourly_rate: spot.hourly_rate,
        total_amount: total_amount(start, end, spot.hourly_rate)?,
    })
}
