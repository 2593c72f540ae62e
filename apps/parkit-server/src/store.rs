// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory session state.
//!
//! Bookings, saved spots and recently viewed spots live here for the lifetime
//! of the process. Nothing in this store is persisted.

use std::collections::{BTreeSet, HashMap};
use std::num::NonZeroUsize;

use chrono::{DateTime, NaiveDate, Utc};
use lru::LruCache;

use crate::error::ApiError;
use crate::models::{Booking, BookingStatus, PaymentMethod, ParkingSpot, SpotId};
use crate::pricing;
use crate::qr;

/// Maximum entries kept in a user's recently viewed list.
pub const RECENT_CAPACITY: usize = 10;

pub struct InMemoryStore {
    /// Creation order.
    bookings: Vec<Booking>,
    /// user_id -> id of the booking most recently created and still open.
    active: HashMap<String, String>,
    saved: HashMap<String, BTreeSet<SpotId>>,
    recent: HashMap<String, LruCache<SpotId, ()>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            bookings: Vec::new(),
            active: HashMap::new(),
            saved: HashMap::new(),
            recent: HashMap::new(),
        }
    }

    // ========== Bookings ==========

    /// Create a confirmed booking and make it the user's active booking.
    pub fn create_booking(
        &mut self,
        user_id: &str,
        spot: &ParkingSpot,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        payment_method: PaymentMethod,
        now: DateTime<Utc>,
    ) -> Result<Booking, ApiError> {
        let total_amount = pricing::total_amount(start_time, end_time, spot.hourly_rate)?;
        let qr_code = qr::generate_qr_code().map_err(|e| {
            tracing::error!(error = %e, "Failed to build QR code URL");
            ApiError::internal("Failed to generate QR code")
        })?;

        let booking = Booking {
            id: format!(
                "booking-{}-{}",
                now.timestamp_millis(),
                qr::random_base36(5)
            ),
            parking_id: spot.id.clone(),
            user_id: user_id.to_string(),
            start_time,
            end_time,
            total_amount,
            status: BookingStatus::Confirmed,
            payment_method,
            qr_code,
            created_at: now,
            checked_in_at: None,
        };

        self.bookings.push(booking.clone());
        self.active
            .insert(user_id.to_string(), booking.id.clone());
        Ok(booking)
    }

    pub fn booking(&self, booking_id: &str) -> Result<Booking, ApiError> {
        self.bookings
            .iter()
            .find(|booking| booking.id == booking_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Booking not found"))
    }

    pub fn bookings_for_user(&self, user_id: &str) -> Vec<Booking> {
        self.bookings
            .iter()
            .filter(|booking| booking.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn active_booking(&self, user_id: &str) -> Option<Booking> {
        let booking_id = self.active.get(user_id)?;
        self.booking(booking_id).ok()
    }

    /// Mark a booking completed.
    pub fn complete_booking(&mut self, booking_id: &str) -> Result<Booking, ApiError> {
        self.transition(booking_id, |booking| {
            if booking.status.is_terminal() {
                return Err(ApiError::unprocessable(format!(
                    "Booking is already {}",
                    booking.status
                )));
            }
            booking.status = BookingStatus::Completed;
            Ok(())
        })
    }

    /// Cancel a booking that has not been used yet.
    pub fn cancel_booking(&mut self, booking_id: &str) -> Result<Booking, ApiError> {
        self.transition(booking_id, |booking| match booking.status {
            BookingStatus::Pending | BookingStatus::Confirmed => {
                booking.status = BookingStatus::Cancelled;
                Ok(())
            }
            other => Err(ApiError::unprocessable(format!(
                "A {other} booking cannot be cancelled"
            ))),
        })
    }

    /// Admit the holder of a confirmed, unexpired booking.
    pub fn check_in(&mut self, booking_id: &str, now: DateTime<Utc>) -> Result<Booking, ApiError> {
        self.transition(booking_id, |booking| {
            if !is_admissible(booking, now) {
                let state = if booking.status == BookingStatus::Confirmed {
                    "expired".to_string()
                } else {
                    booking.status.to_string()
                };
                return Err(ApiError::unprocessable(format!(
                    "Booking is {state} and cannot be checked in"
                )));
            }
            booking.status = BookingStatus::CheckedIn;
            booking.checked_in_at = Some(now);
            Ok(())
        })
    }

    /// Number of check-ins recorded at `spot_id` on `day` (UTC).
    pub fn check_ins_on(&self, spot_id: &SpotId, day: NaiveDate) -> usize {
        self.bookings
            .iter()
            .filter(|booking| &booking.parking_id == spot_id)
            .filter(|booking| {
                booking
                    .checked_in_at
                    .is_some_and(|at| at.date_naive() == day)
            })
            .count()
    }

    /// Complete every open booking whose window ended before `now`.
    ///
    /// Returns the ids of the bookings that changed.
    pub fn complete_expired(&mut self, now: DateTime<Utc>) -> Vec<String> {
        let mut completed = Vec::new();
        for booking in self.bookings.iter_mut() {
            let open = matches!(
                booking.status,
                BookingStatus::Confirmed | BookingStatus::CheckedIn
            );
            if open && booking.end_time <= now {
                booking.status = BookingStatus::Completed;
                completed.push(booking.id.clone());
            }
        }
        self.active
            .retain(|_, booking_id| !completed.contains(booking_id));
        completed
    }

    fn transition<F>(&mut self, booking_id: &str, apply: F) -> Result<Booking, ApiError>
    where
        F: FnOnce(&mut Booking) -> Result<(), ApiError>,
    {
        let booking = self
            .bookings
            .iter_mut()
            .find(|booking| booking.id == booking_id)
            .ok_or_else(|| ApiError::not_found("Booking not found"))?;

        apply(booking)?;
        let updated = booking.clone();

        if updated.status.is_terminal()
            && self.active.get(&updated.user_id) == Some(&updated.id)
        {
            self.active.remove(&updated.user_id);
        }
        Ok(updated)
    }

    // ========== Saved Spots ==========

    /// Returns `false` when the spot was already saved.
    pub fn save_spot(&mut self, user_id: &str, spot_id: SpotId) -> bool {
        self.saved
            .entry(user_id.to_string())
            .or_default()
            .insert(spot_id)
    }

    pub fn unsave_spot(&mut self, user_id: &str, spot_id: &SpotId) -> Result<(), ApiError> {
        let removed = self
            .saved
            .get_mut(user_id)
            .is_some_and(|spots| spots.remove(spot_id));
        if removed {
            Ok(())
        } else {
            Err(ApiError::not_found("Spot is not saved"))
        }
    }

    pub fn saved_spots(&self, user_id: &str) -> Vec<SpotId> {
        self.saved
            .get(user_id)
            .map(|spots| spots.iter().cloned().collect())
            .unwrap_or_default()
    }

    // ========== Recently Viewed ==========

    pub fn record_view(&mut self, user_id: &str, spot_id: SpotId) {
        let capacity = NonZeroUsize::new(RECENT_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        self.recent
            .entry(user_id.to_string())
            .or_insert_with(|| LruCache::new(capacity))
            .put(spot_id, ());
    }

    /// Most recently viewed first.
    pub fn recent_spots(&self, user_id: &str) -> Vec<SpotId> {
        self.recent
            .get(user_id)
            .map(|views| views.iter().map(|(spot_id, _)| spot_id.clone()).collect())
            .unwrap_or_default()
    }
}

/// Confirmed and still inside or before its window.
pub fn is_admissible(booking: &Booking, now: DateTime<Utc>) -> bool {
    booking.status == BookingStatus::Confirmed && booking.end_time > now
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use axum::http::StatusCode;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 2, 9, 30, 0).unwrap()
    }

    fn book(store: &mut InMemoryStore, user: &str, spot: &str, hours: i64) -> Booking {
        let catalog = Catalog::default();
        let spot = catalog.find(&SpotId::from(spot)).unwrap();
        store
            .create_booking(
                user,
                spot,
                now(),
                now() + Duration::hours(hours),
                PaymentMethod::Gpay,
                now(),
            )
            .unwrap()
    }

    #[test]
    fn create_booking_confirms_and_sets_active() {
        let mut store = InMemoryStore::new();
        let booking = book(&mut store, "user-1", "p001", 2);

        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.total_amount, 100);
        assert!(booking.id.starts_with(&format!("booking-{}-", now().timestamp_millis())));
        assert_eq!(booking.id.len(), "booking-".len() + 13 + 1 + 5);
        assert!(booking.qr_code.contains("data=booking-"));
        assert_eq!(store.active_booking("user-1"), Some(booking.clone()));
        assert_eq!(store.bookings_for_user("user-1"), vec![booking]);
        assert!(store.bookings_for_user("user-2").is_empty());
    }

    #[test]
    fn invalid_window_creates_nothing() {
        let mut store = InMemoryStore::new();
        let catalog = Catalog::default();
        let spot = catalog.find(&SpotId::from("p001")).unwrap();
        let err = store
            .create_booking("user-1", spot, now(), now(), PaymentMethod::Paytm, now())
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(store.bookings_for_user("user-1").is_empty());
        assert!(store.active_booking("user-1").is_none());
    }

    #[test]
    fn complete_and_cancel_clear_active_booking() {
        let mut store = InMemoryStore::new();
        let first = book(&mut store, "user-1", "p001", 1);
        let second = book(&mut store, "user-1", "p002", 1);
        assert_eq!(store.active_booking("user-1").unwrap().id, second.id);

        // Completing a non-active booking leaves the active one alone.
        store.complete_booking(&first.id).unwrap();
        assert_eq!(store.active_booking("user-1").unwrap().id, second.id);

        let cancelled = store.cancel_booking(&second.id).unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        assert!(store.active_booking("user-1").is_none());
    }

    #[test]
    fn terminal_bookings_reject_transitions() {
        let mut store = InMemoryStore::new();
        let booking = book(&mut store, "user-1", "p003", 1);
        store.cancel_booking(&booking.id).unwrap();

        let err = store.complete_booking(&booking.id).unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        let err = store.cancel_booking(&booking.id).unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);

        let err = store.cancel_booking("missing").unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn check_in_requires_confirmed_unexpired_booking() {
        let mut store = InMemoryStore::new();
        let booking = book(&mut store, "user-1", "p001", 2);

        let checked = store.check_in(&booking.id, now() + Duration::minutes(5)).unwrap();
        assert_eq!(checked.status, BookingStatus::CheckedIn);
        assert_eq!(checked.checked_in_at, Some(now() + Duration::minutes(5)));

        // A checked-in booking can no longer be cancelled.
        let err = store.cancel_booking(&booking.id).unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);

        let err = store.check_in(&booking.id, now()).unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);

        let late = book(&mut store, "user-2", "p001", 1);
        let err = store.check_in(&late.id, now() + Duration::hours(2)).unwrap_err();
        assert_eq!(err.message, "Booking is expired and cannot be checked in");
    }

    #[test]
    fn check_ins_are_counted_per_spot_and_day() {
        let mut store = InMemoryStore::new();
        let a = book(&mut store, "user-1", "p001", 3);
        let b = book(&mut store, "user-2", "p001", 3);
        let c = book(&mut store, "user-3", "p002", 3);
        book(&mut store, "user-4", "p001", 3);

        store.check_in(&a.id, now()).unwrap();
        store.check_in(&b.id, now()).unwrap();
        store.check_in(&c.id, now()).unwrap();

        let today = now().date_naive();
        assert_eq!(store.check_ins_on(&SpotId::from("p001"), today), 2);
        assert_eq!(store.check_ins_on(&SpotId::from("p002"), today), 1);
        assert_eq!(
            store.check_ins_on(&SpotId::from("p001"), today.succ_opt().unwrap()),
            0
        );
    }

    #[test]
    fn complete_expired_only_touches_open_past_bookings() {
        let mut store = InMemoryStore::new();
        let short = book(&mut store, "user-1", "p001", 1);
        let long = book(&mut store, "user-2", "p001", 5);
        let cancelled = book(&mut store, "user-3", "p001", 1);
        store.cancel_booking(&cancelled.id).unwrap();

        let done = store.complete_expired(now() + Duration::hours(2));
        assert_eq!(done, vec![short.id.clone()]);
        assert_eq!(
            store.booking(&short.id).unwrap().status,
            BookingStatus::Completed
        );
        assert!(store.active_booking("user-1").is_none());
        assert_eq!(store.active_booking("user-2").unwrap().id, long.id);
        assert_eq!(
            store.booking(&cancelled.id).unwrap().status,
            BookingStatus::Cancelled
        );
    }

    #[test]
    fn saved_spots_are_per_user() {
        let mut store = InMemoryStore::new();
        assert!(store.save_spot("user-1", SpotId::from("p004")));
        assert!(store.save_spot("user-1", SpotId::from("p002")));
        assert!(!store.save_spot("user-1", SpotId::from("p004")));
        assert_eq!(
            store.saved_spots("user-1"),
            vec![SpotId::from("p002"), SpotId::from("p004")]
        );
        assert!(store.saved_spots("user-2").is_empty());

        store.unsave_spot("user-1", &SpotId::from("p002")).unwrap();
        let err = store.unsave_spot("user-1", &SpotId::from("p002")).unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn recent_views_are_most_recent_first_and_bounded() {
        let mut store = InMemoryStore::new();
        store.record_view("user-1", SpotId::from("p001"));
        store.record_view("user-1", SpotId::from("p002"));
        store.record_view("user-1", SpotId::from("p001"));
        assert_eq!(
            store.recent_spots("user-1"),
            vec![SpotId::from("p001"), SpotId::from("p002")]
        );

        for i in 0..15 {
            store.record_view("user-2", SpotId::from(format!("x{i}")));
        }
        let recent = store.recent_spots("user-2");
        assert_eq!(recent.len(), RECENT_CAPACITY);
        assert_eq!(recent[0], SpotId::from("x14"));
        assert_eq!(recent[RECENT_CAPACITY - 1], SpotId::from("x5"));
    }
}
