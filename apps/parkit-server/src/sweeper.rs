// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Booking Sweeper
//!
//! Background task that closes bookings whose window has ended. Confirmed
//! and checked-in bookings with `end_time` in the past are marked
//! `completed`, which also clears them as the owner's active booking.
//!
//! ## Shutdown
//!
//! Uses `tokio_util::sync::CancellationToken` for graceful shutdown; `main`
//! cancels the token on ctrl-c.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::DEFAULT_SWEEP_INTERVAL;
use crate::store::InMemoryStore;

/// Background sweeper that completes expired bookings.
pub struct BookingSweeper {
    store: Arc<RwLock<InMemoryStore>>,
    interval: Duration,
}

impl BookingSweeper {
    pub fn new(store: Arc<RwLock<InMemoryStore>>) -> Self {
        Self {
            store,
            interval: DEFAULT_SWEEP_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run the sweep loop until the cancellation token is triggered.
    ///
    /// Should be spawned as a background task:
    /// ```rust,ignore
    /// tokio::spawn(sweeper.run(shutdown.clone()));
    /// ```
    pub async fn run(self, shutdown: CancellationToken) {
        info!(
            interval_secs = self.interval.as_secs(),
            "Booking sweeper starting"
        );

        loop {
            if shutdown.is_cancelled() {
                info!("Booking sweeper shutting down");
                return;
            }

            self.sweep().await;

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {},
                _ = shutdown.cancelled() => {
                    info!("Booking sweeper shutting down");
                    return;
                }
            }
        }
    }

    /// One pass: complete every open booking whose window has ended.
    pub async fn sweep(&self) -> Vec<String> {
        let completed = self.store.write().await.complete_expired(Utc::now());

        if completed.is_empty() {
            debug!("Booking sweeper: nothing expired");
        } else {
            info!(
                count = completed.len(),
                booking_ids = ?completed,
                "Booking sweeper: completed expired bookings"
            );
        }
        completed
    }
}
