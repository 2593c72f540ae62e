// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! ParkIt - Parking Spot Discovery & Booking Service
//!
//! JSON API behind the ParkIt web and mobile clients: search a fixed catalog
//! of Bengaluru parking facilities, book a time window, receive a QR code,
//! and let gate staff check the holder in.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Bearer-token authentication against the identity provider
//! - `catalog` - Parking spot fixtures, search and distance ordering
//! - `pricing` - Hourly-rate arithmetic
//! - `store` - In-memory bookings, saved and recently viewed spots
//! - `storage` - JSON file storage for profiles and vehicles
//! - `sweeper` - Background completion of expired bookings

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod qr;
pub mod state;
pub mod storage;
pub mod store;
pub mod sweeper;
