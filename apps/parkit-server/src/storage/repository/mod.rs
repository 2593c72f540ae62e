// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to JSON storage.
//!
//! Each repository provides CRUD operations for a specific entity type,
//! using [`JsonStorage`](super::JsonStorage) for all file operations.

pub mod profiles;
pub mod vehicles;

pub use profiles::{ProfileChanges, ProfileRepository, StoredProfile};
pub use vehicles::{normalize_plate, StoredVehicle, VehicleRepository};
