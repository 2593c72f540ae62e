// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Persistent Storage Module
//!
//! Profiles and vehicles outlive a single session, so they are written as
//! JSON files under `DATA_DIR`. Bookings are deliberately kept in memory
//! (see [`crate::store`]).
//!
//! ## Storage Layout
//!
//! ```text
//! $DATA_DIR/
//!   profiles/
//!     {user_id}.json     # one profile per identity-provider subject
//!   vehicles/
//!     {vehicle_id}.json
//! ```
//!
//! Identifiers are escaped with [`paths::file_key`] before they touch the
//! filesystem.

pub mod json_fs;
pub mod ownership;
pub mod paths;
pub mod repository;

pub use json_fs::{JsonStorage, StorageError, StorageResult};
pub use ownership::{OwnedResource, OwnershipEnforcer};
pub use paths::StoragePaths;
pub use repository::{
    ProfileChanges, ProfileRepository, StoredProfile, StoredVehicle, VehicleRepository,
};
