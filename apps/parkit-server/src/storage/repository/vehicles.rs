// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Vehicle repository.
//!
//! Vehicles a user parks with. Each vehicle is a separate JSON file under
//! `vehicles/`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{JsonStorage, OwnedResource, StorageError, StorageResult};

/// Vehicle stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StoredVehicle {
    /// Unique vehicle identifier (UUID)
    pub id: String,
    /// Owner user ID
    pub owner_user_id: String,
    pub make: String,
    pub model: String,
    pub year: Option<String>,
    /// Registration as entered, e.g. `KA 01 AB 1234`.
    pub license_plate: String,
    pub created_at: DateTime<Utc>,
}

impl OwnedResource for StoredVehicle {
    fn owner_user_id(&self) -> &str {
        &self.owner_user_id
    }

    fn resource_kind(&self) -> &'static str {
        "Vehicle"
    }
}

/// Plates compare without case or whitespace: `ka01ab1234` equals `KA 01 AB 1234`.
pub fn normalize_plate(plate: &str) -> String {
    plate
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

pub struct VehicleRepository<'a> {
    storage: &'a JsonStorage,
}

impl<'a> VehicleRepository<'a> {
    pub fn new(storage: &'a JsonStorage) -> Self {
        Self { storage }
    }

    pub fn exists(&self, vehicle_id: &str) -> bool {
        self.storage.exists(self.storage.paths().vehicle(vehicle_id))
    }

    pub fn get(&self, vehicle_id: &str) -> StorageResult<StoredVehicle> {
        let path = self.storage.paths().vehicle(vehicle_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound("Vehicle".to_string()));
        }
        self.storage.read_json(path)
    }

    /// Store a new vehicle.
    ///
    /// Fails with `AlreadyExists` when the owner already registered the same
    /// plate.
    pub fn create(&self, vehicle: &StoredVehicle) -> StorageResult<()> {
        let _guard = self.storage.lock_writes();

        if self.exists(&vehicle.id) {
            return Err(StorageError::AlreadyExists("Vehicle".to_string()));
        }

        let plate = normalize_plate(&vehicle.license_plate);
        let duplicate = self
            .list_by_owner(&vehicle.owner_user_id)?
            .iter()
            .any(|existing| normalize_plate(&existing.license_plate) == plate);
        if duplicate {
            return Err(StorageError::AlreadyExists(format!(
                "Vehicle with plate {}",
                vehicle.license_plate
            )));
        }

        self.storage
            .write_json(self.storage.paths().vehicle(&vehicle.id), vehicle)
    }

    pub fn delete(&self, vehicle_id: &str) -> StorageResult<()> {
        if !self.exists(vehicle_id) {
            return Err(StorageError::NotFound("Vehicle".to_string()));
        }
        self.storage.delete(self.storage.paths().vehicle(vehicle_id))
    }

    /// Vehicles owned by a user, oldest first.
    pub fn list_by_owner(&self, owner_user_id: &str) -> StorageResult<Vec<StoredVehicle>> {
        let mut vehicles: Vec<StoredVehicle> = self
            .storage
            .read_all_json::<StoredVehicle>(self.storage.paths().vehicles_dir())?
            .into_iter()
            .filter(|vehicle| vehicle.owner_user_id == owner_user_id)
            .collect();
        vehicles.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(vehicles)
    }
}
