// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Profile repository.
//!
//! One profile per identity-provider user, stored under `profiles/`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{JsonStorage, StorageError, StorageResult};

/// Editable user profile.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StoredProfile {
    /// Identity provider subject.
    pub user_id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a user may change. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
}

pub struct ProfileRepository<'a> {
    storage: &'a JsonStorage,
}

impl<'a> ProfileRepository<'a> {
    pub fn new(storage: &'a JsonStorage) -> Self {
        Self { storage }
    }

    pub fn get(&self, user_id: &str) -> StorageResult<StoredProfile> {
        let path = self.storage.paths().profile(user_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound("Profile".to_string()));
        }
        self.storage.read_json(path)
    }

    /// Profile for `user_id`, or `None` when the user never saved one.
    pub fn find(&self, user_id: &str) -> StorageResult<Option<StoredProfile>> {
        match self.get(user_id) {
            Ok(profile) => Ok(Some(profile)),
            Err(StorageError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Apply `changes`, creating the profile on first write.
    pub fn upsert(
        &self,
        user_id: &str,
        changes: ProfileChanges,
        now: DateTime<Utc>,
    ) -> StorageResult<StoredProfile> {
        let _guard = self.storage.lock_writes();

        let mut profile = self.find(user_id)?.unwrap_or_else(|| StoredProfile {
            user_id: user_id.to_string(),
            full_name: None,
            email: None,
            phone: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        });

        if let Some(full_name) = changes.full_name {
            profile.full_name = Some(full_name);
        }
        if let Some(email) = changes.email {
            profile.email = Some(email);
        }
        if let Some(phone) = changes.phone {
            profile.phone = Some(phone);
        }
        if let Some(avatar_url) = changes.avatar_url {
            profile.avatar_url = Some(avatar_url);
        }
        profile.updated_at = now;

        self.storage
            .write_json(self.storage.paths().profile(user_id), &profile)?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoragePaths;
    use chrono::Duration;
    use std::sync::Barrier;
    use std::thread;
    use tempfile::TempDir;

    fn test_storage() -> (JsonStorage, TempDir) {
        let dir = TempDir::new().unwrap();
        let mut storage = JsonStorage::new(StoragePaths::new(dir.path()));
        storage.initialize().expect("Failed to initialize");
        (storage, dir)
    }

    #[test]
    fn missing_profile_is_not_found() {
        let (storage, _dir) = test_storage();
        let repo = ProfileRepository::new(&storage);
        assert!(matches!(repo.get("nobody"), Err(StorageError::NotFound(_))));
        assert_eq!(repo.find("nobody").unwrap(), None);
    }

    #[test]
    fn upsert_creates_then_merges() {
        let (storage, _dir) = test_storage();
        let repo = ProfileRepository::new(&storage);
        let t0 = Utc::now();

        let created = repo
            .upsert(
                "auth0|42",
                ProfileChanges {
                    full_name: Some("Rahul Sharma".into()),
                    email: Some("rahul.sharma@gmail.com".into()),
                    ..Default::default()
                },
                t0,
            )
            .unwrap();
        assert_eq!(created.created_at, t0);
        assert_eq!(created.phone, None);

        let t1 = t0 + Duration::minutes(3);
        let updated = repo
            .upsert(
                "auth0|42",
                ProfileChanges {
                    phone: Some("+91 98765 43210".into()),
                    ..Default::default()
                },
                t1,
            )
            .unwrap();
        assert_eq!(updated.full_name.as_deref(), Some("Rahul Sharma"));
        assert_eq!(updated.phone.as_deref(), Some("+91 98765 43210"));
        assert_eq!(updated.created_at, t0);
        assert_eq!(updated.updated_at, t1);

        assert_eq!(repo.get("auth0|42").unwrap(), updated);
    }

    #[test]
    fn concurrent_partial_updates_are_all_applied() {
        let (storage, _dir) = test_storage();
        let barrier = Barrier::new(16);
        let now = Utc::now();

        thread::scope(|scope| {
            for i in 0..16 {
                let (storage, barrier) = (&storage, &barrier);
                scope.spawn(move || {
                    let changes = if i % 2 == 0 {
                        ProfileChanges {
                            full_name: Some(format!("Name {i}")),
                            ..Default::default()
                        }
                    } else {
                        ProfileChanges {
                            phone: Some(format!("+91 90000 000{i:02}")),
                            ..Default::default()
                        }
                    };
                    barrier.wait();
                    ProfileRepository::new(storage)
                        .upsert("user-1", changes, now)
                        .unwrap();
                });
            }
        });

        let profile = ProfileRepository::new(&storage).get("user-1").unwrap();
        assert!(profile.full_name.is_some());
        assert!(profile.phone.is_some());
        assert_eq!(profile.created_at, now);
    }
}
