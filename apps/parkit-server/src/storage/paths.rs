// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path constants and utilities for the on-disk storage layout.

use std::path::{Path, PathBuf};

use crate::config::DEFAULT_DATA_DIR;

/// Storage path utilities.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all persisted data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== Profile Paths ==========

    /// Directory containing all user profiles.
    pub fn profiles_dir(&self) -> PathBuf {
        self.root.join("profiles")
    }

    /// Path to a user's profile file.
    pub fn profile(&self, user_id: &str) -> PathBuf {
        self.profiles_dir()
            .join(format!("{}.json", file_key(user_id)))
    }

    // ========== Vehicle Paths ==========

    /// Directory containing all vehicles.
    pub fn vehicles_dir(&self) -> PathBuf {
        self.root.join("vehicles")
    }

    /// Path to a specific vehicle file.
    pub fn vehicle(&self, vehicle_id: &str) -> PathBuf {
        self.vehicles_dir()
            .join(format!("{}.json", file_key(vehicle_id)))
    }
}

/// Make an identifier safe to use as a file stem.
///
/// Identity provider subjects may contain `|`, `/` or `:`; anything outside
/// `[A-Za-z0-9_-]` is percent-encoded so distinct ids never collide.
pub fn file_key(id: &str) -> String {
    let mut key = String::with_capacity(id.len());
    for byte in id.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            key.push(byte as char);
        } else {
            key.push_str(&format!("%{byte:02X}"));
        }
    }
    key
}
