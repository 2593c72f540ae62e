// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JSON file storage.
//!
//! Each record is one pretty-printed JSON file. Writes go to a uniquely
//! named temp file in the target directory that is then renamed over the
//! target, so readers never see a partial record.
//!
//! Repositories that check before they write (plate uniqueness, profile
//! merges) hold [`JsonStorage::lock_writes`] across the check and the write.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use uuid::Uuid;

use super::StoragePaths;

/// Error type for storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[source] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    #[error("Storage not initialized")]
    NotInitialized,
    #[error("Permission denied: user {user_id} cannot access {resource}")]
    PermissionDenied { user_id: String, resource: String },
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::NotFound {
            StorageError::NotFound(e.to_string())
        } else {
            StorageError::Io(e)
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// File-backed JSON storage rooted at [`StoragePaths::root`].
#[derive(Debug, Clone)]
pub struct JsonStorage {
    paths: StoragePaths,
    initialized: bool,
    write_lock: Arc<Mutex<()>>,
}

impl JsonStorage {
    /// Does NOT create the directory structure. Call `initialize()` first.
    pub fn new(paths: StoragePaths) -> Self {
        Self {
            paths,
            initialized: false,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Serialize read-check-write sequences across request handlers.
    ///
    /// Poisoning is ignored: the guard protects no in-memory data.
    pub fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create the directory structure. Idempotent.
    pub fn initialize(&mut self) -> StorageResult<()> {
        for dir in [self.paths.profiles_dir(), self.paths.vehicles_dir()] {
            fs::create_dir_all(&dir)?;
        }

        self.initialized = true;
        Ok(())
    }

    /// Write-read-delete probe of the data directory.
    pub fn health_check(&self) -> StorageResult<()> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let probe = self
            .paths
            .root()
            .join(format!(".health_check-{}", Uuid::new_v4()));
        fs::write(&probe, b"ok")?;
        let read_back = fs::read(&probe)?;
        fs::remove_file(&probe)?;

        if read_back != b"ok" {
            return Err(StorageError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                "health check data mismatch",
            )));
        }
        Ok(())
    }

    pub fn read_json<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> StorageResult<T> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let file = File::open(path.as_ref())?;
        let value = serde_json::from_reader(BufReader::new(file))?;
        Ok(value)
    }

    /// Write a JSON file (atomic write via rename).
    pub fn write_json<T: Serialize>(&self, path: impl AsRef<Path>, value: &T) -> StorageResult<()> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let path = path.as_ref();
        let parent = path.parent().unwrap_or_else(|| self.paths.root());
        fs::create_dir_all(parent)?;

        let mut temp = NamedTempFile::new_in(parent)?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.flush()?;
        }

        temp.persist(path).map_err(|e| StorageError::from(e.error))?;
        Ok(())
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        path.as_ref().is_file()
    }

    pub fn delete(&self, path: impl AsRef<Path>) -> StorageResult<()> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }
        fs::remove_file(path.as_ref())?;
        Ok(())
    }

    /// Parse every `*.json` file directly under `dir`.
    ///
    /// Unreadable records are skipped with a warning rather than failing the
    /// whole listing.
    pub fn read_all_json<T: DeserializeOwned>(&self, dir: impl AsRef<Path>) -> StorageResult<Vec<T>> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let dir = dir.as_ref();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            match self.read_json(&path) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable record")
                }
            }
        }
        Ok(records)
    }
}
