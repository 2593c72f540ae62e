// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::JwksManager;
use crate::catalog::Catalog;
use crate::config::AuthSettings;
use crate::storage::JsonStorage;
use crate::store::InMemoryStore;

/// JWT verification settings.
///
/// `jwks: None` means development mode: tokens are decoded without a
/// signature check.
#[derive(Clone, Default)]
pub struct AuthConfig {
    pub jwks: Option<JwksManager>,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

impl AuthConfig {
    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self {
            jwks: settings.jwks_url.as_deref().map(JwksManager::new),
            issuer: settings.issuer.clone(),
            audience: settings.audience.clone(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.jwks.is_some()
    }
}

#[derive(Clone)]
pub struct AppState {
    /// Bookings, saved and recently viewed spots.
    pub store: Arc<RwLock<InMemoryStore>>,
    pub catalog: Arc<Catalog>,
    storage: Arc<JsonStorage>,
    pub auth_config: AuthConfig,
}

impl AppState {
    pub fn new(storage: JsonStorage) -> Self {
        Self {
            store: Arc::new(RwLock::new(InMemoryStore::new())),
            catalog: Arc::new(Catalog::default()),
            storage: Arc::new(storage),
            auth_config: AuthConfig::default(),
        }
    }

    pub fn with_auth_config(mut self, auth_config: AuthConfig) -> Self {
        self.auth_config = auth_config;
        self
    }

    /// Profile and vehicle storage.
    pub fn storage(&self) -> Arc<JsonStorage> {
        Arc::clone(&self.storage)
    }
}
