// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership enforcement for user-owned records.
//!
//! Customers may only touch their own bookings and vehicles. Admins pass
//! every ownership check; staff read across owners only where an endpoint
//! allows it.

use crate::auth::{AuthenticatedUser, Role};
use crate::models::Booking;

use super::{StorageError, StorageResult};

/// Trait for resources that have an owner.
pub trait OwnedResource {
    /// Get the owner's user ID.
    fn owner_user_id(&self) -> &str;

    /// Resource kind used in error messages.
    fn resource_kind(&self) -> &'static str;
}

/// Trait for enforcing ownership on storage operations.
pub trait OwnershipEnforcer {
    /// # Errors
    /// Returns `StorageError::PermissionDenied` unless the user owns the
    /// resource or is an admin.
    fn verify_ownership(&self, user: &AuthenticatedUser) -> StorageResult<()>;
}

impl<T: OwnedResource> OwnershipEnforcer for T {
    fn verify_ownership(&self, user: &AuthenticatedUser) -> StorageResult<()> {
        if user.role == Role::Admin || self.owner_user_id() == user.user_id {
            Ok(())
        } else {
            Err(StorageError::PermissionDenied {
                user_id: user.user_id.clone(),
                resource: self.resource_kind().to_string(),
            })
        }
    }
}

impl OwnedResource for Booking {
    fn owner_user_id(&self) -> &str {
        &self.user_id
    }

    fn resource_kind(&self) -> &'static str {
        "Booking"
    }
}
