// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and authenticated user representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::Role;

/// Claims read from an identity provider access token.
///
/// Only the fields the server uses are declared; everything else in the
/// token is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration timestamp
    #[serde(default)]
    pub exp: i64,
    #[serde(default)]
    pub iss: String,
    /// Session ID
    #[serde(default, alias = "session_id")]
    pub sid: Option<String>,
    /// Server-controlled metadata (`app_metadata.role`).
    #[serde(default)]
    pub app_metadata: Option<RoleMetadata>,
    /// Dashboard-controlled metadata (`publicMetadata.role`).
    #[serde(default, rename = "publicMetadata")]
    pub public_metadata: Option<RoleMetadata>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RoleMetadata {
    #[serde(default)]
    pub role: Option<String>,
}

impl IdentityClaims {
    /// Role from `app_metadata`, then `publicMetadata`, else Customer.
    pub fn role(&self) -> Role {
        [&self.app_metadata, &self.public_metadata]
            .into_iter()
            .flatten()
            .filter_map(|meta| meta.role.as_deref())
            .find_map(Role::parse)
            .unwrap_or_default()
    }
}

/// Authenticated user information extracted from JWT.
///
/// This is the primary type used throughout the application to represent
/// the authenticated user making a request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Canonical user ID (`sub` claim)
    pub user_id: String,

    pub role: Role,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    #[serde(skip)]
    pub issuer: String,

    /// Token expiration (Unix timestamp, not serialized)
    #[serde(skip)]
    pub expires_at: i64,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: IdentityClaims) -> Self {
        let role = claims.role();
        Self {
            user_id: claims.sub,
            role,
            session_id: claims.sid,
            issuer: claims.iss,
            expires_at: claims.exp,
        }
    }

    /// Check if the user has the required role.
    pub fn has_role(&self, required: Role) -> bool {
        self.role.has_privilege(required)
    }

    /// Staff and admins may read across owners.
    pub fn is_staff(&self) -> bool {
        self.has_role(Role::Staff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(json: serde_json::Value) -> IdentityClaims {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn from_claims_extracts_user_and_session() {
        let user = AuthenticatedUser::from_claims(claims(serde_json::json!({
            "sub": "user_123",
            "exp": 1700003600,
            "iss": "https://id.example.com",
            "session_id": "sess_abc"
        })));
        assert_eq!(user.user_id, "user_123");
        assert_eq!(user.session_id.as_deref(), Some("sess_abc"));
        assert_eq!(user.expires_at, 1700003600);
        assert_eq!(user.role, Role::Customer);
    }

    #[test]
    fn role_prefers_app_metadata() {
        let c = claims(serde_json::json!({
            "sub": "u",
            "app_metadata": { "role": "staff" },
            "publicMetadata": { "role": "admin" }
        }));
        assert_eq!(c.role(), Role::Staff);
    }

    #[test]
    fn role_falls_back_to_public_metadata() {
        let c = claims(serde_json::json!({
            "sub": "u",
            "app_metadata": { "provider": "phone" },
            "publicMetadata": { "role": "admin" }
        }));
        assert_eq!(c.role(), Role::Admin);

        let unknown = claims(serde_json::json!({
            "sub": "u",
            "publicMetadata": { "role": "valet" }
        }));
        assert_eq!(unknown.role(), Role::Customer);
    }

    #[test]
    fn staff_check_includes_admin() {
        let mut user = AuthenticatedUser::from_claims(claims(serde_json::json!({ "sub": "u" })));
        assert!(!user.is_staff());
        user.role = Role::Admin;
        assert!(user.is_staff());
    }
}
