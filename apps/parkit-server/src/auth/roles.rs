// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles for authorization.
///
/// ## Role Hierarchy
///
/// - `Admin` - Full access, including staff endpoints
/// - `Staff` - Gate attendants: scan and check in any booking
/// - `Customer` - Books spots and manages own bookings, profile and vehicles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
    /// Default for authenticated users (least privilege).
    #[default]
    Customer,
}

impl Role {
    /// Check if this role has at least the privileges of the required role.
    pub fn has_privilege(&self, required: Role) -> bool {
        match (self, required) {
            (Role::Admin, _) => true,
            (Role::Staff, Role::Staff | Role::Customer) => true,
            (Role::Customer, Role::Customer) => true,
            _ => false,
        }
    }

    /// Parse role from a token claim (case-insensitive).
    pub fn parse(s: &str) -> Option<Role> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "staff" => Some(Role::Staff),
            "customer" | "user" => Some(Role::Customer),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Staff => write!(f, "staff"),
            Role::Customer => write!(f, "customer"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_has_all_privileges() {
        assert!(Role::Admin.has_privilege(Role::Admin));
        assert!(Role::Admin.has_privilege(Role::Staff));
        assert!(Role::Admin.has_privilege(Role::Customer));
    }

    #[test]
    fn staff_cannot_act_as_admin() {
        assert!(!Role::Staff.has_privilege(Role::Admin));
        assert!(Role::Staff.has_privilege(Role::Staff));
        assert!(Role::Staff.has_privilege(Role::Customer));
    }

    #[test]
    fn customer_only_has_customer_privilege() {
        assert!(!Role::Customer.has_privilege(Role::Admin));
        assert!(!Role::Customer.has_privilege(Role::Staff));
        assert!(Role::Customer.has_privilege(Role::Customer));
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Role::parse("STAFF"), Some(Role::Staff));
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
        assert_eq!(Role::parse("user"), Some(Role::Customer));
        assert_eq!(Role::parse("valet"), None);
    }

    #[test]
    fn default_role_is_customer() {
        assert_eq!(Role::default(), Role::Customer);
    }
}
