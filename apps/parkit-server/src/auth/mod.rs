// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Bearer-token authentication for the ParkIt API.
//!
//! ## Auth Flow
//!
//! 1. The client signs the user in with the external identity provider
//!    (email/password or phone OTP)
//! 2. The client sends `Authorization: Bearer <access token>`
//! 3. The server:
//!    - Fetches the provider JWKS via HTTPS
//!    - Verifies JWT signature, expiry, issuer, audience
//!    - Extracts:
//!      - `sub` → canonical `user_id`
//!      - `app_metadata.role` or `publicMetadata.role` → [`Role`]
//!
//! ## Security
//!
//! - Catalog and health endpoints are public; everything else requires a token
//! - JWKS is cached with a 5 minute TTL
//! - Clock skew tolerance is 60 seconds

pub mod claims;
pub mod error;
pub mod extractor;
pub mod jwks;
pub mod roles;

pub use claims::AuthenticatedUser;
pub use error::AuthError;
pub use extractor::{Auth, OptionalAuth, StaffOnly};
pub use jwks::JwksManager;
pub use roles::Role;
