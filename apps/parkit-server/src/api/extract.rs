// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Body and query extractors that reject with [`ApiError`].
//!
//! axum's own `Json` and `Query` rejections answer with plain text; these
//! wrappers keep every failure in the `{"error": ...}` shape.

use axum::{
    extract::{FromRequest, FromRequestParts, Query},
    Json,
};

use crate::error::ApiError;

/// `Json<T>` with JSON error bodies.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `Query<T>` with JSON error bodies.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
