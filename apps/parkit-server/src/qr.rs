// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! QR confirmation codes.
//!
//! Images are rendered by the public `api.qrserver.com` service; the server
//! only builds the URL that encodes the booking token.

use rand::{distributions::Uniform, Rng};
use url::{ParseError, Url};

const QR_SERVICE_URL: &str = "https://api.qrserver.com/v1/create-qr-code/";
const QR_SIZE: &str = "200x200";
const TOKEN_LEN: usize = 13;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `len` random lowercase base36 characters.
pub fn random_base36(len: usize) -> String {
    let alphabet = Uniform::from(0..BASE36.len());
    rand::thread_rng()
        .sample_iter(alphabet)
        .take(len)
        .map(|i| BASE36[i] as char)
        .collect()
}

/// URL of a QR image encoding `booking-<token>`.
pub fn qr_code_url(token: &str) -> Result<String, ParseError> {
    let data = format!("booking-{token}");
    let url = Url::parse_with_params(QR_SERVICE_URL, [("data", data.as_str()), ("size", QR_SIZE)])?;
    Ok(url.into())
}

/// A fresh QR URL with a random token.
pub fn generate_qr_code() -> Result<String, ParseError> {
    qr_code_url(&random_base36(TOKEN_LEN))
}
