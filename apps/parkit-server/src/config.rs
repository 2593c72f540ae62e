// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, defaults, and the [`ServerConfig`] loaded once
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `DATA_DIR` | Root directory for profile and vehicle files | `./data` |
//! | `AUTH_JWKS_URL` | Identity provider JWKS endpoint | Unset = development mode |
//! | `AUTH_ISSUER` | Expected JWT issuer claim | Optional |
//! | `AUTH_AUDIENCE` | Expected JWT audience claim | Optional |
//! | `BOOKING_SWEEP_INTERVAL_SECS` | Seconds between expired-booking sweeps | `60` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the data directory.
///
/// Profiles and vehicles are written as JSON files below this root.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// JWKS endpoint of the identity provider. When unset the server accepts
/// unsigned tokens (development mode).
pub const AUTH_JWKS_URL_ENV: &str = "AUTH_JWKS_URL";
pub const AUTH_ISSUER_ENV: &str = "AUTH_ISSUER";
pub const AUTH_AUDIENCE_ENV: &str = "AUTH_AUDIENCE";

pub const BOOKING_SWEEP_INTERVAL_ENV: &str = "BOOKING_SWEEP_INTERVAL_SECS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
    #[error("invalid bind address {0}")]
    InvalidBindAddress(String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Identity provider settings for JWT verification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSettings {
    pub jwks_url: Option<String>,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

/// Server configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub auth: AuthSettings,
    pub sweep_interval: Duration,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup(PORT_ENV) {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: PORT_ENV,
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let bind = format!("{host}:{port}");
        let bind_addr: SocketAddr = bind
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(bind.clone()))?;

        let sweep_interval = match lookup(BOOKING_SWEEP_INTERVAL_ENV) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: BOOKING_SWEEP_INTERVAL_ENV,
                        value: raw,
                    })
                }
            },
            None => DEFAULT_SWEEP_INTERVAL,
        };

        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Ok(Self {
            bind_addr,
            data_dir: PathBuf::from(
                lookup(DATA_DIR_ENV).unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
            ),
            auth: AuthSettings {
                jwks_url: non_empty(AUTH_JWKS_URL_ENV),
                issuer: non_empty(AUTH_ISSUER_ENV),
                audience: non_empty(AUTH_AUDIENCE_ENV),
            },
            sweep_interval,
            log_format: lookup(LOG_FORMAT_ENV)
                .map(|value| LogFormat::parse(&value))
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.auth, AuthSettings::default());
        assert_eq!(config.sweep_interval, Duration::from_secs(60));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn reads_all_variables() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("DATA_DIR", "/var/lib/parkit"),
            ("AUTH_JWKS_URL", "https://id.example.com/.well-known/jwks.json"),
            ("AUTH_ISSUER", "https://id.example.com"),
            ("AUTH_AUDIENCE", ""),
            ("BOOKING_SWEEP_INTERVAL_SECS", "5"),
            ("LOG_FORMAT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/parkit"));
        assert_eq!(
            config.auth.jwks_url.as_deref(),
            Some("https://id.example.com/.well-known/jwks.json")
        );
        assert_eq!(config.auth.issuer.as_deref(), Some("https://id.example.com"));
        assert!(config.auth.audience.is_none());
        assert_eq!(config.sweep_interval, Duration::from_secs(5));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_bad_port_and_interval() {
        assert!(matches!(
            ServerConfig::from_lookup(lookup_from(&[("PORT", "eighty")])),
            Err(ConfigError::InvalidValue { name: "PORT", .. })
        ));
        assert!(matches!(
            ServerConfig::from_lookup(lookup_from(&[("BOOKING_SWEEP_INTERVAL_SECS", "0")])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            ServerConfig::from_lookup(lookup_from(&[("HOST", "not a host")])),
            Err(ConfigError::InvalidBindAddress(_))
        ));
    }
}
