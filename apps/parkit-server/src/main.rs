// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use parkit_server::{
    api::router,
    config::{LogFormat, ServerConfig, DEFAULT_LOG_FILTER},
    state::{AppState, AuthConfig},
    storage::{JsonStorage, StoragePaths},
    sweeper::BookingSweeper,
};

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}

async fn shutdown_signal(shutdown: CancellationToken) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Shutdown signal received");
            shutdown.cancel();
        }
        _ = shutdown.cancelled() => {}
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // Tracing is not initialised yet.
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(config.log_format);

    let mut storage = JsonStorage::new(StoragePaths::new(&config.data_dir));
    if let Err(e) = storage.initialize() {
        tracing::error!(error = %e, data_dir = %config.data_dir.display(), "Failed to initialize storage");
        return ExitCode::FAILURE;
    }

    let auth_config = AuthConfig::from_settings(&config.auth);
    if auth_config.is_production() {
        tracing::info!(issuer = ?config.auth.issuer, "JWT verification against identity provider JWKS");
    } else {
        tracing::warn!("AUTH_JWKS_URL not set: accepting unsigned tokens (development mode)");
    }

    let state = AppState::new(storage).with_auth_config(auth_config);
    let shutdown = CancellationToken::new();

    let sweeper = BookingSweeper::new(state.store.clone()).with_interval(config.sweep_interval);
    let sweeper_handle = tokio::spawn(sweeper.run(shutdown.clone()));

    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, addr = %config.bind_addr, "Failed to bind");
            shutdown.cancel();
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        addr = %config.bind_addr,
        spots = state.catalog.all().len(),
        "ParkIt server listening (docs at /docs)"
    );

    let app = router(state);
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .await;

    shutdown.cancel();
    if let Err(e) = sweeper_handle.await {
        tracing::warn!(error = %e, "Booking sweeper task failed");
    }

    match served {
        Ok(()) => {
            tracing::info!("Server stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Server error");
            ExitCode::FAILURE
        }
    }
}
