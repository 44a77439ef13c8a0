//! Application startup and server initialization.
//!
//! This module validates the configuration, builds the OAuth provider and the
//! router, and serves it over TLS.

use std::net::SocketAddr;
use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use tracing::info;

use crate::config::ConfigV1;
use crate::providers::create_oauth_provider;
use crate::routes;
use crate::state::AppState;

/// Builds the shared state from a validated configuration.
///
/// # Errors
///
/// Returns an error if the client credentials are missing or the provider
/// cannot be created from the configuration.
pub fn build_state(config: &ConfigV1) -> Result<AppState, String> {
    config.validate()?;
    let provider = create_oauth_provider(&config.github)?;
    Ok(AppState { provider })
}

/// Initializes and runs the application server.
///
/// Everything that can be checked is checked before the listener is bound:
/// the client credentials, the provider URLs, the bind address and the TLS
/// material.
///
/// # Errors
///
/// Returns an error on any of the checks above, or if the server fails to
/// bind or encounters a runtime error.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(&config)?;

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .map_err(|e| format!("Invalid bind_address '{}': {}", config.bind_address, e))?;

    let tls = RustlsConfig::from_pem_file(&config.tls.cert_file, &config.tls.key_file)
        .await
        .map_err(|e| {
            format!(
                "Failed to load TLS certificate '{}' / key '{}': {}",
                config.tls.cert_file, config.tls.key_file, e
            )
        })?;

    let app = routes::create_router(state);

    info!("Listening on {}", addr);
    axum_server::bind_rustls(addr, tls)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
