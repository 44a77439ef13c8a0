//! HTTP route definitions and handlers.
//!
//! This module organizes the endpoints into two groups: static content
//! (landing page, config manifest, install script) and the OAuth flow.

mod content_routes;
mod oauth_routes;

use crate::state::AppState;
use axum::Router;

/// Creates the application router with all configured routes.
///
/// Unmatched paths are answered with the landing page.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(content_routes::routes())
        .merge(oauth_routes::routes())
        .fallback(content_routes::landing_page)
        .with_state(state)
}
