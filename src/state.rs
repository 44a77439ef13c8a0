//! Shared application state.
//!
//! Holds the OAuth provider built from the configuration at startup. It is
//! read-only for the lifetime of the process.

use crate::providers::OAuthProvider;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Provider used to send users to consent and to exchange codes.
    pub provider: Arc<dyn OAuthProvider>,
}
