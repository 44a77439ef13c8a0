//! OAuth flow endpoint handlers.

use axum::extract::{RawQuery, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{routing::get, Router};
use tracing::{debug, warn};

use crate::content::render_token_page;
use crate::state::AppState;
use crate::utils::http_helpers::{first_query_value, redirect_with_status, HTTPError};

const AUTH_PATH: &str = "/auth";

/// Registers the OAuth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(AUTH_PATH, get(auth))
        .route("/oauth-callback", get(oauth_callback))
}

/// Sends the browser to the provider's consent page.
async fn auth(State(state): State<AppState>) -> Result<Response, HTTPError> {
    redirect_with_status(StatusCode::FOUND, &state.provider.authorization_url())
}

/// Restarts the flow; the provider issues a new code on each consent.
fn restart_flow() -> Response {
    Redirect::temporary(AUTH_PATH).into_response()
}

/// Exchanges the `code` handed back by the provider and shows the token.
///
/// Every failure, from a malformed query to a rejected code, sends the
/// browser back to `/auth`.
async fn oauth_callback(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Response {
    let code = match first_query_value(query.as_deref().unwrap_or(""), "code") {
        Ok(Some(code)) if !code.is_empty() => code,
        Ok(_) => {
            debug!("oauth callback without code, restarting flow");
            return restart_flow();
        }
        Err(e) => {
            debug!("unparsable oauth callback query: {}", e);
            return restart_flow();
        }
    };

    match state.provider.exchange_code(&code).await {
        Ok(token) if !token.is_empty() => {
            ([(CONTENT_TYPE, "text/html")], render_token_page(&token)).into_response()
        }
        Ok(_) => {
            warn!(
                event_name = "oauth.exchange.failed",
                event_domain = "oauth",
                provider = state.provider.get_name(),
                "error obtaining token: provider returned an empty token"
            );
            restart_flow()
        }
        Err(e) => {
            warn!(
                event_name = "oauth.exchange.failed",
                event_domain = "oauth",
                provider = state.provider.get_name(),
                "error obtaining token: {}",
                e
            );
            restart_flow()
        }
    }
}
