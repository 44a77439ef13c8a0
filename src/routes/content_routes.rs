//! Static content endpoints.

use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Router};

use crate::content::{StaticContent, LANDING_PAGE, STATIC_CONTENT};
use crate::state::AppState;

/// Registers one GET route per static payload.
pub fn routes() -> Router<AppState> {
    STATIC_CONTENT.iter().fold(Router::new(), |router, content| {
        router.route(content.path, get(move || content_handler(content)))
    })
}

/// Writes the payload verbatim with its configured content type.
async fn content_handler(content: &'static StaticContent) -> Response {
    ([(CONTENT_TYPE, content.content_type)], content.body).into_response()
}

pub async fn landing_page() -> Response {
    content_handler(&LANDING_PAGE).await
}
