//! `/description.xml` handler.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::state::AppState;

/// Content type of the description document.
pub const CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Serve the pre-rendered device description. No authentication.
pub async fn get(State(state): State<AppState>) -> impl IntoResponse {
    tracing::debug!(len = state.description.len(), "serving description document");
    ([(header::CONTENT_TYPE, CONTENT_TYPE)], state.description)
}
