//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use emuhue_domain::ssdp::DESCRIPTION_PATH;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Serves the description document at the path advertised in SSDP
/// `LOCATION` headers. Includes a [`TraceLayer`] that logs each HTTP
/// request/response at the `DEBUG` level using the `tracing` ecosystem.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(DESCRIPTION_PATH, get(crate::description::get))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
