//! Shared application state for axum handlers.

use std::net::SocketAddr;

use axum::body::Bytes;

use emuhue_domain::bridge::BridgeIdentity;
use emuhue_domain::description;

/// Application state shared across all axum handlers.
///
/// The description document never changes at runtime, so it is rendered
/// once here; cloning the state only bumps a reference count.
#[derive(Clone)]
pub struct AppState {
    pub(crate) description: Bytes,
}

impl AppState {
    /// Render the description for `identity` advertised at `advertise`.
    #[must_use]
    pub fn new(identity: &BridgeIdentity, advertise: SocketAddr) -> Self {
        Self {
            description: Bytes::from(description::render(identity, advertise)),
        }
    }
}
