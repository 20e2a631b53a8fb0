//! # emuhue-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the UPnP device description at `/description.xml`, the document
//!   SSDP responses point discovery clients at
//! - Serve a `/health` probe
//!
//! ## Dependency rule
//! Depends on `emuhue-domain` for rendering. Never leaks axum types into
//! the domain.

pub mod description;
pub mod router;
pub mod state;
