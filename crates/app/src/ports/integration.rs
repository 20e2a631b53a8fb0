//! Integration port: setup/teardown lifecycle for hub integrations.
//!
//! An integration bridges an external protocol (here: Hue discovery over
//! SSDP) into the hub. The binary crate owns every integration and drives
//! its lifecycle explicitly; nothing is looked up from a global registry.

use std::future::Future;

use emuhue_domain::error::HubError;

/// A pluggable hub integration.
///
/// Implementations live in adapter crates (e.g. `adapter_emulated_hue`).
/// The binary crate calls the lifecycle methods in order:
///
/// 1. [`setup`](Self::setup): acquire resources and start background work
/// 2. (the server runs)
/// 3. [`teardown`](Self::teardown): release everything acquired in setup
pub trait Integration {
    /// Unique name identifying this integration (e.g. `"emulated_hue"`).
    fn name(&self) -> &'static str;

    /// Acquire resources and start serving.
    ///
    /// Failing to acquire a resource the integration cannot work without
    /// (a socket, an address) is a fatal setup error.
    fn setup(&mut self) -> impl Future<Output = Result<(), HubError>> + Send;

    /// Called on graceful shutdown. Stop background tasks and release
    /// sockets. Must be a no-op when `setup` never succeeded.
    fn teardown(&mut self) -> impl Future<Output = Result<(), HubError>> + Send;
}
