//! # emuhue-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `DatagramSocket`: receive and send UDP datagrams
//!   - `Integration`: setup/teardown lifecycle driven by the binary
//! - Provide the `DiscoveryResponder` use-case: answer SSDP `M-SEARCH`
//!   requests on a datagram socket until closed
//!
//! ## Dependency rule
//! Depends on `emuhue-domain` only (plus `tokio` for tasks and channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
