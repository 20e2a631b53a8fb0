//! # emuhue-domain
//!
//! Pure domain model for the emulated Hue bridge.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, bridge identity
//! - Render the two SSDP discovery responses and decide which one answers
//!   a given datagram
//! - Render the UPnP device description document
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod bridge;
pub mod description;
pub mod ssdp;
