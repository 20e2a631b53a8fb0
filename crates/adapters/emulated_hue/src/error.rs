//! Emulated Hue adapter error types.

use std::net::Ipv6Addr;

use emuhue_domain::error::HubError;

/// Errors specific to the emulated Hue adapter.
#[derive(Debug, thiserror::Error)]
pub enum EmulatedHueError {
    /// Creating, configuring or binding the SSDP socket failed.
    #[error("failed to set up the SSDP socket")]
    Socket(#[source] std::io::Error),

    /// No `host_ip` was configured and the local address probe failed.
    #[error("failed to detect the local IPv4 address")]
    LocalAddress(#[source] std::io::Error),

    /// SSDP multicast is joined over IPv4 only.
    #[error("host address {0} is IPv6, SSDP discovery needs an IPv4 interface")]
    Ipv6Interface(Ipv6Addr),

    /// A domain-level error (validation, etc.).
    #[error("domain error")]
    Domain(#[source] HubError),
}

impl EmulatedHueError {
    /// Convert into a [`HubError`] for propagation across port boundaries.
    #[must_use]
    pub fn into_domain(self) -> HubError {
        match self {
            Self::Domain(err) => err,
            other => HubError::Network(Box::new(other)),
        }
    }
}

impl From<EmulatedHueError> for HubError {
    fn from(err: EmulatedHueError) -> Self {
        err.into_domain()
    }
}
