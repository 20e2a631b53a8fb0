//! Local IPv4 address detection.
//!
//! Connecting a UDP socket only selects a route; no packet leaves the host.
//! The address the kernel picks for that route is the one LAN clients can
//! reach us on.

use std::net::{Ipv4Addr, SocketAddr, UdpSocket};

use crate::error::EmulatedHueError;

/// Any routable address works; nothing is sent to it.
const PROBE_TARGET: (Ipv4Addr, u16) = (Ipv4Addr::new(8, 8, 8, 8), 80);

/// Return the IPv4 address of the interface holding the default route.
///
/// # Errors
///
/// Returns [`EmulatedHueError::LocalAddress`] when the host has no IPv4
/// route.
pub fn detect() -> Result<Ipv4Addr, EmulatedHueError> {
    let socket =
        UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).map_err(EmulatedHueError::LocalAddress)?;
    socket
        .connect(PROBE_TARGET)
        .map_err(EmulatedHueError::LocalAddress)?;

    match socket.local_addr().map_err(EmulatedHueError::LocalAddress)? {
        SocketAddr::V4(addr) => {
            tracing::debug!(ip = %addr.ip(), "detected local address");
            Ok(*addr.ip())
        }
        SocketAddr::V6(addr) => Err(EmulatedHueError::Ipv6Interface(*addr.ip())),
    }
}
