//! Datagram port: the socket the discovery responder reads from and
//! answers on.
//!
//! The adapter crate implements it over a multicast-joined UDP socket;
//! tests implement it in memory.

use std::future::Future;
use std::io;
use std::net::SocketAddr;

/// A connectionless socket exclusively owned by one reader.
pub trait DatagramSocket: Send + Sync {
    /// Wait for the next datagram, copying it into `buf`.
    ///
    /// Returns the number of bytes written and the sender's address.
    fn recv_from(
        &self,
        buf: &mut [u8],
    ) -> impl Future<Output = io::Result<(usize, SocketAddr)>> + Send;

    /// Send `buf` to `target` as a single datagram.
    fn send_to(
        &self,
        buf: &[u8],
        target: SocketAddr,
    ) -> impl Future<Output = io::Result<usize>> + Send;
}
