//! Multicast UDP socket for SSDP.
//!
//! The socket is built with `socket2` so the options that must be set
//! before `bind` (address reuse) can be applied, then handed to tokio.

use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use socket2::{Domain, Protocol, Socket, Type};

use emuhue_app::ports::DatagramSocket;
use emuhue_domain::ssdp::{SSDP_MULTICAST_ADDR, SSDP_PORT};

use crate::error::EmulatedHueError;

/// Where and how the SSDP socket listens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MulticastBinding {
    /// Local interface used to join the group and to send.
    pub interface: Ipv4Addr,
    /// Multicast group to join.
    pub group: Ipv4Addr,
    /// UDP port to bind.
    pub port: u16,
    /// Bind to the wildcard address instead of `interface`.
    ///
    /// Most platforms only deliver multicast datagrams to sockets bound to
    /// the wildcard (or the group) address.
    pub bind_multicast: bool,
}

impl MulticastBinding {
    /// Standard SSDP group and port on the given interface.
    #[must_use]
    pub fn ssdp(interface: Ipv4Addr, bind_multicast: bool) -> Self {
        Self {
            interface,
            group: SSDP_MULTICAST_ADDR,
            port: SSDP_PORT,
            bind_multicast,
        }
    }

    /// Local address passed to `bind`.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddrV4 {
        let ip = if self.bind_multicast {
            Ipv4Addr::UNSPECIFIED
        } else {
            self.interface
        };
        SocketAddrV4::new(ip, self.port)
    }
}

/// Create a non-blocking UDP socket joined to the binding's group.
///
/// # Errors
///
/// Returns the first OS error raised while creating, configuring or
/// binding the socket.
pub fn bind(binding: &MulticastBinding) -> io::Result<std::net::UdpSocket> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_nonblocking(true)?;

    // Lets other SSDP listeners on the host share the port.
    socket.set_reuse_address(true)?;

    socket.set_multicast_if_v4(&binding.interface)?;
    socket.join_multicast_v4(&binding.group, &binding.interface)?;
    socket.bind(&SocketAddr::V4(binding.bind_addr()).into())?;

    Ok(socket.into())
}

/// [`DatagramSocket`] backed by a tokio UDP socket.
#[derive(Debug)]
pub struct UdpTransport(tokio::net::UdpSocket);

impl UdpTransport {
    /// Bind the SSDP socket and register it with the tokio reactor.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`EmulatedHueError::Socket`] when the socket cannot be
    /// created, joined to the group or bound.
    pub fn bind(binding: &MulticastBinding) -> Result<Self, EmulatedHueError> {
        let std_socket = bind(binding).map_err(EmulatedHueError::Socket)?;
        let socket =
            tokio::net::UdpSocket::from_std(std_socket).map_err(EmulatedHueError::Socket)?;

        tracing::info!(
            bind = %binding.bind_addr(),
            group = %binding.group,
            interface = %binding.interface,
            "SSDP socket bound"
        );

        Ok(Self(socket))
    }

    /// Address the socket is bound to.
    ///
    /// # Errors
    ///
    /// Propagates the OS error if the address cannot be queried.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.0.local_addr()
    }
}

impl From<tokio::net::UdpSocket> for UdpTransport {
    fn from(socket: tokio::net::UdpSocket) -> Self {
        Self(socket)
    }
}

impl DatagramSocket for UdpTransport {
    async fn recv_from(&self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
        self.0.recv_from(buf).await
    }

    async fn send_to(&self, buf: &[u8], target: SocketAddr) -> io::Result<usize> {
        self.0.send_to(buf, target).await
    }
}
