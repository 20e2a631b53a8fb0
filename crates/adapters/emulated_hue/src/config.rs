//! Emulated Hue integration configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::Deserialize;

use emuhue_domain::bridge::BridgeIdentity;
use emuhue_domain::error::HubError;
use emuhue_domain::ssdp;

use crate::error::EmulatedHueError;
use crate::local_ip;

/// Configuration for the emulated Hue integration, as written by the user.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmulatedHueConfig {
    /// Start the discovery responder.
    pub enabled: bool,
    /// Interface address used to join the SSDP group.
    ///
    /// When unset, the address of the default route is detected at startup.
    pub host_ip: Option<IpAddr>,
    /// Address advertised to discovery clients. Defaults to the host address.
    pub advertise_ip: Option<IpAddr>,
    /// Port advertised to discovery clients. Defaults to the HTTP listen port.
    pub advertise_port: Option<u16>,
    /// Bind the SSDP socket to the wildcard address rather than `host_ip`.
    pub upnp_bind_multicast: bool,
    /// Identifiers advertised by the bridge.
    pub bridge: BridgeIdentity,
}

impl Default for EmulatedHueConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host_ip: None,
            advertise_ip: None,
            advertise_port: None,
            upnp_bind_multicast: true,
            bridge: BridgeIdentity::default(),
        }
    }
}

/// Fully resolved settings; every default has been applied and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHueConfig {
    /// Interface used to join the SSDP group.
    pub interface: Ipv4Addr,
    /// HTTP address placed in `LOCATION` and `URLBase`.
    pub advertise: SocketAddr,
    /// Bind the SSDP socket to the wildcard address.
    pub bind_multicast: bool,
    /// Identifiers advertised by the bridge.
    pub identity: BridgeIdentity,
}

impl EmulatedHueConfig {
    /// Apply defaults and validate.
    ///
    /// `listen_port` is the port the HTTP server serving the description
    /// document listens on.
    ///
    /// # Errors
    ///
    /// Returns [`EmulatedHueError::Ipv6Interface`] for an IPv6 `host_ip`,
    /// [`EmulatedHueError::LocalAddress`] when the host address must be
    /// detected and cannot be (a disabled integration with an explicit
    /// `advertise_ip` never detects it), and [`EmulatedHueError::Domain`] when the
    /// advertised address or the bridge identity is invalid.
    pub fn resolve(&self, listen_port: u16) -> Result<ResolvedHueConfig, EmulatedHueError> {
        let interface = match self.host_ip {
            Some(IpAddr::V4(ip)) => ip,
            Some(IpAddr::V6(ip)) => return Err(EmulatedHueError::Ipv6Interface(ip)),
            // A disabled integration never binds the interface.
            None if !self.enabled && self.advertise_ip.is_some() => Ipv4Addr::UNSPECIFIED,
            None => local_ip::detect()?,
        };

        let advertise = SocketAddr::new(
            self.advertise_ip.unwrap_or(IpAddr::V4(interface)),
            self.advertise_port.unwrap_or(listen_port),
        );

        ssdp::validate_advertise(advertise)
            .map_err(|err| EmulatedHueError::Domain(HubError::from(err)))?;
        self.bridge
            .validate()
            .map_err(|err| EmulatedHueError::Domain(HubError::from(err)))?;

        Ok(ResolvedHueConfig {
            interface,
            advertise,
            bind_multicast: self.upnp_bind_multicast,
            identity: self.bridge.clone(),
        })
    }
}
