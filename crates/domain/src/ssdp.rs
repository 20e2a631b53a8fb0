//! SSDP discovery: response templates and `M-SEARCH` matching.
//!
//! The emulated bridge answers every `M-SEARCH` with one of two canned
//! responses. Both are rendered once from the [`BridgeIdentity`] and the
//! advertised HTTP address, then served byte-for-byte on every request.
//!
//! Matching is a plain substring test on the decoded payload. Real clients
//! frame their requests inconsistently, so the request line is not parsed.

use std::net::{Ipv4Addr, SocketAddr};

use crate::bridge::BridgeIdentity;
use crate::error::ValidationError;

/// SSDP multicast group.
pub const SSDP_MULTICAST_ADDR: Ipv4Addr = Ipv4Addr::new(239, 255, 255, 250);

/// SSDP multicast port.
pub const SSDP_PORT: u16 = 1900;

/// Method marker a payload must contain to be answered.
pub const MSEARCH_MARKER: &str = "M-SEARCH";

/// `SERVER` header of a BSB002 bridge on firmware 1.16.
pub const SERVER_HEADER: &str = "FreeRTOS/6.0.5, UPnP/1.0, IpBridge/1.16.0";

/// `max-age` advertised in `CACHE-CONTROL`, in seconds.
pub const MAX_AGE_SECS: u32 = 60;

/// Path of the description document on the advertised HTTP server.
pub const DESCRIPTION_PATH: &str = "/description.xml";

/// The two search targets the bridge answers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTarget {
    /// `upnp:rootdevice`
    RootDevice,
    /// `urn:schemas-upnp-org:device:basic:1`
    BasicDevice,
}

impl SearchTarget {
    /// Value of the `ST` header.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RootDevice => "upnp:rootdevice",
            Self::BasicDevice => "urn:schemas-upnp-org:device:basic:1",
        }
    }

    /// Value of the `USN` header for the given identity.
    #[must_use]
    pub fn unique_service_name(self, identity: &BridgeIdentity) -> String {
        match self {
            Self::RootDevice => format!("{}::{}", identity.udn(), self.as_str()),
            Self::BasicDevice => identity.udn(),
        }
    }

    /// Pick the search target answering a decoded `M-SEARCH` payload.
    ///
    /// The root-device target wins whenever `upnp:rootdevice` appears
    /// anywhere in the payload (case-sensitive).
    #[must_use]
    pub fn for_request(decoded: &str) -> Self {
        if decoded.contains(Self::RootDevice.as_str()) {
            Self::RootDevice
        } else {
            Self::BasicDevice
        }
    }
}

/// Decode a datagram as UTF-8, dropping any invalid byte sequence.
///
/// Never fails: bytes that do not form valid UTF-8 are removed rather than
/// replaced, so an ASCII marker split by garbage bytes still matches.
#[must_use]
pub fn decode_payload(payload: &[u8]) -> String {
    payload.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Check that an advertised address is reachable by discovery clients.
///
/// # Errors
///
/// Returns [`ValidationError::ZeroPort`] for port `0` and
/// [`ValidationError::UnspecifiedAddress`] for a wildcard IP.
pub fn validate_advertise(advertise: SocketAddr) -> Result<(), ValidationError> {
    if advertise.port() == 0 {
        return Err(ValidationError::ZeroPort);
    }
    if advertise.ip().is_unspecified() {
        return Err(ValidationError::UnspecifiedAddress(advertise.ip()));
    }
    Ok(())
}

/// Pre-rendered SSDP responses, built once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseTemplates {
    root_device: Box<[u8]>,
    basic_device: Box<[u8]>,
}

impl ResponseTemplates {
    /// Render both responses for `identity` advertised at `advertise`.
    #[must_use]
    pub fn new(identity: &BridgeIdentity, advertise: SocketAddr) -> Self {
        Self {
            root_device: render(identity, advertise, SearchTarget::RootDevice),
            basic_device: render(identity, advertise, SearchTarget::BasicDevice),
        }
    }

    /// Bytes sent for the given search target.
    #[must_use]
    pub fn get(&self, target: SearchTarget) -> &[u8] {
        match target {
            SearchTarget::RootDevice => &self.root_device[..],
            SearchTarget::BasicDevice => &self.basic_device[..],
        }
    }

    /// Response for a raw datagram, or `None` when it is not an `M-SEARCH`.
    #[must_use]
    pub fn response_for(&self, payload: &[u8]) -> Option<&[u8]> {
        let decoded = decode_payload(payload);
        if !decoded.contains(MSEARCH_MARKER) {
            return None;
        }
        Some(self.get(SearchTarget::for_request(&decoded)))
    }
}

// CRLF line endings and the trailing blank line are mandatory in SSDP.
fn render(identity: &BridgeIdentity, advertise: SocketAddr, target: SearchTarget) -> Box<[u8]> {
    let lines = [
        "HTTP/1.1 200 OK".to_string(),
        format!("CACHE-CONTROL: max-age={MAX_AGE_SECS}"),
        "EXT:".to_string(),
        format!("LOCATION: http://{advertise}{DESCRIPTION_PATH}"),
        format!("SERVER: {SERVER_HEADER}"),
        format!("hue-bridgeid: {}", identity.serial),
        format!("ST: {}", target.as_str()),
        format!("USN: {}", target.unique_service_name(identity)),
    ];

    let mut response = String::new();
    for line in lines {
        response.push_str(&line);
        response.push_str("\r\n");
    }
    response.push_str("\r\n");
    response.into_bytes().into_boxed_slice()
}
