//! UPnP device description served at `/description.xml`.

use std::net::SocketAddr;

use crate::bridge::BridgeIdentity;

/// Render the device description of the emulated bridge.
///
/// The document must agree with the SSDP responses on the advertised
/// address, serial and UUID, so it is rendered from the same inputs.
#[must_use]
pub fn render(identity: &BridgeIdentity, advertise: SocketAddr) -> String {
    let friendly_name = escape(&format!("{} ({})", identity.name, advertise.ip()));
    let serial = escape(&identity.serial);
    let udn = identity.udn();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" ?>
<root xmlns="urn:schemas-upnp-org:device-1-0">
<specVersion>
<major>1</major>
<minor>0</minor>
</specVersion>
<URLBase>http://{advertise}/</URLBase>
<device>
<deviceType>urn:schemas-upnp-org:device:Basic:1</deviceType>
<friendlyName>{friendly_name}</friendlyName>
<manufacturer>Royal Philips Electronics</manufacturer>
<manufacturerURL>http://www.philips.com</manufacturerURL>
<modelDescription>Philips hue Personal Wireless Lighting</modelDescription>
<modelName>Philips hue bridge 2015</modelName>
<modelNumber>BSB002</modelNumber>
<modelURL>http://www.meethue.com</modelURL>
<serialNumber>{serial}</serialNumber>
<UDN>{udn}</UDN>
</device>
</root>
"#
    )
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
