//! Bridge identity: the identifiers the emulated bridge advertises.
//!
//! Discovery clients correlate the SSDP response and the description
//! document through these values, so both are rendered from the same
//! [`BridgeIdentity`].

use serde::Deserialize;
use uuid::Uuid;

use crate::error::ValidationError;

/// Serial number reported by a genuine BSB002 bridge.
pub const DEFAULT_SERIAL: &str = "001788FFFE23BFC2";

/// Device UUID reported by a genuine BSB002 bridge.
pub const DEFAULT_UUID: Uuid = uuid::uuid!("2f402f80-da50-11e1-9b23-001788255acc");

/// Prefix of the friendly name shown by Hue apps.
pub const DEFAULT_NAME: &str = "emuhue Bridge";

/// Identifiers of the emulated bridge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BridgeIdentity {
    /// Friendly-name prefix; the advertised IP is appended in parentheses.
    pub name: String,
    /// Bridge id, sent as the `hue-bridgeid` header and `serialNumber`.
    pub serial: String,
    /// Device UUID, used for the `USN` header and the `UDN` element.
    pub uuid: Uuid,
}

impl Default for BridgeIdentity {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            serial: DEFAULT_SERIAL.to_string(),
            uuid: DEFAULT_UUID,
        }
    }
}

impl BridgeIdentity {
    /// Unique device name, `uuid:<uuid>`.
    #[must_use]
    pub fn udn(&self) -> String {
        format!("uuid:{}", self.uuid)
    }

    /// Check the identity invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSerial`] when the serial is not
    /// exactly 16 hexadecimal digits.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.serial.len() != 16 || !self.serial.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidSerial(self.serial.clone()));
        }
        Ok(())
    }
}
