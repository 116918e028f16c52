//! Device types for the simulated addressable loop

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use uuid::Uuid;

/// Maximum length of a user-editable device label
pub const MAX_LABEL_LEN: usize = 20;

/// Unique identifier for a placed device instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceId(pub String);

impl DeviceId {
    /// Mint a fresh instance id
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create a DeviceId from an externally supplied string (e.g. import)
    pub fn from_str_id(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DeviceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 48-bit factory serial number, immutable for the life of a device.
/// Deserialization goes through the same range check as [`SerialNumber::new`],
/// so an import cannot smuggle in a wider value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct SerialNumber(u64);

impl SerialNumber {
    /// Largest representable serial (2^48 - 1)
    pub const MAX: u64 = (1 << 48) - 1;

    /// Create a serial number, rejecting values that do not fit in 48 bits
    pub fn new(raw: u64) -> Result<Self, crate::plan::PlanError> {
        if raw > Self::MAX {
            return Err(crate::plan::PlanError::SerialOutOfRange(raw));
        }
        Ok(Self(raw))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for SerialNumber {
    type Error = crate::plan::PlanError;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<SerialNumber> for u64 {
    fn from(sn: SerialNumber) -> Self {
        sn.0
    }
}

impl std::fmt::Display for SerialNumber {
    /// Serials render as 12 lowercase hex digits, matching the printed label
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:012x}", self.0)
    }
}

/// Hardware type of a placed device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceKind {
    /// Control panel housing the modules
    #[serde(rename = "panel")]
    Panel,
    /// Loop driver module feeding one two-wire loop
    #[serde(rename = "loop-driver")]
    LoopDriver,
    /// Detector base half (AG series)
    #[serde(rename = "ag-socket")]
    AgSocket,
    /// Detector head half (AG series)
    #[serde(rename = "ag-head")]
    AgHead,
    /// Composite socket+head, produced by classification only
    #[serde(rename = "ag-detector")]
    AgDetector,
    /// Manual call point
    #[serde(rename = "mcp")]
    Mcp,
    #[serde(rename = "sounder")]
    Sounder,
    #[serde(rename = "input-unit")]
    InputUnit,
    #[serde(rename = "output-unit")]
    OutputUnit,
}

impl DeviceKind {
    /// Structural nodes carry the loop but never take an address
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Panel | Self::LoopDriver)
    }

    /// Addressable field devices (everything that is not structural)
    pub fn is_field_device(&self) -> bool {
        !self.is_structural()
    }
}

/// A device instance placed on the floor plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Unique instance identifier
    pub id: DeviceId,
    /// Hardware type
    pub kind: DeviceKind,
    /// User-editable label, clamped to [`MAX_LABEL_LEN`] characters
    pub label: String,
    /// Factory serial number
    pub sn: SerialNumber,
    /// Network address, panels only (informational)
    pub ip: Option<IpAddr>,
    /// Communication address from the last discovery run, if any.
    /// Populated by callers from derivation output; never an engine input.
    pub c_address: Option<u8>,
}

impl Device {
    /// Create a new device with an empty label
    pub fn new(id: DeviceId, kind: DeviceKind, sn: SerialNumber) -> Self {
        Self {
            id,
            kind,
            label: String::new(),
            sn,
            ip: None,
            c_address: None,
        }
    }

    /// Builder-style label assignment, clamped like the editor does
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = clamp_label(label);
        self
    }
}

/// Truncate a label to [`MAX_LABEL_LEN`] characters (not bytes)
pub fn clamp_label(label: &str) -> String {
    label.chars().take(MAX_LABEL_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_rejects_values_over_48_bits() {
        assert!(SerialNumber::new(SerialNumber::MAX).is_ok());
        assert!(SerialNumber::new(SerialNumber::MAX + 1).is_err());
    }

    #[test]
    fn serial_deserialization_applies_the_range_check() {
        let sn: SerialNumber = serde_json::from_str("5").unwrap();
        assert_eq!(sn.as_u64(), 5);
        let too_wide = (SerialNumber::MAX + 1).to_string();
        assert!(serde_json::from_str::<SerialNumber>(&too_wide).is_err());
    }

    #[test]
    fn serial_displays_as_12_hex_digits() {
        let sn = SerialNumber::new(0xAB_CDEF).unwrap();
        assert_eq!(sn.to_string(), "000000abcdef");
    }

    #[test]
    fn label_clamps_to_20_chars() {
        let long = "a very long label that keeps going";
        assert_eq!(clamp_label(long).chars().count(), MAX_LABEL_LEN);
        assert_eq!(clamp_label("short"), "short");
    }

    #[test]
    fn kind_classification() {
        assert!(DeviceKind::Panel.is_structural());
        assert!(DeviceKind::LoopDriver.is_structural());
        assert!(DeviceKind::Mcp.is_field_device());
        assert!(DeviceKind::AgSocket.is_field_device());
    }

    #[test]
    fn kind_serializes_with_wire_names() {
        let json = serde_json::to_string(&DeviceKind::LoopDriver).unwrap();
        assert_eq!(json, "\"loop-driver\"");
        let json = serde_json::to_string(&DeviceKind::AgDetector).unwrap();
        assert_eq!(json, "\"ag-detector\"");
    }
}
