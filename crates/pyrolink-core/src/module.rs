//! Derived panel-module read model.
//!
//! These types are recomputed on every relevant state change and handed
//! to the module-list and panel-simulation views. They are never stored
//! and never mutated in place.

use serde::{Deserialize, Serialize};

use crate::device::{DeviceId, DeviceKind, SerialNumber};

/// Which side of the loop a device was first reached from during discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// First branch explored from the loop driver
    Out,
    /// Any later branch (the return leg on a closed loop)
    In,
}

/// Slot type inside the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleKind {
    #[serde(rename = "controller")]
    Controller,
    #[serde(rename = "power-supply")]
    PowerSupply,
    #[serde(rename = "loop-driver")]
    LoopDriver,
}

/// Module health as shown in the panel simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleStatus {
    Online,
    Offline,
    /// Reserved for driver-reported loop faults; the derivation engine
    /// currently never emits it.
    Fault,
}

/// One addressed field device on a discovered loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedDeviceInfo {
    /// Instance id of the device (the socket's, for composites)
    pub instance_id: DeviceId,
    /// Display label after composite resolution
    pub label: String,
    /// Effective type after classification (e.g. `ag-detector`)
    pub kind: DeviceKind,
    /// Serial of the device (the socket's, for composites)
    pub sn: SerialNumber,
    /// Serial of the mounted head, composites only
    pub head_sn: Option<SerialNumber>,
    /// Communication address assigned during loop power-up
    pub c_address: u8,
    /// Branch the device was first discovered on
    pub discovered_from: Direction,
}

/// One module slot in the derived panel view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelModule {
    /// Id of the backing device (panel for controller/power-supply,
    /// the loop-driver device otherwise)
    pub id: DeviceId,
    pub kind: ModuleKind,
    /// 1-based slot: controller 1, power-supply 2, loop drivers 3..N
    pub slot: u8,
    pub status: ModuleStatus,
    pub label: String,
    /// Number of distinct reachable field devices, loop-driver slots only
    pub connected_device_count: usize,
    /// Addressed device list, present only once the loop is powered on
    pub connected_devices: Option<Vec<ConnectedDeviceInfo>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Direction::Out).unwrap(), "\"out\"");
        assert_eq!(serde_json::to_string(&Direction::In).unwrap(), "\"in\"");
    }

    #[test]
    fn module_kind_wire_names() {
        let json = serde_json::to_string(&ModuleKind::PowerSupply).unwrap();
        assert_eq!(json, "\"power-supply\"");
    }
}
