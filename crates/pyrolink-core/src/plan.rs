//! Floor-plan state as seen by the derivation engine.
//!
//! The external editor owns placement, geometry, and rendering; this
//! struct holds only what discovery needs: the placed devices in
//! placement order, the wires between them, the socket↔head mount
//! relation, and the loop power flag. Mutations validate at the edge so
//! traversal can treat the stored state as well-formed.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::connection::{Connection, ConnectionId, TerminalId};
use crate::device::{clamp_label, Device, DeviceId, DeviceKind};
use crate::mount::MountMap;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("unknown device: {0}")]
    UnknownDevice(DeviceId),
    #[error("device already placed: {0}")]
    DuplicateDevice(DeviceId),
    #[error("a wire must join two distinct devices")]
    SelfLoop,
    #[error("device {0} is not an AG socket")]
    NotASocket(DeviceId),
    #[error("device {0} is not an AG head")]
    NotAHead(DeviceId),
    #[error("serial number {0:#x} does not fit in 48 bits")]
    SerialOutOfRange(u64),
}

/// Editable plan state: devices, wires, mounts, and the power flag
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FloorPlan {
    devices: Vec<Device>,
    connections: Vec<Connection>,
    mounts: MountMap,
    /// Whether the operator has raised the loop ("power on")
    powered: bool,
}

impl FloorPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a device on the plan
    pub fn add_device(&mut self, device: Device) -> Result<(), PlanError> {
        if self.device(&device.id).is_some() {
            return Err(PlanError::DuplicateDevice(device.id.clone()));
        }
        debug!(device = %device.id, kind = ?device.kind, "Device placed");
        self.devices.push(device);
        Ok(())
    }

    /// Remove a device, cascading to its wires and any mount pairing
    pub fn remove_device(&mut self, id: &DeviceId) -> Result<(), PlanError> {
        let before = self.devices.len();
        self.devices.retain(|d| &d.id != id);
        if self.devices.len() == before {
            return Err(PlanError::UnknownDevice(id.clone()));
        }
        self.connections
            .retain(|c| &c.from_device != id && &c.to_device != id);
        self.mounts.remove_device(id);
        debug!(device = %id, "Device removed with its wires and mounts");
        Ok(())
    }

    /// Wire two device terminals together
    pub fn add_wire(
        &mut self,
        from: &DeviceId,
        from_terminal: TerminalId,
        to: &DeviceId,
        to_terminal: TerminalId,
    ) -> Result<ConnectionId, PlanError> {
        if from == to {
            return Err(PlanError::SelfLoop);
        }
        if self.device(from).is_none() {
            return Err(PlanError::UnknownDevice(from.clone()));
        }
        if self.device(to).is_none() {
            return Err(PlanError::UnknownDevice(to.clone()));
        }
        let wire = Connection::new(from.clone(), from_terminal, to.clone(), to_terminal);
        let id = wire.id.clone();
        self.connections.push(wire);
        Ok(id)
    }

    /// Remove a wire by id; removing a wire that is already gone is a no-op
    pub fn remove_wire(&mut self, id: &ConnectionId) {
        self.connections.retain(|c| &c.id != id);
    }

    /// Remove every wire between two devices
    pub fn disconnect(&mut self, a: &DeviceId, b: &DeviceId) {
        self.connections.retain(|c| !c.joins(a, b));
    }

    /// Mount a detector head on a socket, displacing stale pairings
    pub fn mount_head(&mut self, socket: &DeviceId, head: &DeviceId) -> Result<(), PlanError> {
        match self.device(socket) {
            None => return Err(PlanError::UnknownDevice(socket.clone())),
            Some(d) if d.kind != DeviceKind::AgSocket => {
                return Err(PlanError::NotASocket(socket.clone()))
            }
            Some(_) => {}
        }
        match self.device(head) {
            None => return Err(PlanError::UnknownDevice(head.clone())),
            Some(d) if d.kind != DeviceKind::AgHead => {
                return Err(PlanError::NotAHead(head.clone()))
            }
            Some(_) => {}
        }
        self.mounts.mount(socket, head);
        debug!(socket = %socket, head = %head, "Head mounted");
        Ok(())
    }

    /// Take the head off a socket
    pub fn unmount_head(&mut self, socket: &DeviceId) -> Option<DeviceId> {
        self.mounts.unmount_socket(socket)
    }

    /// Relabel a device; labels are clamped, never rejected
    pub fn set_label(&mut self, id: &DeviceId, label: &str) -> Result<(), PlanError> {
        let device = self
            .devices
            .iter_mut()
            .find(|d| &d.id == id)
            .ok_or_else(|| PlanError::UnknownDevice(id.clone()))?;
        device.label = clamp_label(label);
        Ok(())
    }

    /// Raise the loop (operator power-on)
    pub fn power_on(&mut self) {
        if !self.powered {
            debug!("Loop power raised");
        }
        self.powered = true;
    }

    /// Drop loop power
    pub fn power_off(&mut self) {
        if self.powered {
            debug!("Loop power dropped");
        }
        self.powered = false;
    }

    pub fn is_powered(&self) -> bool {
        self.powered
    }

    /// Look up a device by id
    pub fn device(&self, id: &DeviceId) -> Option<&Device> {
        self.devices.iter().find(|d| &d.id == id)
    }

    /// All devices in placement order
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// All wires in creation order
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// The socket↔head mount relation
    pub fn mounts(&self) -> &MountMap {
        &self.mounts
    }
}
