//! Pyrolink Core - Device model, wiring, and floor-plan state
//!
//! This crate provides the foundational types for the Pyrolink system:
//! - Device and serial-number types for placed field hardware
//! - Wire connections between device terminals
//! - The authoritative socket↔head mount relation
//! - Derived panel-module read models consumed by the simulator views
//! - Floor-plan state with validated editor-facing mutations

pub mod connection;
pub mod device;
pub mod module;
pub mod mount;
pub mod plan;

pub use connection::{Connection, ConnectionId, TerminalId};
pub use device::{clamp_label, Device, DeviceId, DeviceKind, SerialNumber, MAX_LABEL_LEN};
pub use module::{ConnectedDeviceInfo, Direction, ModuleKind, ModuleStatus, PanelModule};
pub use mount::MountMap;
pub use plan::{FloorPlan, PlanError};
