//! Panel-module derivation.
//!
//! The single entry point the simulator views call on every topology
//! edit or power toggle. Pure function of its inputs: nothing is
//! retained between calls and the inputs are never mutated, so callers
//! may invoke it as often as they like and memoize on input identity if
//! they care to.

use tracing::debug;

use pyrolink_core::{
    Connection, Device, DeviceKind, FloorPlan, ModuleKind, ModuleStatus, MountMap, PanelModule,
};

use crate::address::assign_addresses;
use crate::classify::classify;
use crate::graph::WiringGraph;
use crate::walk::walk_loop;

/// Fixed slot of the controller module
const CONTROLLER_SLOT: u8 = 1;
/// Fixed slot of the power-supply module
const POWER_SUPPLY_SLOT: u8 = 2;
/// First slot available to loop-driver modules
const FIRST_LOOP_SLOT: u8 = 3;

/// Derive the panel module list from raw plan state.
///
/// Per loop driver this runs a three-state machine:
/// - no direct wire to the panel → offline, nothing reported;
/// - wired but the loop not powered → online with only the structural
///   field-device count;
/// - wired and powered → online with the full discovered, classified,
///   addressed device list attached.
///
/// With no panel placed the module list is empty regardless of any
/// drivers or wiring present. Addresses are never preserved across a
/// rewire: every call re-derives from scratch.
pub fn derive_modules(
    devices: &[Device],
    connections: &[Connection],
    mounts: &MountMap,
    power_on: bool,
) -> Vec<PanelModule> {
    let Some(panel) = devices.iter().find(|d| d.kind == DeviceKind::Panel) else {
        return Vec::new();
    };

    let mut modules = vec![
        PanelModule {
            id: panel.id.clone(),
            kind: ModuleKind::Controller,
            slot: CONTROLLER_SLOT,
            status: ModuleStatus::Online,
            label: "Controller".to_string(),
            connected_device_count: 0,
            connected_devices: None,
        },
        PanelModule {
            id: panel.id.clone(),
            kind: ModuleKind::PowerSupply,
            slot: POWER_SUPPLY_SLOT,
            status: ModuleStatus::Online,
            label: "Power supply".to_string(),
            connected_device_count: 0,
            connected_devices: None,
        },
    ];

    let graph = WiringGraph::build(devices, connections);

    let drivers = devices.iter().filter(|d| d.kind == DeviceKind::LoopDriver);
    for (i, driver) in drivers.enumerate() {
        let slot = FIRST_LOOP_SLOT.saturating_add(u8::try_from(i).unwrap_or(u8::MAX));

        // Online means a single-hop wire to the panel, not reachability.
        let online = graph.adjacent(&driver.id, &panel.id);

        let (status, count, connected) = if online {
            let visits = walk_loop(&graph, devices, &driver.id);
            let classified = classify(&visits, devices, mounts);
            let count = classified.len();
            let connected = if power_on {
                Some(assign_addresses(classified))
            } else {
                None
            };
            (ModuleStatus::Online, count, connected)
        } else {
            (ModuleStatus::Offline, 0, None)
        };

        debug!(
            driver = %driver.id,
            slot,
            status = ?status,
            devices = count,
            "Loop driver module derived"
        );

        modules.push(PanelModule {
            id: driver.id.clone(),
            kind: ModuleKind::LoopDriver,
            slot,
            status,
            label: driver.label.clone(),
            connected_device_count: count,
            connected_devices: connected,
        });
    }

    modules
}

/// Convenience wrapper deriving straight from a [`FloorPlan`]
pub fn derive_plan(plan: &FloorPlan) -> Vec<PanelModule> {
    derive_modules(
        plan.devices(),
        plan.connections(),
        plan.mounts(),
        plan.is_powered(),
    )
}
