//! Effective-type resolution for discovered nodes.
//!
//! Turns raw walk output into the list of addressable field devices:
//! structural nodes are dropped and socket+head pairs are merged into
//! one logical detector.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

use pyrolink_core::{Device, DeviceKind, Direction, MountMap, SerialNumber};

use crate::walk::Visit;

/// A field device with its effective type resolved, pre-addressing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedDevice {
    pub device: Device,
    /// Effective type after composite resolution
    pub kind: DeviceKind,
    /// Display label after composite resolution
    pub label: String,
    /// Serial of the mounted head, composites only
    pub head_sn: Option<SerialNumber>,
    pub discovered_from: Direction,
}

/// Resolve the effective type of every visited node, in visit order.
///
/// - panels and loop drivers are structural and dropped;
/// - an AG socket with a mounted head becomes a composite `AgDetector`:
///   the serial stays the socket's, the head's serial rides along, and
///   the label prefers the head's non-empty label over the socket's;
/// - a mount whose head no longer resolves degrades to a plain socket
///   with the head unknown;
/// - an unmounted AG head is a standalone field device;
/// - everything else passes through unchanged.
pub fn classify(visits: &[Visit], devices: &[Device], mounts: &MountMap) -> Vec<ClassifiedDevice> {
    let by_id: HashMap<&str, &Device> = devices.iter().map(|d| (d.id.as_str(), d)).collect();

    let mut classified = Vec::new();
    for visit in visits {
        let Some(device) = by_id.get(visit.device_id.as_str()) else {
            continue;
        };
        if device.kind.is_structural() {
            continue;
        }
        // A mounted head is reported inside its socket's composite entry,
        // even when it is also wired onto the loop in its own right. Only
        // unmounted heads stand alone.
        if device.kind == DeviceKind::AgHead && mounts.socket_of(&device.id).is_some() {
            continue;
        }

        let mut kind = device.kind;
        let mut label = device.label.clone();
        let mut head_sn = None;

        if device.kind == DeviceKind::AgSocket {
            if let Some(head_id) = mounts.head_of(&device.id) {
                match by_id.get(head_id.as_str()) {
                    Some(head) => {
                        kind = DeviceKind::AgDetector;
                        head_sn = Some(head.sn);
                        if !head.label.is_empty() {
                            label = head.label.clone();
                        }
                    }
                    None => {
                        warn!(
                            socket = %device.id,
                            head = %head_id,
                            "Mounted head does not resolve, reporting plain socket"
                        );
                    }
                }
            }
        }

        classified.push(ClassifiedDevice {
            device: (*device).clone(),
            kind,
            label,
            head_sn,
            discovered_from: visit.direction,
        });
    }

    classified
}
