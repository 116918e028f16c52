//! Sequential communication-address assignment.
//!
//! A real addressable loop self-numbers its devices during power-up: the
//! driver hands out 1, 2, 3, … in the order it reaches them. We mirror
//! that by numbering the classified list in discovery order.

use tracing::warn;

use pyrolink_core::ConnectedDeviceInfo;

use crate::classify::ClassifiedDevice;

/// Assign 1-based addresses in discovery order and build the read model.
///
/// The result is sorted by ascending address before returning, so the
/// contract holds even if a caller reorders its input.
pub fn assign_addresses(classified: Vec<ClassifiedDevice>) -> Vec<ConnectedDeviceInfo> {
    let mut addressed: Vec<ConnectedDeviceInfo> = classified
        .into_iter()
        .enumerate()
        .map(|(i, node)| {
            // Loop protocols cap the address space at one octet; anything
            // past that clamps to 255, loudly.
            let c_address = u8::try_from(i + 1).unwrap_or_else(|_| {
                warn!(
                    device = %node.device.id,
                    position = i + 1,
                    "Loop address space exhausted, clamping to 255"
                );
                u8::MAX
            });
            ConnectedDeviceInfo {
                instance_id: node.device.id,
                label: node.label,
                kind: node.kind,
                sn: node.device.sn,
                head_sn: node.head_sn,
                c_address,
                discovered_from: node.discovered_from,
            }
        })
        .collect();

    addressed.sort_by_key(|d| d.c_address);
    addressed
}
