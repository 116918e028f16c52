//! Wiring graph built from the flat connection list

use std::collections::{HashMap, HashSet};
use tracing::debug;

use pyrolink_core::{Connection, Device, DeviceId};

/// Undirected adjacency over placed devices.
///
/// Neighbor lists preserve connection-list order, which makes every
/// traversal over the graph deterministic for a fixed plan.
#[derive(Debug, Clone, Default)]
pub struct WiringGraph {
    adjacency: HashMap<String, Vec<DeviceId>>,
}

impl WiringGraph {
    /// Build the adjacency map from devices and wires.
    ///
    /// Wires referencing a device that is no longer placed are dropped,
    /// and duplicate wires between the same pair collapse to one edge.
    pub fn build(devices: &[Device], connections: &[Connection]) -> Self {
        let placed: HashSet<&str> = devices.iter().map(|d| d.id.as_str()).collect();
        let mut graph = Self::default();

        for wire in connections {
            let (from, to) = wire.endpoints();
            if !placed.contains(from.as_str()) || !placed.contains(to.as_str()) {
                debug!(wire = %wire.id.as_str(), "Dropping dangling wire");
                continue;
            }
            let first = graph.link(from, to);
            graph.link(to, from);
            if !first {
                debug!(wire = %wire.id.as_str(), "Collapsing duplicate wire");
            }
        }

        graph
    }

    /// Add a directed half-edge, deduplicating. Returns false if it existed.
    fn link(&mut self, from: &DeviceId, to: &DeviceId) -> bool {
        let neighbors = self.adjacency.entry(from.0.clone()).or_default();
        if neighbors.contains(to) {
            return false;
        }
        neighbors.push(to.clone());
        true
    }

    /// Neighbors of a device in wiring order; empty for unknown ids
    pub fn neighbors(&self, id: &DeviceId) -> &[DeviceId] {
        self.adjacency
            .get(&id.0)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether two devices share a direct wire
    pub fn adjacent(&self, a: &DeviceId, b: &DeviceId) -> bool {
        self.neighbors(a).contains(b)
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}
