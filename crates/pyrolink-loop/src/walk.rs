//! Dual-direction breadth-first walk of one loop.
//!
//! Mirrors how a loop driver electrically scans its bus at power-up:
//! every device transitively reachable over the wiring is enumerated
//! exactly once, in a deterministic order, tagged with the branch it
//! was first reached on. That visitation order is the contract all
//! downstream address assignment depends on.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

use pyrolink_core::{Device, DeviceId, DeviceKind, Direction};

use crate::graph::WiringGraph;

/// One discovered node with the branch it was first reached on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub device_id: DeviceId,
    pub direction: Direction,
}

/// Enumerate every device reachable from `driver` over the wiring.
///
/// Rules, in the order the scan applies them:
/// - a visited-before-enqueue set guarantees each device appears once,
///   which also makes cycles back to the driver harmless;
/// - the driver's first explored non-panel branch is tagged [`Direction::Out`],
///   every later branch [`Direction::In`]; descendants inherit their
///   branch tag at the moment they are first reached;
/// - the panel is emitted but never expanded;
/// - a foreign loop driver is emitted (it is electrically adjacent, which
///   matters for its own status) but the scan never crosses it; loop
///   drivers never bridge two loops.
pub fn walk_loop(graph: &WiringGraph, devices: &[Device], driver: &DeviceId) -> Vec<Visit> {
    let kinds: HashMap<&str, DeviceKind> =
        devices.iter().map(|d| (d.id.as_str(), d.kind)).collect();

    let mut visits = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<(DeviceId, Direction)> = VecDeque::new();
    visited.insert(driver.as_str().to_string());

    // Seed one queue entry per independent branch off the driver. The
    // panel wire is not a loop branch and does not consume a direction.
    let mut branch = 0usize;
    for neighbor in graph.neighbors(driver) {
        if visited.contains(neighbor.as_str()) {
            continue;
        }
        let direction = match kinds.get(neighbor.as_str()) {
            Some(DeviceKind::Panel) => Direction::Out,
            _ => {
                let d = if branch == 0 { Direction::Out } else { Direction::In };
                branch += 1;
                d
            }
        };
        visited.insert(neighbor.as_str().to_string());
        queue.push_back((neighbor.clone(), direction));
    }

    while let Some((id, direction)) = queue.pop_front() {
        let kind = kinds.get(id.as_str()).copied();
        visits.push(Visit {
            device_id: id.clone(),
            direction,
        });

        // Structural nodes terminate the scan on their branch.
        match kind {
            Some(DeviceKind::Panel) => continue,
            Some(DeviceKind::LoopDriver) => {
                debug!(device = %id, "Foreign loop driver reached, not crossing");
                continue;
            }
            _ => {}
        }

        for neighbor in graph.neighbors(&id) {
            if visited.contains(neighbor.as_str()) {
                continue;
            }
            visited.insert(neighbor.as_str().to_string());
            queue.push_back((neighbor.clone(), direction));
        }
    }

    visits
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyrolink_core::{Connection, SerialNumber, TerminalId};

    fn device(id: &str, kind: DeviceKind) -> Device {
        Device::new(
            DeviceId::from_str_id(id),
            kind,
            SerialNumber::new(1).unwrap(),
        )
    }

    fn wire(a: &str, b: &str) -> Connection {
        Connection::new(
            DeviceId::from_str_id(a),
            TerminalId::new("loop"),
            DeviceId::from_str_id(b),
            TerminalId::new("loop"),
        )
    }

    fn id(s: &str) -> DeviceId {
        DeviceId::from_str_id(s)
    }

    fn ids(visits: &[Visit]) -> Vec<&str> {
        visits.iter().map(|v| v.device_id.as_str()).collect()
    }

    #[test]
    fn chain_is_visited_in_wiring_order() {
        let devices = vec![
            device("ld", DeviceKind::LoopDriver),
            device("d1", DeviceKind::Mcp),
            device("d2", DeviceKind::Sounder),
            device("d3", DeviceKind::Mcp),
        ];
        let wires = vec![wire("ld", "d1"), wire("d1", "d2"), wire("d2", "d3")];
        let graph = WiringGraph::build(&devices, &wires);

        let visits = walk_loop(&graph, &devices, &id("ld"));
        assert_eq!(ids(&visits), vec!["d1", "d2", "d3"]);
        assert!(visits.iter().all(|v| v.direction == Direction::Out));
    }

    #[test]
    fn cycle_back_to_driver_visits_each_device_once() {
        let devices = vec![
            device("ld", DeviceKind::LoopDriver),
            device("d1", DeviceKind::Mcp),
            device("d2", DeviceKind::Mcp),
            device("d3", DeviceKind::Mcp),
        ];
        // ld -> d1 -> d2 -> d3 -> ld, a closed loop
        let wires = vec![
            wire("ld", "d1"),
            wire("d1", "d2"),
            wire("d2", "d3"),
            wire("d3", "ld"),
        ];
        let graph = WiringGraph::build(&devices, &wires);

        let visits = walk_loop(&graph, &devices, &id("ld"));
        assert_eq!(visits.len(), 3);
        let mut seen = ids(&visits);
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn second_branch_is_tagged_in() {
        let devices = vec![
            device("ld", DeviceKind::LoopDriver),
            device("a", DeviceKind::Mcp),
            device("b", DeviceKind::Sounder),
        ];
        let wires = vec![wire("ld", "a"), wire("ld", "b")];
        let graph = WiringGraph::build(&devices, &wires);

        let visits = walk_loop(&graph, &devices, &id("ld"));
        assert_eq!(visits[0].direction, Direction::Out);
        assert_eq!(visits[1].direction, Direction::In);
    }

    #[test]
    fn descendants_inherit_their_branch_tag() {
        let devices = vec![
            device("ld", DeviceKind::LoopDriver),
            device("a", DeviceKind::Mcp),
            device("a2", DeviceKind::Mcp),
            device("b", DeviceKind::Sounder),
            device("b2", DeviceKind::Sounder),
        ];
        let wires = vec![
            wire("ld", "a"),
            wire("ld", "b"),
            wire("a", "a2"),
            wire("b", "b2"),
        ];
        let graph = WiringGraph::build(&devices, &wires);

        let visits = walk_loop(&graph, &devices, &id("ld"));
        let dir_of = |dev: &str| {
            visits
                .iter()
                .find(|v| v.device_id.as_str() == dev)
                .map(|v| v.direction)
        };
        assert_eq!(dir_of("a2"), Some(Direction::Out));
        assert_eq!(dir_of("b2"), Some(Direction::In));
    }

    #[test]
    fn panel_wire_does_not_consume_a_branch_direction() {
        let devices = vec![
            device("panel", DeviceKind::Panel),
            device("ld", DeviceKind::LoopDriver),
            device("d1", DeviceKind::Mcp),
        ];
        // Panel wire first, then the field branch: the field branch must
        // still come up as "out".
        let wires = vec![wire("ld", "panel"), wire("ld", "d1")];
        let graph = WiringGraph::build(&devices, &wires);

        let visits = walk_loop(&graph, &devices, &id("ld"));
        let d1 = visits
            .iter()
            .find(|v| v.device_id.as_str() == "d1")
            .unwrap();
        assert_eq!(d1.direction, Direction::Out);
    }

    #[test]
    fn panel_is_never_expanded() {
        let devices = vec![
            device("panel", DeviceKind::Panel),
            device("ld", DeviceKind::LoopDriver),
            device("ld2", DeviceKind::LoopDriver),
            device("far", DeviceKind::Mcp),
        ];
        // The other loop hangs off the panel; scanning ld must not see it.
        let wires = vec![wire("ld", "panel"), wire("panel", "ld2"), wire("ld2", "far")];
        let graph = WiringGraph::build(&devices, &wires);

        let visits = walk_loop(&graph, &devices, &id("ld"));
        assert_eq!(ids(&visits), vec!["panel"]);
    }

    #[test]
    fn foreign_loop_driver_is_recorded_but_not_crossed() {
        let devices = vec![
            device("ld", DeviceKind::LoopDriver),
            device("d1", DeviceKind::Mcp),
            device("ld2", DeviceKind::LoopDriver),
            device("other", DeviceKind::Sounder),
        ];
        let wires = vec![wire("ld", "d1"), wire("d1", "ld2"), wire("ld2", "other")];
        let graph = WiringGraph::build(&devices, &wires);

        let visits = walk_loop(&graph, &devices, &id("ld"));
        assert_eq!(ids(&visits), vec!["d1", "ld2"]);
    }
}
