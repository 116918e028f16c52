//! Wire connections between device terminals

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::device::DeviceId;

/// Unique identifier for a wire
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub String);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal on a device the wire lands on (e.g. "L1+", "loop-out")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TerminalId(pub String);

impl TerminalId {
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// An undirected physical wire between two device terminals.
///
/// Endpoint order carries no meaning for traversal; duplicate wires
/// between the same device pair collapse to one edge when the wiring
/// graph is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub from_device: DeviceId,
    pub from_terminal: TerminalId,
    pub to_device: DeviceId,
    pub to_terminal: TerminalId,
}

impl Connection {
    /// Create a wire between two device terminals
    pub fn new(
        from_device: DeviceId,
        from_terminal: TerminalId,
        to_device: DeviceId,
        to_terminal: TerminalId,
    ) -> Self {
        Self {
            id: ConnectionId::new(),
            from_device,
            from_terminal,
            to_device,
            to_terminal,
        }
    }

    /// Both endpoint device ids
    pub fn endpoints(&self) -> (&DeviceId, &DeviceId) {
        (&self.from_device, &self.to_device)
    }

    /// Whether this wire runs between the two given devices, either way round
    pub fn joins(&self, a: &DeviceId, b: &DeviceId) -> bool {
        (&self.from_device == a && &self.to_device == b)
            || (&self.from_device == b && &self.to_device == a)
    }

    /// The far end of the wire as seen from `device`, if it touches it
    pub fn other_end(&self, device: &DeviceId) -> Option<&DeviceId> {
        if &self.from_device == device {
            Some(&self.to_device)
        } else if &self.to_device == device {
            Some(&self.from_device)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(a: &DeviceId, b: &DeviceId) -> Connection {
        Connection::new(
            a.clone(),
            TerminalId::new("loop-out"),
            b.clone(),
            TerminalId::new("loop-in"),
        )
    }

    #[test]
    fn joins_is_symmetric() {
        let a = DeviceId::from_str_id("a");
        let b = DeviceId::from_str_id("b");
        let c = DeviceId::from_str_id("c");
        let w = wire(&a, &b);
        assert!(w.joins(&a, &b));
        assert!(w.joins(&b, &a));
        assert!(!w.joins(&a, &c));
    }

    #[test]
    fn other_end_resolves_both_directions() {
        let a = DeviceId::from_str_id("a");
        let b = DeviceId::from_str_id("b");
        let c = DeviceId::from_str_id("c");
        let w = wire(&a, &b);
        assert_eq!(w.other_end(&a), Some(&b));
        assert_eq!(w.other_end(&b), Some(&a));
        assert_eq!(w.other_end(&c), None);
    }
}
