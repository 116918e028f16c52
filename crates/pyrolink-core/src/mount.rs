//! Authoritative socket↔head mount relation.
//!
//! A detector head mounted on a socket turns the pair into one logical
//! detector. The relation is stored once, as a bijective map with an
//! index in each direction, so the two sides can never disagree.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::device::DeviceId;

/// Bijective socket↔head pairing with O(1) lookup either way
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MountMap {
    socket_to_head: HashMap<String, DeviceId>,
    head_to_socket: HashMap<String, DeviceId>,
}

impl MountMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair a head with a socket. Any pairing either party already has
    /// is displaced first, keeping the relation one-to-one.
    pub fn mount(&mut self, socket: &DeviceId, head: &DeviceId) {
        self.unmount_socket(socket);
        self.unmount_head(head);
        self.socket_to_head.insert(socket.0.clone(), head.clone());
        self.head_to_socket.insert(head.0.clone(), socket.clone());
    }

    /// Remove the pairing on a socket, if any. Returns the displaced head.
    pub fn unmount_socket(&mut self, socket: &DeviceId) -> Option<DeviceId> {
        let head = self.socket_to_head.remove(&socket.0)?;
        self.head_to_socket.remove(&head.0);
        Some(head)
    }

    /// Remove the pairing on a head, if any. Returns the vacated socket.
    pub fn unmount_head(&mut self, head: &DeviceId) -> Option<DeviceId> {
        let socket = self.head_to_socket.remove(&head.0)?;
        self.socket_to_head.remove(&socket.0);
        Some(socket)
    }

    /// Drop any pairing a device participates in, either role.
    /// Used when a device is deleted from the plan.
    pub fn remove_device(&mut self, id: &DeviceId) {
        self.unmount_socket(id);
        self.unmount_head(id);
    }

    /// Head mounted on the given socket
    pub fn head_of(&self, socket: &DeviceId) -> Option<&DeviceId> {
        self.socket_to_head.get(&socket.0)
    }

    /// Socket the given head sits on
    pub fn socket_of(&self, head: &DeviceId) -> Option<&DeviceId> {
        self.head_to_socket.get(&head.0)
    }

    /// Whether the head is mounted anywhere
    pub fn is_mounted(&self, head: &DeviceId) -> bool {
        self.head_to_socket.contains_key(&head.0)
    }

    pub fn len(&self) -> usize {
        self.socket_to_head.len()
    }

    pub fn is_empty(&self) -> bool {
        self.socket_to_head.is_empty()
    }
}
