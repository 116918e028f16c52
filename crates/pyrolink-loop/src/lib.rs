//! Pyrolink Loop - Topology discovery and addressing engine
//!
//! This crate simulates how a fire-alarm loop driver scans its two-wire
//! bus: it builds a wiring graph from the flat connection list, walks
//! every reachable device breadth-first with a discovery-direction tag,
//! resolves composite socket+head detectors, assigns sequential
//! communication addresses, and derives the panel module list the
//! simulator views display.
//!
//! The whole pipeline is a pure, synchronous function of
//! (devices, connections, mounts, power flag); see [`derive_modules`].

pub mod address;
pub mod classify;
pub mod derive;
pub mod graph;
pub mod walk;

pub use address::assign_addresses;
pub use classify::{classify, ClassifiedDevice};
pub use derive::{derive_modules, derive_plan};
pub use graph::WiringGraph;
pub use walk::{walk_loop, Visit};
