//! # Netdiag Common
//!
//! Domain models and seams shared by the diagnostic engine and its front-ends.
//!
//! * **[`platform`]**: the OS identity, resolved once and handed to every component.
//! * **[`system`]**: the contract for running external commands.
//! * **[`network`]**: ARP cache entries.
//! * **[`firewall`]**: the packet-filter rule model and its argv rendering.
//! * **[`probe`]**: outcomes of reachability, port and latency probes.

pub mod config;
pub mod firewall;
pub mod network;
pub mod platform;
pub mod probe;
pub mod system;
