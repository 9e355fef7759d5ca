//! # Netdiag Core
//!
//! The diagnostic engine. Each component receives the [`Platform`] it runs on and a
//! [`CommandRunner`] at construction time and keeps no state between calls.
//!
//! * **[`validator`]**: decides whether a string names a usable host.
//! * **[`prober`]**: reachability, port and latency probes, each bounded by a timeout.
//! * **[`arp`]**: reads and parses the OS neighbour cache.
//! * **[`firewall`]**: inspects and mutates the packet-filter ruleset.
//! * **[`runner`]**: the real [`CommandRunner`] backed by `std::process`.
//!
//! [`Platform`]: netdiag_common::platform::Platform
//! [`CommandRunner`]: netdiag_common::system::CommandRunner

pub mod arp;
pub mod firewall;
pub mod prober;
pub mod runner;
pub mod validator;

#[cfg(test)]
pub(crate) mod testing;
