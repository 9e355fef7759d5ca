//! # Probe Outcomes
//!
//! Unreachable hosts and closed ports are not errors. Every probe produces a
//! well-formed negative value instead.

use std::fmt;
use std::time::{Duration, SystemTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeKind {
    Reachability,
    PortCheck,
    Latency,
}

/// Result of a connection-oriented handshake attempt.
///
/// Refused, filtered and timed-out ports all collapse into [`PortStatus::Closed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortStatus {
    /// Handshake completed; carries the peer port of the established connection.
    Open(u16),
    Closed,
}

impl PortStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, PortStatus::Open(_))
    }
}

/// Wall-clock time around a handshake, connect cost included. Not an ICMP round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Latency {
    Measured(Duration),
    Unreachable,
}

impl Latency {
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Latency::Measured(elapsed) => Some(*elapsed),
            Latency::Unreachable => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeOutcome {
    Reachable(bool),
    Port(PortStatus),
    Latency(Latency),
}

/// One diagnostic operation, created per request and returned immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub host: String,
    pub port: Option<u16>,
    pub outcome: ProbeOutcome,
    pub timestamp: SystemTime,
}

impl ProbeResult {
    pub fn new(host: impl Into<String>, port: Option<u16>, outcome: ProbeOutcome) -> Self {
        Self {
            host: host.into(),
            port,
            outcome,
            timestamp: SystemTime::now(),
        }
    }

    pub fn kind(&self) -> ProbeKind {
        match self.outcome {
            ProbeOutcome::Reachable(_) => ProbeKind::Reachability,
            ProbeOutcome::Port(_) => ProbeKind::PortCheck,
            ProbeOutcome::Latency(_) => ProbeKind::Latency,
        }
    }

    /// Whether the probe found what it was looking for.
    pub fn is_positive(&self) -> bool {
        match self.outcome {
            ProbeOutcome::Reachable(alive) => alive,
            ProbeOutcome::Port(status) => status.is_open(),
            ProbeOutcome::Latency(latency) => latency.as_duration().is_some(),
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Reachable(true) => write!(f, "reachable"),
            ProbeOutcome::Reachable(false) => write!(f, "unreachable"),
            ProbeOutcome::Port(PortStatus::Open(port)) => write!(f, "open ({port})"),
            ProbeOutcome::Port(PortStatus::Closed) => write!(f, "closed"),
            ProbeOutcome::Latency(Latency::Measured(elapsed)) => {
                write!(f, "{} ms", elapsed.as_millis())
            }
            ProbeOutcome::Latency(Latency::Unreachable) => write!(f, "unreachable"),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
