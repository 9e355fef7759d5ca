//! # Packet-Filter Rule Model
//!
//! Typed rules and their translation into argument vectors for the filter binary.
//! Both append and delete commands are built from the structured fields; a delete is
//! never derived by editing the text of an append.

pub mod raw;
pub mod rule;

use thiserror::Error;

pub use pnet::ipnetwork::IpNetwork;
pub use raw::RawRule;
pub use rule::{Action, Chain, FirewallRule, Protocol, RuleOperation, parse_network};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("unknown chain '{0}' (expected INPUT, OUTPUT or FORWARD)")]
    UnknownChain(String),

    #[error("unknown protocol '{0}' (expected TCP, UDP or ICMP)")]
    UnknownProtocol(String),

    #[error("unknown action '{0}' (expected ACCEPT, DROP or REJECT)")]
    UnknownAction(String),

    #[error("invalid address '{0}'")]
    InvalidAddress(String),

    #[error("rule is empty")]
    Empty,

    #[error("token '{0}' contains characters outside the allowed set")]
    ForbiddenCharacter(String),

    #[error("flag '{0}' is not allowed in a free-form rule")]
    ForbiddenFlag(String),

    #[error("option '{0}' is not accepted in a free-form rule")]
    UnsupportedOption(String),
}
