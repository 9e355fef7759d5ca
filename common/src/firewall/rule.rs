use std::fmt;
use std::str::FromStr;

use pnet::ipnetwork::IpNetwork;

use super::RuleError;

/// Hook point in the filter table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chain {
    Input,
    Output,
    Forward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Tcp,
    Udp,
    Icmp,
}

/// Jump target applied to matching packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Accept,
    Drop,
    Reject,
}

/// Leading operation of a rendered command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleOperation {
    Append,
    Delete,
}

impl Chain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Input => "INPUT",
            Chain::Output => "OUTPUT",
            Chain::Forward => "FORWARD",
        }
    }
}

impl Protocol {
    /// Lower-case name as the filter binary expects it after `-p`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
            Protocol::Icmp => "icmp",
        }
    }
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Accept => "ACCEPT",
            Action::Drop => "DROP",
            Action::Reject => "REJECT",
        }
    }
}

impl RuleOperation {
    pub fn flag(&self) -> &'static str {
        match self {
            RuleOperation::Append => "-A",
            RuleOperation::Delete => "-D",
        }
    }
}

impl FromStr for Chain {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INPUT" => Ok(Chain::Input),
            "OUTPUT" => Ok(Chain::Output),
            "FORWARD" => Ok(Chain::Forward),
            _ => Err(RuleError::UnknownChain(s.to_string())),
        }
    }
}

impl FromStr for Protocol {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tcp" => Ok(Protocol::Tcp),
            "udp" => Ok(Protocol::Udp),
            "icmp" => Ok(Protocol::Icmp),
            _ => Err(RuleError::UnknownProtocol(s.to_string())),
        }
    }
}

impl FromStr for Action {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACCEPT" => Ok(Action::Accept),
            "DROP" => Ok(Action::Drop),
            "REJECT" => Ok(Action::Reject),
            _ => Err(RuleError::UnknownAction(s.to_string())),
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single filter rule.
///
/// `chain` and `action` are mandatory. Every optional field that is `None` is left out
/// of the rendered command, which makes it match anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FirewallRule {
    pub chain: Chain,
    pub source: Option<IpNetwork>,
    pub destination: Option<IpNetwork>,
    pub protocol: Option<Protocol>,
    pub source_port: Option<u16>,
    pub destination_port: Option<u16>,
    pub action: Action,
}

impl FirewallRule {
    pub fn new(chain: Chain, action: Action) -> Self {
        Self {
            chain,
            source: None,
            destination: None,
            protocol: None,
            source_port: None,
            destination_port: None,
            action,
        }
    }

    pub fn with_source(mut self, source: IpNetwork) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_destination(mut self, destination: IpNetwork) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = Some(protocol);
        self
    }

    pub fn with_source_port(mut self, port: u16) -> Self {
        self.source_port = Some(port);
        self
    }

    pub fn with_destination_port(mut self, port: u16) -> Self {
        self.destination_port = Some(port);
        self
    }

    /// Builds the argument vector that follows the filter binary.
    ///
    /// Field order is fixed: chain, source, destination, protocol, sport, dport, action.
    pub fn to_args(&self, operation: RuleOperation) -> Vec<String> {
        let mut args: Vec<String> = vec![operation.flag().to_string(), self.chain.to_string()];

        if let Some(source) = &self.source {
            args.push("-s".to_string());
            args.push(network_to_arg(source));
        }
        if let Some(destination) = &self.destination {
            args.push("-d".to_string());
            args.push(network_to_arg(destination));
        }
        if let Some(protocol) = self.protocol {
            args.push("-p".to_string());
            args.push(protocol.to_string());
        }
        if let Some(port) = self.source_port {
            args.push("--sport".to_string());
            args.push(port.to_string());
        }
        if let Some(port) = self.destination_port {
            args.push("--dport".to_string());
            args.push(port.to_string());
        }

        args.push("-j".to_string());
        args.push(self.action.to_string());
        args
    }

    pub fn render(&self, operation: RuleOperation) -> String {
        self.to_args(operation).join(" ")
    }
}

impl fmt::Display for FirewallRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(RuleOperation::Append))
    }
}

/// Parses `10.0.0.1` or `10.0.0.0/8` into a network.
pub fn parse_network(s: &str) -> Result<IpNetwork, RuleError> {
    s.parse::<IpNetwork>()
        .map_err(|_| RuleError::InvalidAddress(s.to_string()))
}

// Host networks are printed without their prefix.
fn network_to_arg(network: &IpNetwork) -> String {
    let host_prefix: u8 = match network {
        IpNetwork::V4(_) => 32,
        IpNetwork::V6(_) => 128,
    };
    if network.prefix() == host_prefix {
        network.ip().to_string()
    } else {
        format!("{}/{}", network.ip(), network.prefix())
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
