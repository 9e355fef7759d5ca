pub mod arp;
pub mod firewall;
pub mod probe;

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use netdiag_common::config::{Config, DEFAULT_FIREWALL_BINARY};
use netdiag_common::firewall::{Action, Chain, FirewallRule, IpNetwork, Protocol, parse_network};

#[derive(Parser)]
#[command(name = "netdiag")]
#[command(about = "Host-local network diagnostics: probes, ARP cache and packet filter.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Upper bound for each probe, in milliseconds
    #[arg(long, global = true, default_value_t = 5000)]
    pub timeout_ms: u64,

    /// Run the filter binary directly instead of through `sudo -n`
    #[arg(long, global = true)]
    pub no_sudo: bool,

    /// Name or path of the filter binary
    #[arg(long = "iptables", global = true, default_value = DEFAULT_FIREWALL_BINARY)]
    pub firewall_binary: String,

    /// Less output; repeat for bare values only
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// More log output; repeat for trace level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether a host answers an echo request
    #[command(alias = "p")]
    Ping { host: String },
    /// Attempt a TCP handshake with host:port
    #[command(alias = "c")]
    Port {
        host: String,
        #[arg(value_parser = clap::value_parser!(u16).range(1..))]
        port: u16,
    },
    /// Time a TCP handshake with host:port
    #[command(alias = "l")]
    Latency {
        host: String,
        #[arg(value_parser = clap::value_parser!(u16).range(1..))]
        port: u16,
    },
    /// Show the ARP cache
    #[command(alias = "a")]
    Arp,
    /// Inspect or change the packet filter
    #[command(alias = "fw", subcommand)]
    Firewall(FirewallCommand),
}

#[derive(Subcommand)]
pub enum FirewallCommand {
    /// Report whether the filter binary can be used here
    Status,
    /// List every chain with counters and numeric addresses
    List,
    /// Append a rule
    Add(RuleArgs),
    /// Delete a rule
    Delete(RuleArgs),
    /// Run the filter binary with free-form arguments, e.g. `-A INPUT -j ACCEPT`
    AddRaw {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Delete with free-form arguments following `-D`, e.g. `INPUT -j ACCEPT`
    DeleteRaw {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

#[derive(Args)]
pub struct RuleArgs {
    /// INPUT, OUTPUT or FORWARD
    #[arg(long)]
    pub chain: Chain,
    /// Source address or network
    #[arg(long, value_parser = parse_network)]
    pub source: Option<IpNetwork>,
    /// Destination address or network
    #[arg(long, value_parser = parse_network)]
    pub destination: Option<IpNetwork>,
    /// TCP, UDP or ICMP
    #[arg(long)]
    pub protocol: Option<Protocol>,
    #[arg(long = "sport")]
    pub source_port: Option<u16>,
    #[arg(long = "dport")]
    pub destination_port: Option<u16>,
    /// ACCEPT, DROP or REJECT
    #[arg(long)]
    pub action: Action,
}

impl RuleArgs {
    pub fn to_rule(&self) -> FirewallRule {
        let mut rule = FirewallRule::new(self.chain, self.action);
        rule.source = self.source;
        rule.destination = self.destination;
        rule.protocol = self.protocol;
        rule.source_port = self.source_port;
        rule.destination_port = self.destination_port;
        rule
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        Config {
            probe_timeout: Duration::from_millis(self.timeout_ms),
            use_sudo: !self.no_sudo,
            firewall_binary: self.firewall_binary.clone(),
            quiet: self.quiet,
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
