//! # Host Validation
//!
//! A host is either a dotted-quad IPv4 literal or a name the platform resolver knows.
//! Literals are decided locally; everything else costs one resolver round trip.
//!
//! The octet grammar tolerates leading zeros (`010.1.1.1` is accepted), which is a
//! known looseness.

use std::io;
use std::net::{IpAddr, ToSocketAddrs};
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

const OCTET: &str = r"(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)";

static IPV4_STRICT: OnceLock<Regex> = OnceLock::new();
static IPV4_SHAPE: OnceLock<Regex> = OnceLock::new();

fn ipv4_strict() -> &'static Regex {
    IPV4_STRICT.get_or_init(|| {
        let pattern = format!(r"^{OCTET}\.{OCTET}\.{OCTET}\.{OCTET}$");
        Regex::new(&pattern).expect("IPv4 grammar is a valid regex")
    })
}

// Four dot-separated digit runs, whatever their value.
fn ipv4_shape() -> &'static Regex {
    IPV4_SHAPE.get_or_init(|| {
        Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+\.[0-9]+$").expect("IPv4 shape is a valid regex")
    })
}

/// Name resolution as provided by the platform.
pub trait Resolver: Send + Sync {
    fn resolve(&self, host: &str) -> io::Result<Vec<IpAddr>>;
}

/// Resolves through the OS resolver (`getaddrinfo` and friends).
pub struct SystemResolver;

impl Resolver for SystemResolver {
    fn resolve(&self, host: &str) -> io::Result<Vec<IpAddr>> {
        let addrs = (host, 0).to_socket_addrs()?;
        Ok(addrs.map(|addr| addr.ip()).collect())
    }
}

pub struct HostValidator {
    resolver: Box<dyn Resolver>,
}

impl Default for HostValidator {
    fn default() -> Self {
        Self::new(Box::new(SystemResolver))
    }
}

impl HostValidator {
    pub fn new(resolver: Box<dyn Resolver>) -> Self {
        Self { resolver }
    }

    /// Returns `true` for IPv4 literals and for names that resolve.
    ///
    /// Empty input is rejected. Dotted quads with an octet above 255 are rejected
    /// without asking the resolver. A single resolution attempt is authoritative.
    pub fn is_valid_host(&self, host: &str) -> bool {
        if host.is_empty() {
            return false;
        }

        if is_ipv4_literal(host) {
            return true;
        }

        if ipv4_shape().is_match(host) {
            debug!("{host} looks like an IPv4 address but is out of range");
            return false;
        }

        match self.resolver.resolve(host) {
            Ok(addrs) => !addrs.is_empty(),
            Err(e) => {
                debug!("could not resolve {host}: {e}");
                false
            }
        }
    }
}

pub fn is_ipv4_literal(host: &str) -> bool {
    ipv4_strict().is_match(host)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
