use std::fmt;
use std::str::FromStr;

use pnet::util::MacAddr;

/// One row of the OS neighbour cache.
///
/// Fields are kept as the text the platform printed. Entries are built fresh on every
/// cache read and never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArpEntry {
    pub ip_address: String,
    pub mac_address: String,
    pub interface_name: String,
}

impl ArpEntry {
    pub fn new(
        ip_address: impl Into<String>,
        mac_address: impl Into<String>,
        interface_name: impl Into<String>,
    ) -> Self {
        Self {
            ip_address: ip_address.into(),
            mac_address: mac_address.into(),
            interface_name: interface_name.into(),
        }
    }

    /// Parses the hardware address, accepting both `aa:bb:..` and Windows' `aa-bb-..`.
    pub fn hardware_addr(&self) -> Option<MacAddr> {
        MacAddr::from_str(&self.mac_address.replace('-', ":")).ok()
    }
}

impl fmt::Display for ArpEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {} on {}", self.ip_address, self.mac_address, self.interface_name)
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
