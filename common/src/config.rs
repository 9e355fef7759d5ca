use std::time::Duration;

/// Upper bound applied to every individual probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(5000);

pub const DEFAULT_FIREWALL_BINARY: &str = "iptables";

#[derive(Debug, Clone)]
pub struct Config {
    /// Bounds name resolution plus the probe itself.
    pub probe_timeout: Duration,
    /// Prefix firewall commands with `sudo -n`.
    ///
    /// Disable when already running as root.
    pub use_sudo: bool,
    /// Name or path of the packet-filter binary.
    pub firewall_binary: String,
    /// 0 prints everything, 1 hides headers, 2 prints bare values only.
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            use_sudo: true,
            firewall_binary: DEFAULT_FIREWALL_BINARY.to_string(),
            quiet: 0,
        }
    }
}
