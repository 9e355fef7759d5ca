//! # Platform Identity
//!
//! Components never inspect the OS name themselves. A [`Platform`] is resolved once at
//! startup and passed into every constructor, which keeps platform dispatch exhaustive
//! and lets tests pretend to be any OS.

use std::fmt;

/// The operating system the engine runs on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Platform {
    Linux,
    MacOs,
    /// FreeBSD, OpenBSD, NetBSD and DragonFly.
    Bsd,
    Windows,
    Other(String),
}

/// Coarse grouping used to pick command variants and output parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformFamily {
    Windows,
    Unix,
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn detect() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Classifies an OS name as reported by `std::env::consts::OS`.
    pub fn from_os_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "linux" | "android" => Platform::Linux,
            "macos" => Platform::MacOs,
            "freebsd" | "openbsd" | "netbsd" | "dragonfly" => Platform::Bsd,
            "windows" => Platform::Windows,
            other => Platform::Other(other.to_string()),
        }
    }

    pub fn family(&self) -> PlatformFamily {
        match self {
            Platform::Linux | Platform::MacOs | Platform::Bsd => PlatformFamily::Unix,
            Platform::Windows => PlatformFamily::Windows,
            Platform::Other(_) => PlatformFamily::Other,
        }
    }

    pub fn is_linux(&self) -> bool {
        matches!(self, Platform::Linux)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Linux => write!(f, "linux"),
            Platform::MacOs => write!(f, "macos"),
            Platform::Bsd => write!(f, "bsd"),
            Platform::Windows => write!(f, "windows"),
            Platform::Other(name) => write!(f, "{name}"),
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
