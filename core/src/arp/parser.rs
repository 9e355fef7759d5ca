//! Best-effort parsers for `arp` output.
//!
//! The text is neither machine-readable nor stable across OS versions, so each line is
//! tokenized on whitespace and mapped by column. Lines that do not fit are reported as
//! skipped instead of being silently lost.

use std::net::IpAddr;

use netdiag_common::network::arp::ArpEntry;
use netdiag_common::platform::PlatformFamily;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    TooFewTokens { found: usize, required: usize },
    /// First column is not an address, e.g. a column header or section banner.
    NotAnAddress(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Entry(ArpEntry),
    Skipped(SkipReason),
}

/// Column layout of one platform's `arp` output.
pub trait ArpLineParser: Send + Sync {
    fn min_tokens(&self) -> usize;

    /// Builds an entry from a tokenized line already known to be long enough.
    fn to_entry(&self, tokens: &[&str]) -> ArpEntry;

    fn parse_line(&self, line: &str) -> ParsedLine {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < self.min_tokens() {
            return ParsedLine::Skipped(SkipReason::TooFewTokens {
                found: tokens.len(),
                required: self.min_tokens(),
            });
        }
        if tokens[0].parse::<IpAddr>().is_err() {
            return ParsedLine::Skipped(SkipReason::NotAnAddress(tokens[0].to_string()));
        }
        ParsedLine::Entry(self.to_entry(&tokens))
    }
}

/// `arp -a`: `Internet Address  Physical Address  Type`.
pub struct WindowsArpParser;

impl ArpLineParser for WindowsArpParser {
    fn min_tokens(&self) -> usize {
        3
    }

    fn to_entry(&self, tokens: &[&str]) -> ArpEntry {
        ArpEntry::new(tokens[0], tokens[1], tokens[2])
    }
}

/// `arp -e`: `Address  HWtype  HWaddress  Flags Mask  Iface`.
///
/// The hardware type column sits between address and MAC, so address and MAC come
/// from columns 0 and 2. The interface is the last column: column 3 on a bare
/// four-column line, further right when Flags and Mask are printed.
pub struct UnixArpParser;

impl ArpLineParser for UnixArpParser {
    fn min_tokens(&self) -> usize {
        4
    }

    fn to_entry(&self, tokens: &[&str]) -> ArpEntry {
        ArpEntry::new(tokens[0], tokens[2], tokens[tokens.len() - 1])
    }
}

pub fn parser_for(family: PlatformFamily) -> Option<&'static dyn ArpLineParser> {
    match family {
        PlatformFamily::Windows => Some(&WindowsArpParser),
        PlatformFamily::Unix => Some(&UnixArpParser),
        PlatformFamily::Other => None,
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
