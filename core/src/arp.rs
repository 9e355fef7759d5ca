//! # ARP Cache Reader
//!
//! Runs the platform `arp` utility and turns its output into [`ArpEntry`] values, in the
//! order the utility printed them. Nothing is cached between reads.

pub mod parser;

use std::io;
use std::sync::Arc;

use netdiag_common::network::arp::ArpEntry;
use netdiag_common::platform::{Platform, PlatformFamily};
use netdiag_common::system::{CommandOutput, CommandRunner};
use thiserror::Error;
use tracing::{debug, error};

use parser::{ArpLineParser, ParsedLine, SkipReason};

#[derive(Debug, Error)]
pub enum ArpError {
    #[error("reading the ARP cache is not supported on {0}")]
    UnsupportedPlatform(Platform),

    #[error("failed to run arp: {0}")]
    Launch(#[from] io::Error),

    #[error("arp exited with {exit_code:?}: {stderr}")]
    CommandFailed { exit_code: Option<i32>, stderr: String },
}

/// A line the parser could not turn into an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: String,
    pub reason: SkipReason,
}

/// Everything one read of the cache produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArpSnapshot {
    pub entries: Vec<ArpEntry>,
    pub skipped: Vec<SkippedLine>,
}

pub struct ArpCacheReader {
    platform: Platform,
    runner: Arc<dyn CommandRunner>,
}

impl ArpCacheReader {
    pub fn new(platform: Platform, runner: Arc<dyn CommandRunner>) -> Self {
        Self { platform, runner }
    }

    /// Reads the cache, reporting failures and unparseable lines explicitly.
    pub fn read_cache(&self) -> Result<ArpSnapshot, ArpError> {
        let family: PlatformFamily = self.platform.family();
        let (Some((program, args)), Some(parser)) = (arp_command(family), parser::parser_for(family)) else {
            return Err(ArpError::UnsupportedPlatform(self.platform.clone()));
        };

        let output: CommandOutput = self.runner.run(program, &args)?;
        if !output.success() {
            return Err(ArpError::CommandFailed {
                exit_code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            });
        }

        let snapshot = parse_lines(parser, output.stdout_lines());
        debug!(
            "parsed {} ARP entries, skipped {} lines",
            snapshot.entries.len(),
            snapshot.skipped.len()
        );
        Ok(snapshot)
    }

    /// Entries of the cache, or an empty list when it could not be read.
    ///
    /// The failure is logged; use [`read_cache`](Self::read_cache) to tell an empty cache
    /// from a failed read.
    pub fn get_arp_cache(&self) -> Vec<ArpEntry> {
        match self.read_cache() {
            Ok(snapshot) => snapshot.entries,
            Err(e) => {
                error!("Error retrieving ARP cache entries: {e}");
                Vec::new()
            }
        }
    }
}

fn arp_command(family: PlatformFamily) -> Option<(&'static str, Vec<String>)> {
    match family {
        PlatformFamily::Windows => Some(("arp", vec!["-a".to_string()])),
        PlatformFamily::Unix => Some(("arp", vec!["-e".to_string()])),
        PlatformFamily::Other => None,
    }
}

pub fn parse_lines(parser: &dyn ArpLineParser, lines: Vec<String>) -> ArpSnapshot {
    let mut snapshot = ArpSnapshot::default();
    for line in lines {
        match parser.parse_line(&line) {
            ParsedLine::Entry(entry) => snapshot.entries.push(entry),
            ParsedLine::Skipped(reason) => snapshot.skipped.push(SkippedLine { line, reason }),
        }
    }
    snapshot
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
