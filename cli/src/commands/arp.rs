use std::sync::Arc;

use colored::*;
use netdiag_common::config::Config;
use netdiag_common::network::arp::ArpEntry;
use netdiag_common::platform::Platform;
use netdiag_common::system::CommandRunner;
use netdiag_core::arp::ArpCacheReader;
use tracing::debug;

use crate::terminal::{colors, print};

pub fn arp(platform: Platform, runner: Arc<dyn CommandRunner>, cfg: &Config) -> anyhow::Result<()> {
    let reader = ArpCacheReader::new(platform, runner);
    let snapshot = reader.read_cache()?;

    for skipped in &snapshot.skipped {
        debug!("skipped {:?}: {:?}", skipped.line, skipped.reason);
    }

    if cfg.quiet > 1 {
        for entry in &snapshot.entries {
            print::print(&entry.to_string());
        }
        return Ok(());
    }

    for (idx, entry) in snapshot.entries.iter().enumerate() {
        print::tree_head(idx + 1, &entry.ip_address);
        print::as_tree_one_level(entry_to_key_value_pair(entry));
    }

    print::aligned_line("Entries", snapshot.entries.len().to_string());
    if !snapshot.skipped.is_empty() {
        print::aligned_line("Skipped", snapshot.skipped.len().to_string().yellow());
    }
    Ok(())
}

fn entry_to_key_value_pair(entry: &ArpEntry) -> Vec<(String, ColoredString)> {
    let mac: String = entry
        .hardware_addr()
        .map(|mac| mac.to_string())
        .unwrap_or_else(|| entry.mac_address.clone());

    vec![
        (String::from("MAC"), mac.color(colors::MAC_ADDR)),
        (
            String::from("Interface"),
            entry.interface_name.as_str().color(colors::INTERFACE),
        ),
    ]
}
