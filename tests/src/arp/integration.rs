#![cfg(test)]
use std::io;
use std::sync::Arc;

use crate::utils::{RecordingRunner, exit};
use netdiag_common::network::arp::ArpEntry;
use netdiag_common::platform::Platform;
use netdiag_core::arp::{ArpCacheReader, ArpError};

const NET_TOOLS_ARP: &str = "\
Address                  HWtype  HWaddress           Flags Mask            Iface
10.0.0.1                 ether   00:1a:2b:3c:4d:5e   C                     enp9s0
10.0.0.7                 ether   a4:5e:60:01:02:03   CM                    br0
";

const WINDOWS_ARP: &str = "
Interface: 10.0.0.5 --- 0x4
  Internet Address      Physical Address      Type
  10.0.0.1              00-1a-2b-3c-4d-5e     dynamic
";

#[test]
fn linux_cache_is_read_in_order() {
    let runner = Arc::new(RecordingRunner::answering(0, NET_TOOLS_ARP));
    let reader = ArpCacheReader::new(Platform::Linux, runner.clone());

    let entries = reader.get_arp_cache();

    assert_eq!(
        entries,
        vec![
            ArpEntry::new("10.0.0.1", "00:1a:2b:3c:4d:5e", "enp9s0"),
            ArpEntry::new("10.0.0.7", "a4:5e:60:01:02:03", "br0"),
        ]
    );
    assert_eq!(runner.calls(), vec!["arp -e"]);
}

#[test]
fn windows_cache_keeps_the_printed_type_column() {
    let runner = Arc::new(RecordingRunner::answering(0, WINDOWS_ARP));
    let reader = ArpCacheReader::new(Platform::Windows, runner.clone());

    let snapshot = reader.read_cache().unwrap();

    assert_eq!(snapshot.entries, vec![ArpEntry::new("10.0.0.1", "00-1a-2b-3c-4d-5e", "dynamic")]);
    assert_eq!(snapshot.entries[0].hardware_addr().unwrap().to_string(), "00:1a:2b:3c:4d:5e");
    assert_eq!(snapshot.skipped.len(), 2);
    assert_eq!(runner.calls(), vec!["arp -a"]);
}

#[test]
fn every_read_runs_the_utility_again() {
    let runner = Arc::new(RecordingRunner::answering(0, NET_TOOLS_ARP));
    let reader = ArpCacheReader::new(Platform::MacOs, runner.clone());

    assert_eq!(reader.get_arp_cache(), reader.get_arp_cache());
    assert_eq!(runner.calls().len(), 2);
}

#[test]
fn failures_collapse_to_an_empty_cache() {
    let missing = Arc::new(RecordingRunner::new(|_, _| Err(io::Error::from(io::ErrorKind::NotFound))));
    let reader = ArpCacheReader::new(Platform::Linux, missing);
    assert!(reader.get_arp_cache().is_empty());
    assert!(matches!(reader.read_cache(), Err(ArpError::Launch(_))));

    let failing = Arc::new(RecordingRunner::new(|_, _| Ok(exit(2, ""))));
    let reader = ArpCacheReader::new(Platform::Linux, failing);
    assert!(reader.get_arp_cache().is_empty());
    assert!(matches!(reader.read_cache(), Err(ArpError::CommandFailed { .. })));
}

#[test]
fn unknown_platforms_spawn_nothing() {
    let runner = Arc::new(RecordingRunner::answering(0, NET_TOOLS_ARP));
    let reader = ArpCacheReader::new(Platform::Other("haiku".into()), runner.clone());

    assert!(reader.get_arp_cache().is_empty());
    assert!(matches!(reader.read_cache(), Err(ArpError::UnsupportedPlatform(_))));
    assert!(runner.calls().is_empty());
}
