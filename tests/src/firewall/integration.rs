#![cfg(test)]
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::utils::{RecordingRunner, exit};
use netdiag_common::config::Config;
use netdiag_common::firewall::{Action, Chain, FirewallRule, Protocol, RuleError};
use netdiag_common::platform::Platform;
use netdiag_core::firewall::{FirewallController, FirewallError};

fn ssh_drop() -> FirewallRule {
    FirewallRule::new(Chain::Input, Action::Drop)
        .with_protocol(Protocol::Tcp)
        .with_destination_port(22)
}

/// `which` finds the binary; the binary itself exits with `code`.
fn installed(code: i32) -> RecordingRunner {
    RecordingRunner::new(move |program, _| match program {
        "which" => Ok(exit(0, "/usr/sbin/iptables\n")),
        _ => Ok(exit(code, "")),
    })
}

#[test]
fn rules_round_trip_through_sudo() {
    let runner = Arc::new(installed(0));
    let controller = FirewallController::new(Platform::Linux, runner.clone(), &Config::default());

    controller.add_rule(&ssh_drop()).unwrap();
    controller.delete_rule(&ssh_drop()).unwrap();

    assert_eq!(
        runner.calls(),
        vec![
            "which iptables",
            "sudo -n iptables -A INPUT -p tcp --dport 22 -j DROP",
            "which iptables",
            "sudo -n iptables -D INPUT -p tcp --dport 22 -j DROP",
        ]
    );
}

#[test]
fn no_commands_outside_linux() {
    for platform in [Platform::Windows, Platform::MacOs, Platform::Bsd] {
        let runner = Arc::new(installed(0));
        let controller = FirewallController::new(platform, runner.clone(), &Config::default());

        assert!(!controller.is_available());
        assert!(matches!(controller.list_rules(), Err(FirewallError::Unavailable)));
        assert!(matches!(controller.add_raw_rule("-A INPUT -j ACCEPT"), Err(FirewallError::Unavailable)));
        assert!(matches!(controller.delete_rule(&ssh_drop()), Err(FirewallError::Unavailable)));
        assert_eq!(runner.calls().len(), 0);
    }
}

#[test]
fn destructive_raw_arguments_never_reach_the_binary() {
    let runner = Arc::new(installed(0));
    let controller = FirewallController::new(Platform::Linux, runner.clone(), &Config::default());

    let flushed = controller.add_raw_rule("-F");
    assert!(matches!(flushed, Err(FirewallError::InvalidRule(RuleError::ForbiddenFlag(_)))));

    let chained = controller.add_raw_rule("-A INPUT -j ACCEPT; reboot");
    assert!(matches!(chained, Err(FirewallError::InvalidRule(RuleError::ForbiddenCharacter(_)))));

    assert!(runner.calls().is_empty());
}

#[test]
fn disguised_table_flags_never_reach_the_binary() {
    let runner = Arc::new(installed(0));
    let controller = FirewallController::new(Platform::Linux, runner.clone(), &Config::default());

    for rule in [
        "-FINPUT",
        "-PINPUT DROP",
        "-tnat -A POSTROUTING -j MASQUERADE",
        "--table=nat -A POSTROUTING -j MASQUERADE",
        "--flus",
        "--polic INPUT DROP",
        "-A INPUT -j ACCEPT --modprobe=/tmp/evil",
    ] {
        let added = controller.add_raw_rule(rule);
        assert!(
            matches!(added, Err(FirewallError::InvalidRule(RuleError::ForbiddenFlag(_)))),
            "{rule} was accepted: {added:?}"
        );
        let deleted = controller.delete_raw_rule(rule);
        assert!(matches!(deleted, Err(FirewallError::InvalidRule(_))), "{rule} was accepted: {deleted:?}");
    }

    let unknown = controller.add_raw_rule("-A INPUT -vtnat -j ACCEPT");
    assert!(matches!(unknown, Err(FirewallError::InvalidRule(RuleError::UnsupportedOption(_)))));

    assert!(runner.calls().is_empty());
}

#[test]
fn refusal_is_reported_as_rejected() {
    let runner = Arc::new(installed(4));
    let cfg = Config {
        use_sudo: false,
        ..Config::default()
    };
    let controller = FirewallController::new(Platform::Linux, runner.clone(), &cfg);

    let result = controller.delete_raw_rule("INPUT -s 10.0.0.9 -j DROP");

    assert!(matches!(result, Err(FirewallError::Rejected { exit_code: Some(4), .. })));
    assert_eq!(runner.calls()[1], "iptables -D INPUT -s 10.0.0.9 -j DROP");
}

#[test]
fn concurrent_mutations_do_not_interleave() {
    let runner = Arc::new(RecordingRunner::answering(0, "").holding(Duration::from_millis(20)));
    let controller = Arc::new(FirewallController::new(Platform::Linux, runner.clone(), &Config::default()));

    let workers: Vec<_> = (0..6u16)
        .map(|i| {
            let controller = Arc::clone(&controller);
            thread::spawn(move || {
                let rule = FirewallRule::new(Chain::Input, Action::Accept)
                    .with_protocol(Protocol::Tcp)
                    .with_destination_port(8000 + i);
                controller.add_rule(&rule)
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap().unwrap();
    }

    let mutations = runner.calls().into_iter().filter(|call| call.starts_with("sudo")).count();
    assert_eq!(mutations, 6);
    assert_eq!(runner.max_in_flight(), 1);
}
