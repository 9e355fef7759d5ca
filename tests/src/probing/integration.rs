#![cfg(test)]
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::utils::RecordingRunner;
use netdiag_common::config::DEFAULT_PROBE_TIMEOUT;
use netdiag_common::platform::Platform;
use netdiag_common::probe::{Latency, PortStatus, ProbeOutcome};
use netdiag_core::prober::Prober;
use netdiag_core::validator::HostValidator;
use tokio::net::TcpListener;

fn prober(platform: Platform, runner: Arc<RecordingRunner>) -> Prober {
    Prober::new(platform, runner, Duration::from_millis(800))
}

/// A listener on loopback that accepts until the test ends.
async fn listening_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        loop {
            if listener.accept().await.is_err() {
                break;
            }
        }
    });
    port
}

#[test]
fn default_probe_timeout_is_five_seconds() {
    assert_eq!(DEFAULT_PROBE_TIMEOUT, Duration::from_millis(5000));
}

#[tokio::test]
async fn port_and_latency_against_a_loopback_listener() {
    let port = listening_port().await;
    let runner = Arc::new(RecordingRunner::answering(0, ""));
    let prober = prober(Platform::Linux, runner.clone());

    let checked = prober.probe_port("127.0.0.1", port).await;
    assert_eq!(checked.outcome, ProbeOutcome::Port(PortStatus::Open(port)));
    assert_eq!(checked.port, Some(port));

    let timed = prober.probe_latency("127.0.0.1", port).await;
    match timed.outcome {
        ProbeOutcome::Latency(Latency::Measured(elapsed)) => assert!(elapsed < Duration::from_millis(800)),
        other => panic!("expected a measurement, got {other:?}"),
    }

    assert!(runner.calls().is_empty(), "TCP probes spawn no processes");
}

#[tokio::test]
async fn many_probes_run_concurrently() {
    let port = listening_port().await;
    let prober = Arc::new(prober(Platform::Linux, Arc::new(RecordingRunner::answering(0, ""))));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let prober = Arc::clone(&prober);
            tokio::spawn(async move { prober.check_port("127.0.0.1", port).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), PortStatus::Open(port));
    }
}

#[tokio::test]
async fn unresolvable_hosts_fail_within_the_timeout() {
    let runner = Arc::new(RecordingRunner::answering(0, ""));
    let prober = prober(Platform::Linux, runner.clone());
    let host = "no-such-host.invalid";

    let start = Instant::now();
    assert!(!prober.ping_host(host).await);
    assert_eq!(prober.check_port(host, 80).await, PortStatus::Closed);
    assert_eq!(prober.measure_latency(host, 80).await, Latency::Unreachable);
    assert!(start.elapsed() < Duration::from_secs(3));

    assert!(runner.calls().is_empty(), "nothing to ping without an address");
}

#[tokio::test]
async fn ping_uses_the_platform_utility() {
    let runner = Arc::new(RecordingRunner::answering(1, ""));
    let prober = Prober::new(Platform::Windows, runner.clone(), Duration::from_secs(2));

    let result = prober.probe_reachability("127.0.0.1").await;

    assert_eq!(result.outcome, ProbeOutcome::Reachable(false));
    assert_eq!(runner.calls(), vec!["ping -n 1 -w 2000 127.0.0.1"]);
}

#[tokio::test]
async fn unknown_platforms_fall_back_to_the_echo_port() {
    let runner = Arc::new(RecordingRunner::answering(0, ""));
    let prober = prober(Platform::Other("plan9".into()), runner.clone());

    // Loopback either accepts or refuses port 7; both prove the host is up.
    assert!(prober.ping_host("127.0.0.1").await);
    assert!(runner.calls().is_empty());
}

#[test]
fn validator_checks_before_probing() {
    let validator = HostValidator::default();

    assert!(validator.is_valid_host("127.0.0.1"));
    assert!(validator.is_valid_host("localhost"));
    assert!(!validator.is_valid_host(""));
    assert!(!validator.is_valid_host("256.1.1.1"));
    assert!(!validator.is_valid_host("no-such-host.invalid"));
}
