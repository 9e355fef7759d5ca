//! # Host Prober
//!
//! Three independent probes against a single host: reachability, port handshake and
//! handshake latency. Every probe, name resolution included, is bounded by the
//! configured timeout and reports failure as a negative value, never as an error.
//!
//! Probes do not retry and do not fan out. Callers wanting to probe many targets
//! concurrently spawn the futures themselves.

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use netdiag_common::platform::Platform;
use netdiag_common::probe::{Latency, PortStatus, ProbeOutcome, ProbeResult};
use netdiag_common::system::{CommandOutput, CommandRunner};
use tokio::net::{TcpStream, lookup_host};
use tokio::time::timeout;
use tracing::{debug, warn};

/// TCP echo service, used when the platform `ping` utility is not available.
const ECHO_PORT: u16 = 7;

pub struct Prober {
    platform: Platform,
    runner: Arc<dyn CommandRunner>,
    probe_timeout: Duration,
}

impl Prober {
    pub fn new(platform: Platform, runner: Arc<dyn CommandRunner>, probe_timeout: Duration) -> Self {
        Self {
            platform,
            runner,
            probe_timeout,
        }
    }

    /// Checks whether `host` answers an echo-style signal.
    ///
    /// Uses the platform `ping` utility once. When the utility cannot be launched, a TCP
    /// connect to the echo port stands in: a completed handshake or an active refusal
    /// both prove the host is alive.
    pub async fn ping_host(&self, host: &str) -> bool {
        match timeout(self.probe_timeout, self.ping_unbounded(host)).await {
            Ok(alive) => alive,
            Err(_elapsed) => {
                debug!("ping {host} timed out after {:?}", self.probe_timeout);
                false
            }
        }
    }

    /// Attempts a TCP handshake with `host:port`.
    ///
    /// Refused, filtered and timed-out ports are all reported as [`PortStatus::Closed`].
    pub async fn check_port(&self, host: &str, port: u16) -> PortStatus {
        match timeout(self.probe_timeout, connect(host, port)).await {
            Ok(Ok(stream)) => {
                let peer_port = stream.peer_addr().map(|peer| peer.port()).unwrap_or(port);
                PortStatus::Open(peer_port)
            }
            Ok(Err(e)) => {
                debug!("{host}:{port} closed: {e}");
                PortStatus::Closed
            }
            Err(_elapsed) => {
                debug!("{host}:{port} timed out after {:?}", self.probe_timeout);
                PortStatus::Closed
            }
        }
    }

    /// Wall-clock time of a full [`check_port`](Self::check_port), resolution included.
    pub async fn measure_latency(&self, host: &str, port: u16) -> Latency {
        let start: Instant = Instant::now();
        match self.check_port(host, port).await {
            PortStatus::Open(_) => Latency::Measured(start.elapsed()),
            PortStatus::Closed => Latency::Unreachable,
        }
    }

    pub async fn probe_reachability(&self, host: &str) -> ProbeResult {
        let alive: bool = self.ping_host(host).await;
        ProbeResult::new(host, None, ProbeOutcome::Reachable(alive))
    }

    pub async fn probe_port(&self, host: &str, port: u16) -> ProbeResult {
        let status: PortStatus = self.check_port(host, port).await;
        ProbeResult::new(host, Some(port), ProbeOutcome::Port(status))
    }

    pub async fn probe_latency(&self, host: &str, port: u16) -> ProbeResult {
        let latency: Latency = self.measure_latency(host, port).await;
        ProbeResult::new(host, Some(port), ProbeOutcome::Latency(latency))
    }

    async fn ping_unbounded(&self, host: &str) -> bool {
        let ip: IpAddr = match resolve(host, 0).await {
            Ok(addr) => addr.ip(),
            Err(e) => {
                debug!("cannot ping {host}: {e}");
                return false;
            }
        };

        let Some((program, args)) = ping_command(&self.platform, ip, self.probe_timeout) else {
            return echo_probe(ip).await;
        };

        let runner = Arc::clone(&self.runner);
        let task = tokio::task::spawn_blocking(move || runner.run(program, &args));
        match task.await {
            Ok(Ok(output)) => echo_replied(&self.platform, &output),
            Ok(Err(e)) => {
                debug!("{program} unavailable ({e}), falling back to TCP echo");
                echo_probe(ip).await
            }
            Err(e) => {
                warn!("ping task for {host} failed: {e}");
                false
            }
        }
    }
}

async fn resolve(host: &str, port: u16) -> io::Result<SocketAddr> {
    lookup_host((host, port)).await?.next().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, format!("{host} resolved to no addresses"))
    })
}

async fn connect(host: &str, port: u16) -> io::Result<TcpStream> {
    let addr: SocketAddr = resolve(host, port).await?;
    TcpStream::connect(addr).await
}

async fn echo_probe(ip: IpAddr) -> bool {
    match TcpStream::connect(SocketAddr::new(ip, ECHO_PORT)).await {
        Ok(_) => true,
        Err(e) if e.kind() == io::ErrorKind::ConnectionRefused => true,
        Err(e) => {
            debug!("echo probe to {ip} failed: {e}");
            false
        }
    }
}

// Windows `ping` also exits zero when a router answers "Destination host unreachable";
// only a reply from the target carries a TTL.
fn echo_replied(platform: &Platform, output: &CommandOutput) -> bool {
    match platform {
        Platform::Windows => output.success() && output.stdout.contains("TTL="),
        _ => output.success(),
    }
}

/// Single-packet invocation of the platform `ping`, or `None` when there is no known one.
fn ping_command(platform: &Platform, ip: IpAddr, wait: Duration) -> Option<(&'static str, Vec<String>)> {
    let secs: String = wait.as_secs().max(1).to_string();
    let millis: String = wait.as_millis().max(1).to_string();
    let target: String = ip.to_string();

    let (program, args): (&'static str, Vec<String>) = match platform {
        Platform::Linux => ("ping", vec!["-c".into(), "1".into(), "-W".into(), secs, target]),
        Platform::MacOs | Platform::Bsd if ip.is_ipv6() => ("ping6", vec!["-c".into(), "1".into(), target]),
        Platform::MacOs | Platform::Bsd => ("ping", vec!["-c".into(), "1".into(), "-t".into(), secs, target]),
        Platform::Windows => ("ping", vec!["-n".into(), "1".into(), "-w".into(), millis, target]),
        Platform::Other(_) => return None,
    };
    Some((program, args))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
