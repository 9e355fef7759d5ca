use std::sync::Arc;

use anyhow::ensure;
use colored::*;
use netdiag_common::config::Config;
use netdiag_common::platform::Platform;
use netdiag_common::probe::ProbeResult;
use netdiag_common::system::CommandRunner;
use netdiag_core::prober::Prober;
use netdiag_core::validator::HostValidator;

use crate::terminal::{colors, print};

pub async fn ping(
    host: String,
    platform: Platform,
    runner: Arc<dyn CommandRunner>,
    cfg: &Config,
) -> anyhow::Result<()> {
    let host = validate_host(host).await?;
    let prober = Prober::new(platform, runner, cfg.probe_timeout);
    report(prober.probe_reachability(&host).await, cfg);
    Ok(())
}

pub async fn port(
    host: String,
    port: u16,
    platform: Platform,
    runner: Arc<dyn CommandRunner>,
    cfg: &Config,
) -> anyhow::Result<()> {
    let host = validate_host(host).await?;
    let prober = Prober::new(platform, runner, cfg.probe_timeout);
    report(prober.probe_port(&host, port).await, cfg);
    Ok(())
}

pub async fn latency(
    host: String,
    port: u16,
    platform: Platform,
    runner: Arc<dyn CommandRunner>,
    cfg: &Config,
) -> anyhow::Result<()> {
    let host = validate_host(host).await?;
    let prober = Prober::new(platform, runner, cfg.probe_timeout);
    report(prober.probe_latency(&host, port).await, cfg);
    Ok(())
}

/// Name resolution blocks, so the check runs off the async workers.
async fn validate_host(host: String) -> anyhow::Result<String> {
    let candidate = host.clone();
    let valid = tokio::task::spawn_blocking(move || HostValidator::default().is_valid_host(&candidate)).await?;
    ensure!(valid, "Invalid hostname or IP address");
    Ok(host)
}

fn report(result: ProbeResult, cfg: &Config) {
    let color = if result.is_positive() {
        colors::POSITIVE
    } else {
        colors::NEGATIVE
    };

    if cfg.quiet > 1 {
        print::print(&result.outcome.to_string());
        return;
    }

    print::aligned_line("Host", result.host.as_str().color(colors::IP_ADDR));
    if let Some(port) = result.port {
        print::aligned_line("Port", port.to_string());
    }
    print::aligned_line("Result", result.outcome.to_string().color(color).bold());
}
