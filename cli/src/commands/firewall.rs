use std::sync::Arc;

use anyhow::bail;
use colored::*;
use netdiag_common::config::Config;
use netdiag_common::firewall::RuleOperation;
use netdiag_common::platform::Platform;
use netdiag_common::system::CommandRunner;
use netdiag_core::firewall::{FirewallController, FirewallError};
use tracing::warn;

use crate::commands::FirewallCommand;
use crate::terminal::{colors, print};

pub fn firewall(
    command: FirewallCommand,
    platform: Platform,
    runner: Arc<dyn CommandRunner>,
    cfg: &Config,
) -> anyhow::Result<()> {
    let controller = FirewallController::new(platform, runner, cfg);

    if !cfg.use_sudo && !is_root::is_root() {
        warn!("running {} without sudo as an unprivileged user", cfg.firewall_binary);
    }

    match command {
        FirewallCommand::Status => {
            if controller.is_available() {
                print::aligned_line("Firewall", cfg.firewall_binary.as_str().color(colors::POSITIVE));
                Ok(())
            } else {
                bail!(FirewallError::Unavailable)
            }
        }
        FirewallCommand::List => {
            for line in controller.list_rules()? {
                print::print(&line);
            }
            Ok(())
        }
        FirewallCommand::Add(args) => report_change(RuleOperation::Append, controller.add_rule(&args.to_rule())),
        FirewallCommand::Delete(args) => {
            report_change(RuleOperation::Delete, controller.delete_rule(&args.to_rule()))
        }
        FirewallCommand::AddRaw { args } => {
            report_change(RuleOperation::Append, controller.add_raw_rule(&args.join(" ")))
        }
        FirewallCommand::DeleteRaw { args } => {
            report_change(RuleOperation::Delete, controller.delete_raw_rule(&args.join(" ")))
        }
    }
}

/// Success prints the confirmation; a refusal from the filter binary becomes the short
/// failure message, everything else surfaces as-is.
fn report_change(operation: RuleOperation, result: Result<(), FirewallError>) -> anyhow::Result<()> {
    let (done, failed): (&str, &str) = match operation {
        RuleOperation::Append => ("Rule added successfully", "Failed to add rule"),
        RuleOperation::Delete => ("Rule deleted successfully", "Failed to delete rule"),
    };

    match result {
        Ok(()) => {
            print::print_status(done.color(colors::POSITIVE).to_string());
            Ok(())
        }
        Err(FirewallError::Rejected { stderr, .. }) if stderr.is_empty() => bail!("{failed}"),
        Err(FirewallError::Rejected { stderr, .. }) => bail!("{failed}: {stderr}"),
        Err(e) => Err(e.into()),
    }
}
