//! # Firewall Controller
//!
//! Lists and mutates the packet-filter ruleset through the filter binary. Only Linux is
//! eligible; on any other platform no command is ever spawned.
//!
//! Mutations are serialized through one lock per controller so that concurrent add and
//! delete requests cannot interleave their underlying commands. Listing is not locked.

use std::io;
use std::sync::{Arc, Mutex};

use netdiag_common::config::Config;
use netdiag_common::firewall::{FirewallRule, RawRule, RuleError, RuleOperation};
use netdiag_common::platform::Platform;
use netdiag_common::system::{CommandOutput, CommandRunner};
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Debug, Error)]
pub enum FirewallError {
    #[error("IP tables is not available on this system")]
    Unavailable,

    #[error("invalid rule: {0}")]
    InvalidRule(#[from] RuleError),

    #[error("{program} exited with {exit_code:?}: {stderr}")]
    Rejected {
        program: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("failed to run {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
}

pub struct FirewallController {
    platform: Platform,
    runner: Arc<dyn CommandRunner>,
    binary: String,
    use_sudo: bool,
    mutation_lock: Mutex<()>,
}

impl FirewallController {
    pub fn new(platform: Platform, runner: Arc<dyn CommandRunner>, config: &Config) -> Self {
        Self {
            platform,
            runner,
            binary: config.firewall_binary.clone(),
            use_sudo: config.use_sudo,
            mutation_lock: Mutex::new(()),
        }
    }

    /// `true` on Linux when `which <binary>` exits zero.
    pub fn is_available(&self) -> bool {
        if !self.platform.is_linux() {
            warn!("IP tables is only available on Linux systems");
            return false;
        }

        match self.runner.run("which", &[self.binary.clone()]) {
            Ok(output) => output.success(),
            Err(e) => {
                error!("Error checking for iptables availability: {e}");
                false
            }
        }
    }

    /// Verbose, numeric listing of every chain, one raw line per element.
    pub fn list_rules(&self) -> Result<Vec<String>, FirewallError> {
        self.ensure_available()?;
        let args: Vec<String> = vec!["-L".into(), "-v".into(), "-n".into()];
        let output: CommandOutput = self.execute(args)?;
        Ok(output.stdout.lines().map(str::to_string).collect())
    }

    pub fn add_rule(&self, rule: &FirewallRule) -> Result<(), FirewallError> {
        self.mutate(rule.to_args(RuleOperation::Append))
    }

    pub fn delete_rule(&self, rule: &FirewallRule) -> Result<(), FirewallError> {
        self.mutate(rule.to_args(RuleOperation::Delete))
    }

    /// Passes validated free-form arguments straight after the filter binary.
    pub fn add_raw_rule(&self, rule: &str) -> Result<(), FirewallError> {
        let raw: RawRule = rule.parse()?;
        self.mutate(raw.tokens().to_vec())
    }

    /// Like [`add_raw_rule`](Self::add_raw_rule) with `-D` in front of the arguments.
    pub fn delete_raw_rule(&self, rule: &str) -> Result<(), FirewallError> {
        let raw: RawRule = rule.parse()?;
        let mut args: Vec<String> = vec![RuleOperation::Delete.flag().to_string()];
        args.extend_from_slice(raw.tokens());
        self.mutate(args)
    }

    fn mutate(&self, args: Vec<String>) -> Result<(), FirewallError> {
        let _guard = self.mutation_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.ensure_available()?;
        info!("applying firewall change: {}", args.join(" "));
        self.execute(args).map(|_| ())
    }

    fn ensure_available(&self) -> Result<(), FirewallError> {
        if self.is_available() {
            Ok(())
        } else {
            Err(FirewallError::Unavailable)
        }
    }

    fn execute(&self, args: Vec<String>) -> Result<CommandOutput, FirewallError> {
        let (program, full_args) = self.privileged(args);
        let output: CommandOutput = self.runner.run(&program, &full_args).map_err(|source| {
            error!("Error running {program}: {source}");
            FirewallError::Launch {
                program: program.clone(),
                source,
            }
        })?;

        if output.success() {
            debug!("{program} {} succeeded", full_args.join(" "));
            Ok(output)
        } else {
            warn!("{program} {} exited with {:?}", full_args.join(" "), output.exit_code);
            Err(FirewallError::Rejected {
                program,
                exit_code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            })
        }
    }

    // `sudo -n` fails instead of waiting for a password nobody will type.
    fn privileged(&self, args: Vec<String>) -> (String, Vec<String>) {
        if self.use_sudo {
            let mut full: Vec<String> = vec!["-n".to_string(), self.binary.clone()];
            full.extend(args);
            ("sudo".to_string(), full)
        } else {
            (self.binary.clone(), args)
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
