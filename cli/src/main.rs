mod commands;
mod terminal;

use std::sync::Arc;

use commands::{CommandLine, Commands, arp, firewall, probe};
use netdiag_common::config::Config;
use netdiag_common::platform::Platform;
use netdiag_common::system::CommandRunner;
use netdiag_core::runner::SystemCommandRunner;
use terminal::{logging, print};
use tracing::debug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    let cfg: Config = commands.to_config();
    let platform = Platform::detect();
    let runner: Arc<dyn CommandRunner> = Arc::new(SystemCommandRunner);
    debug!("running on {platform}");

    let result = match commands.command {
        Commands::Ping { host } => {
            print::header("reachability", cfg.quiet);
            probe::ping(host, platform, runner, &cfg).await
        }
        Commands::Port { host, port } => {
            print::header("port check", cfg.quiet);
            probe::port(host, port, platform, runner, &cfg).await
        }
        Commands::Latency { host, port } => {
            print::header("latency", cfg.quiet);
            probe::latency(host, port, platform, runner, &cfg).await
        }
        Commands::Arp => {
            print::header("arp cache", cfg.quiet);
            arp::arp(platform, runner, &cfg)
        }
        Commands::Firewall(command) => {
            print::header("firewall", cfg.quiet);
            firewall::firewall(command, platform, runner, &cfg)
        }
    };

    print::end_of_program(cfg.quiet);
    result
}
