//! Horusec CLI
//!
//! Resolves configuration from defaults, the settings file, the environment
//! and command-line flags, then runs the requested subcommand.

use anyhow::Result;
use clap::Parser;
use horusec_config::cli::generate::run_generate;
use horusec_config::cli::start::run_start;
use horusec_config::cli::{Cli, Command, init_logging};
use horusec_config::config::ConfigLoader;
use horusec_config::logging::{parse_log_level, with_bootstrap_subscriber};
use tracing::Level;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Command::Version = cli.command {
        println!("horusec {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let loader = ConfigLoader::new()?.config_file_path(cli.config_file_path.clone());
    // Until the configured sink is open, load-time events go to stderr.
    let bootstrap_level = cli
        .log_level
        .as_deref()
        .and_then(parse_log_level)
        .unwrap_or(Level::WARN);

    match &cli.command {
        Command::Start(args) => {
            let state = with_bootstrap_subscriber(bootstrap_level, std::io::stderr, || {
                loader.load_with_flags(&(&cli, args))
            })?;
            init_logging(&state)?;
            run_start(&state, &mut std::io::stdout().lock())?;
        }
        Command::Generate => {
            let state = with_bootstrap_subscriber(bootstrap_level, std::io::stderr, || {
                loader.load_with_flags(&cli)
            })?;
            init_logging(&state)?;
            run_generate(&state)?;
        }
        Command::Version => {}
    }

    Ok(())
}
