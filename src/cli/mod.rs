//! CLI command definitions for horusec
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod generate;
pub mod start;

use crate::config::{ConfigState, FlagOverlay};
use crate::error::ConfigResult;
use crate::logging::{self, OsSystemCalls};
use clap::{Parser, Subcommand};
use start::StartArgs;
use std::path::PathBuf;
use tracing::Level;

/// Horusec CLI
#[derive(Parser, Debug)]
#[command(name = "horusec", author, version, about, long_about = None)]
pub struct Cli {
    /// Path of the JSON settings file (default: ./horusec-config.json)
    #[arg(long, global = true, value_name = "FILE")]
    pub config_file_path: Option<PathBuf>,

    /// Log level: panic, fatal, error, warn, info, debug or trace
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Directory to write log files to (default: stdout)
    #[arg(long, global = true, value_name = "DIR")]
    pub log_file_path: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the analysis in the current path
    Start(StartArgs),

    /// Write the resolved configuration to the settings file if none exists
    Generate,

    /// Print the CLI version
    Version,
}

impl FlagOverlay for Cli {
    fn apply(&self, state: &mut ConfigState) -> ConfigResult<()> {
        if let Some(level) = &self.log_level {
            state.log_level = level.clone();
        }
        if let Some(dir) = &self.log_file_path {
            state.log_file_path = dir.clone();
        }
        Ok(())
    }
}

/// Open the configured log sink and install the global subscriber.
pub fn init_logging(state: &ConfigState) -> anyhow::Result<()> {
    let level = logging::parse_log_level(state.log_level()).unwrap_or(Level::INFO);
    let sink = logging::configure_log_sink(state.log_file_path(), &OsSystemCalls)?;
    if let Some(path) = sink.path() {
        eprintln!("Logging to {}", path.display());
    }
    logging::init_subscriber(level, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_global_flags_parse_before_and_after_subcommand() {
        let cli = Cli::try_parse_from([
            "horusec",
            "--log-level",
            "debug",
            "start",
            "--config-file-path",
            "./conf.json",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.config_file_path, Some(PathBuf::from("./conf.json")));
        assert!(matches!(cli.command, Command::Start(_)));
    }

    #[test]
    fn test_global_overlay_only_touches_passed_flags() {
        let cli = Cli::try_parse_from(["horusec", "--log-file-path", "logs", "generate"]).unwrap();
        let mut state = ConfigState::defaults(Path::new("/tmp"));
        state.log_level = "warn".to_string();

        cli.apply(&mut state).unwrap();
        assert_eq!(state.log_file_path(), "logs");
        assert_eq!(state.log_level(), "warn");
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["horusec"]).is_err());
    }
}
