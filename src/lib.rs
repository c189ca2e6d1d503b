//! Horusec CLI configuration library
//!
//! Resolves the CLI's configuration from defaults, a settings file, the
//! environment and command-line flags, and sets up log output.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod paths;
