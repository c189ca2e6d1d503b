//! Generate subcommand for horusec CLI
//!
//! Seeds a settings file with the resolved configuration, keyed the same way
//! the file layer reads it back.

use crate::config::{ConfigState, to_settings_map};
use crate::error::ConfigError;
use std::path::Path;
use tracing::{info, warn};

/// What [`run_generate`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    Created,
    AlreadyExists,
}

/// Write `state` to its settings file unless a file is already there.
pub fn run_generate(state: &ConfigState) -> anyhow::Result<GenerateOutcome> {
    let path = state.config_file_path();
    if path.exists() {
        warn!(path = %path.display(), "settings file already exists, leaving it untouched");
        return Ok(GenerateOutcome::AlreadyExists);
    }

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        create_parent(parent)?;
    }

    let settings = serde_json::Value::Object(to_settings_map(state));
    let mut content = serde_json::to_string_pretty(&settings)?;
    content.push('\n');
    std::fs::write(path, content)
        .map_err(|e| ConfigError::io(format!("writing {}", path.display()), e))?;

    info!(path = %path.display(), "settings file created");
    Ok(GenerateOutcome::Created)
}

fn create_parent(parent: &Path) -> Result<(), ConfigError> {
    std::fs::create_dir_all(parent)
        .map_err(|e| ConfigError::io(format!("creating {}", parent.display()), e))
}
