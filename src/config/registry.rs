//! Key/value view over the settings file.

use crate::error::{ConfigError, ConfigResult};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings read from a JSON file, looked up by settings key.
#[derive(Debug, Clone, Default)]
pub struct SettingsRegistry {
    values: Map<String, Value>,
    path: Option<PathBuf>,
}

impl SettingsRegistry {
    /// Read the settings file at `path`.
    ///
    /// Returns `Ok(None)` when no file exists there. An unreadable file or a
    /// document that is not a JSON object is an error.
    pub fn read_config_file(path: &Path) -> ConfigResult<Option<Self>> {
        if !path.is_file() {
            debug!(path = %path.display(), "no settings file found");
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::io(format!("reading {}", path.display()), e))?;
        let mut registry = Self::from_json_str(&content)
            .map_err(|e| e.with_key(&path.display().to_string()))?;
        registry.path = Some(path.to_path_buf());
        Ok(Some(registry))
    }

    /// Parse settings from a JSON document.
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let value: Value = serde_json::from_str(content).map_err(|e| {
            ConfigError::invalid_format(format!("settings file is not valid JSON: {e}"))
        })?;
        match value {
            Value::Object(values) => Ok(Self { values, path: None }),
            _ => Err(ConfigError::invalid_format(
                "settings file must contain a JSON object",
            )),
        }
    }

    /// Whether the file supplies `key`. A `null` value counts as absent.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key).filter(|value| !value.is_null())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Path of the file the settings were read from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
