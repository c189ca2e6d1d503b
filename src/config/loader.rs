//! Layered configuration loader.
//!
//! Builds a [`ConfigState`] from four layers applied field by field, lowest
//! to highest: defaults, settings file, environment, command-line flags.
//! A layer only overwrites the fields it actually supplies.

use super::env::{EnvSource, ProcessEnv};
use super::fields::BINDINGS;
use super::normalize::normalize;
use super::registry::SettingsRegistry;
use super::state::ConfigState;
use crate::error::{ConfigError, ConfigResult};
use crate::paths;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Configuration layer, lowest to highest precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    /// Literal defaults
    Defaults = 0,
    /// JSON settings file
    File = 1,
    /// `HORUSEC_CLI_*` environment variables
    Environment = 2,
    /// Flags passed explicitly on the command line
    Flags = 3,
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layer::Defaults => write!(f, "defaults"),
            Layer::File => write!(f, "file"),
            Layer::Environment => write!(f, "environment"),
            Layer::Flags => write!(f, "flags"),
        }
    }
}

/// The flag layer. Implementors overwrite only the fields whose flags were
/// explicitly passed.
pub trait FlagOverlay {
    fn apply(&self, state: &mut ConfigState) -> ConfigResult<()>;
}

impl<F: FlagOverlay + ?Sized> FlagOverlay for &F {
    fn apply(&self, state: &mut ConfigState) -> ConfigResult<()> {
        (**self).apply(state)
    }
}

impl<A: FlagOverlay, B: FlagOverlay> FlagOverlay for (A, B) {
    fn apply(&self, state: &mut ConfigState) -> ConfigResult<()> {
        self.0.apply(state)?;
        self.1.apply(state)
    }
}

/// Runs the load passes against one working directory and environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader<E = ProcessEnv> {
    working_dir: PathBuf,
    config_file_path: Option<PathBuf>,
    env: E,
}

impl ConfigLoader<ProcessEnv> {
    /// Loader for the current process: real working directory and environment.
    pub fn new() -> ConfigResult<Self> {
        let working_dir =
            std::env::current_dir().map_err(ConfigError::WorkingDirectoryUnavailable)?;
        Ok(Self::with_env(working_dir, ProcessEnv))
    }
}

impl<E: EnvSource> ConfigLoader<E> {
    /// Loader with an explicit working directory and environment.
    pub fn with_env(working_dir: impl Into<PathBuf>, env: E) -> Self {
        Self {
            working_dir: working_dir.into(),
            config_file_path: None,
            env,
        }
    }

    /// Read settings from `path` instead of `<working dir>/horusec-config.json`.
    /// Relative paths are taken from the working directory.
    pub fn config_file_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_file_path = path;
        self
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Defaults pass.
    pub fn defaults(&self) -> ConfigState {
        let mut state = ConfigState::defaults(&self.working_dir);
        if let Some(path) = &self.config_file_path {
            state.config_file_path = paths::absolutize(path, &self.working_dir);
        }
        debug!(layer = %Layer::Defaults, "applied");
        state
    }

    /// File pass. A missing settings file leaves `state` untouched.
    pub fn apply_file(&self, state: &mut ConfigState) -> ConfigResult<()> {
        let Some(registry) = SettingsRegistry::read_config_file(&state.config_file_path)? else {
            return Ok(());
        };

        let mut applied = 0;
        for binding in BINDINGS {
            let key = binding.settings_key();
            if let Some(value) = registry.get(&key) {
                binding.apply(state, value.into(), &key)?;
                applied += 1;
            }
        }

        for key in registry.keys() {
            if !BINDINGS.iter().any(|binding| binding.settings_key() == key) {
                warn!(key, "ignoring unknown settings key");
            }
        }

        debug!(
            layer = %Layer::File,
            path = %state.config_file_path.display(),
            applied,
            "applied"
        );
        Ok(())
    }

    /// Environment pass. Unset and empty variables leave their field alone.
    ///
    /// Calling this again after [`apply_flags`](Self::apply_flags) re-applies
    /// the environment over flag values; re-apply the flags afterwards if they
    /// must win.
    pub fn apply_env(&self, state: &mut ConfigState) -> ConfigResult<()> {
        let mut applied = 0;
        for binding in BINDINGS {
            let Some(value) = self.env.var(binding.env).filter(|value| !value.is_empty()) else {
                continue;
            };
            binding.apply(state, value.as_str().into(), binding.env)?;
            applied += 1;
        }
        debug!(layer = %Layer::Environment, applied, "applied");
        Ok(())
    }

    /// Flag pass.
    pub fn apply_flags(
        &self,
        state: &mut ConfigState,
        flags: &dyn FlagOverlay,
    ) -> ConfigResult<()> {
        flags.apply(state)?;
        debug!(layer = %Layer::Flags, "applied");
        Ok(())
    }

    /// Normalize and validate the merged state.
    pub fn normalize(&self, state: &mut ConfigState) -> ConfigResult<()> {
        normalize(state, &self.working_dir)
    }

    /// Defaults, file, environment, then normalization.
    pub fn load(&self) -> ConfigResult<ConfigState> {
        let mut state = self.defaults();
        self.apply_file(&mut state)?;
        self.apply_env(&mut state)?;
        self.normalize(&mut state)?;
        Ok(state)
    }

    /// All four layers, then normalization.
    pub fn load_with_flags(&self, flags: &dyn FlagOverlay) -> ConfigResult<ConfigState> {
        let mut state = self.defaults();
        self.apply_file(&mut state)?;
        self.apply_env(&mut state)?;
        self.apply_flags(&mut state, flags)?;
        self.normalize(&mut state)?;
        Ok(state)
    }
}
