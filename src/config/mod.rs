//! Layered CLI configuration.
//!
//! A [`ConfigState`] is resolved from four layers, each overwriting only the
//! fields it supplies:
//! 1. **Defaults** - literal values, paths anchored at the working directory
//! 2. **File** - JSON settings file, `horusec-config.json` by default
//! 3. **Environment** - `HORUSEC_CLI_*` variables
//! 4. **Flags** - options passed explicitly to `horusec start`
//!
//! After the last layer the state is normalized (relative paths made
//! absolute, derived defaults filled in) and validated.
//!
//! ## Keys
//! Every field has one environment variable. Its settings-file key is the
//! variable name in lower camel case, e.g. `HORUSEC_CLI_CERT_PATH` is
//! `horusecCliCertPath`.

pub mod coerce;
pub mod env;
pub mod fields;
mod loader;
pub mod normalize;
mod registry;
mod state;
pub mod types;

pub use env::{EnvSource, ProcessEnv, settings_key};
pub use fields::{BINDINGS, Binding, to_settings_map};
pub use loader::{ConfigLoader, FlagOverlay, Layer};
pub use registry::SettingsRegistry;
pub use state::*;
pub use types::{CustomImages, Language, MapToolConfig, Tool, ToolConfig, WorkDir};
