//! Environment variable names and their settings-file keys.
//!
//! Every configuration field has one variable named `HORUSEC_CLI_<WORDS>`.
//! The settings file uses the same name in lower camel case
//! (`HORUSEC_CLI_CERT_PATH` -> `horusecCliCertPath`).

use heck::ToLowerCamelCase;
use std::collections::HashMap;

/// Prefix shared by every variable.
pub const ENV_PREFIX: &str = "HORUSEC_CLI_";

/// Lower camel form of [`ENV_PREFIX`], shared by every settings key.
pub const KEY_PREFIX: &str = "horusecCli";

pub const ENV_HORUSEC_API_URI: &str = "HORUSEC_CLI_HORUSEC_API_URI";
pub const ENV_TIMEOUT_IN_SECONDS_REQUEST: &str = "HORUSEC_CLI_TIMEOUT_IN_SECONDS_REQUEST";
pub const ENV_TIMEOUT_IN_SECONDS_ANALYSIS: &str = "HORUSEC_CLI_TIMEOUT_IN_SECONDS_ANALYSIS";
pub const ENV_MONITOR_RETRY_IN_SECONDS: &str = "HORUSEC_CLI_MONITOR_RETRY_IN_SECONDS";
pub const ENV_REPOSITORY_AUTHORIZATION: &str = "HORUSEC_CLI_REPOSITORY_AUTHORIZATION";
pub const ENV_PRINT_OUTPUT_TYPE: &str = "HORUSEC_CLI_PRINT_OUTPUT_TYPE";
pub const ENV_JSON_OUTPUT_FILE_PATH: &str = "HORUSEC_CLI_JSON_OUTPUT_FILEPATH";
pub const ENV_SEVERITIES_TO_IGNORE: &str = "HORUSEC_CLI_SEVERITIES_TO_IGNORE";
pub const ENV_FILES_OR_PATHS_TO_IGNORE: &str = "HORUSEC_CLI_FILES_OR_PATHS_TO_IGNORE";
pub const ENV_RETURN_ERROR_IF_FOUND_VULNERABILITY: &str =
    "HORUSEC_CLI_RETURN_ERROR_IF_FOUND_VULNERABILITY";
pub const ENV_PROJECT_PATH: &str = "HORUSEC_CLI_PROJECT_PATH";
pub const ENV_WORK_DIR: &str = "HORUSEC_CLI_WORK_DIR";
pub const ENV_ENABLE_GIT_HISTORY_ANALYSIS: &str = "HORUSEC_CLI_ENABLE_GIT_HISTORY_ANALYSIS";
pub const ENV_CERT_INSECURE_SKIP_VERIFY: &str = "HORUSEC_CLI_CERT_INSECURE_SKIP_VERIFY";
pub const ENV_CERT_PATH: &str = "HORUSEC_CLI_CERT_PATH";
pub const ENV_ENABLE_COMMIT_AUTHOR: &str = "HORUSEC_CLI_ENABLE_COMMIT_AUTHOR";
pub const ENV_REPOSITORY_NAME: &str = "HORUSEC_CLI_REPOSITORY_NAME";
pub const ENV_FALSE_POSITIVE_HASHES: &str = "HORUSEC_CLI_FALSE_POSITIVE_HASHES";
pub const ENV_RISK_ACCEPT_HASHES: &str = "HORUSEC_CLI_RISK_ACCEPT_HASHES";
pub const ENV_TOOLS_CONFIG: &str = "HORUSEC_CLI_TOOLS_CONFIG";
pub const ENV_HEADERS: &str = "HORUSEC_CLI_HEADERS";
pub const ENV_CONTAINER_BIND_PROJECT_PATH: &str = "HORUSEC_CLI_CONTAINER_BIND_PROJECT_PATH";
pub const ENV_DISABLE_DOCKER: &str = "HORUSEC_CLI_DISABLE_DOCKER";
pub const ENV_CUSTOM_RULES_PATH: &str = "HORUSEC_CLI_CUSTOM_RULES_PATH";
pub const ENV_ENABLE_INFORMATION_SEVERITY: &str = "HORUSEC_CLI_ENABLE_INFORMATION_SEVERITY";
pub const ENV_CUSTOM_IMAGES: &str = "HORUSEC_CLI_CUSTOM_IMAGES";
pub const ENV_SHOW_VULNERABILITIES_TYPES: &str = "HORUSEC_CLI_SHOW_VULNERABILITIES_TYPES";
pub const ENV_ENABLE_OWASP_DEPENDENCY_CHECK: &str = "HORUSEC_CLI_ENABLE_OWASP_DEPENDENCY_CHECK";
pub const ENV_ENABLE_SHELLCHECK: &str = "HORUSEC_CLI_ENABLE_SHELLCHECK";
pub const ENV_LOG_LEVEL: &str = "HORUSEC_CLI_LOG_LEVEL";
pub const ENV_LOG_FILE_PATH: &str = "HORUSEC_CLI_LOG_FILE_PATH";

/// Map a variable name to its settings-file key.
///
/// `HORUSEC_CLI_HORUSEC_API_URI` becomes `horusecCliHorusecApiUri`.
pub fn settings_key(env_name: &str) -> String {
    env_name.to_lower_camel_case()
}

/// Read access to environment variables.
///
/// The loader never touches the process environment directly, so tests can
/// run in parallel with their own variable sets.
pub trait EnvSource {
    /// Value of `name`, or `None` when unset.
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}
