//! The resolved configuration record.

use super::types::{CustomImages, MapToolConfig, WorkDir};
use crate::error::ConfigResult;
use crate::format::OutputFormat;
use crate::paths;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// Name of the settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "horusec-config.json";

pub const DEFAULT_HORUSEC_API_URI: &str = "http://0.0.0.0:8000";
pub const DEFAULT_TIMEOUT_IN_SECONDS_REQUEST: i64 = 300;
pub const DEFAULT_TIMEOUT_IN_SECONDS_ANALYSIS: i64 = 600;
pub const DEFAULT_MONITOR_RETRY_IN_SECONDS: i64 = 15;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Resolved configuration for one CLI invocation.
///
/// Built by [`ConfigLoader`](super::ConfigLoader) and read through accessors
/// afterwards. Serializes with every field present, in declaration order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    pub(crate) config_file_path: PathBuf,
    #[serde(rename = "horusecAPIUri")]
    pub(crate) horusec_api_uri: String,
    pub(crate) timeout_in_seconds_request: i64,
    pub(crate) timeout_in_seconds_analysis: i64,
    pub(crate) monitor_retry_in_seconds: i64,
    pub(crate) repository_authorization: String,
    pub(crate) print_output_type: String,
    pub(crate) json_output_file_path: String,
    pub(crate) severities_to_ignore: Vec<String>,
    pub(crate) files_or_paths_to_ignore: Vec<String>,
    pub(crate) return_error_if_found_vulnerability: bool,
    pub(crate) project_path: PathBuf,
    pub(crate) work_dir: WorkDir,
    pub(crate) enable_git_history_analysis: bool,
    pub(crate) cert_insecure_skip_verify: bool,
    pub(crate) enable_commit_author: bool,
    pub(crate) disable_docker: bool,
    pub(crate) enable_information_severity: bool,
    pub(crate) enable_owasp_dependency_check: bool,
    pub(crate) enable_shell_check: bool,
    pub(crate) cert_path: String,
    pub(crate) repository_name: String,
    pub(crate) risk_accept_hashes: Vec<String>,
    pub(crate) false_positive_hashes: Vec<String>,
    pub(crate) headers: BTreeMap<String, String>,
    pub(crate) tools_config: MapToolConfig,
    pub(crate) custom_images: CustomImages,
    pub(crate) container_bind_project_path: String,
    pub(crate) custom_rules_path: String,
    pub(crate) show_vulnerabilities_types: Vec<String>,
    pub(crate) is_timeout: AtomicBool,
    pub(crate) log_level: String,
    pub(crate) log_file_path: String,
}

impl ConfigState {
    /// Every field at its literal default, with paths anchored at `working_dir`.
    pub fn defaults(working_dir: &Path) -> Self {
        Self {
            config_file_path: working_dir.join(DEFAULT_CONFIG_FILE_NAME),
            horusec_api_uri: DEFAULT_HORUSEC_API_URI.to_string(),
            timeout_in_seconds_request: DEFAULT_TIMEOUT_IN_SECONDS_REQUEST,
            timeout_in_seconds_analysis: DEFAULT_TIMEOUT_IN_SECONDS_ANALYSIS,
            monitor_retry_in_seconds: DEFAULT_MONITOR_RETRY_IN_SECONDS,
            repository_authorization: uuid::Uuid::nil().to_string(),
            print_output_type: String::new(),
            json_output_file_path: String::new(),
            severities_to_ignore: vec!["INFO".to_string()],
            files_or_paths_to_ignore: vec!["*tmp*".to_string(), "**/.vscode/**".to_string()],
            return_error_if_found_vulnerability: false,
            project_path: working_dir.to_path_buf(),
            work_dir: WorkDir::new(),
            enable_git_history_analysis: false,
            cert_insecure_skip_verify: false,
            enable_commit_author: false,
            disable_docker: false,
            enable_information_severity: false,
            enable_owasp_dependency_check: false,
            enable_shell_check: false,
            cert_path: String::new(),
            repository_name: paths::dir_name(working_dir).unwrap_or_default(),
            risk_accept_hashes: Vec::new(),
            false_positive_hashes: Vec::new(),
            headers: BTreeMap::new(),
            tools_config: MapToolConfig::new(),
            custom_images: CustomImages::new(),
            container_bind_project_path: String::new(),
            custom_rules_path: String::new(),
            show_vulnerabilities_types: vec!["Vulnerability".to_string()],
            is_timeout: AtomicBool::new(false),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file_path: String::new(),
        }
    }

    /// Serialize the current state as JSON, compact or indented.
    pub fn to_bytes(&self, pretty: bool) -> ConfigResult<Vec<u8>> {
        let bytes = if pretty {
            serde_json::to_vec_pretty(self)?
        } else {
            serde_json::to_vec(self)?
        };
        Ok(bytes)
    }

    pub fn config_file_path(&self) -> &Path {
        &self.config_file_path
    }

    pub fn horusec_api_uri(&self) -> &str {
        &self.horusec_api_uri
    }

    pub fn timeout_in_seconds_request(&self) -> i64 {
        self.timeout_in_seconds_request
    }

    pub fn timeout_in_seconds_analysis(&self) -> i64 {
        self.timeout_in_seconds_analysis
    }

    pub fn monitor_retry_in_seconds(&self) -> i64 {
        self.monitor_retry_in_seconds
    }

    pub fn repository_authorization(&self) -> &str {
        &self.repository_authorization
    }

    /// True when no repository token is configured (empty or the nil UUID).
    pub fn is_empty_repository_authorization(&self) -> bool {
        self.repository_authorization.is_empty()
            || self.repository_authorization == uuid::Uuid::nil().to_string()
    }

    pub fn print_output_type(&self) -> &str {
        &self.print_output_type
    }

    /// Parsed output type. Only meaningful after normalization.
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_str(&self.print_output_type).unwrap_or_default()
    }

    pub fn json_output_file_path(&self) -> &str {
        &self.json_output_file_path
    }

    pub fn severities_to_ignore(&self) -> &[String] {
        &self.severities_to_ignore
    }

    pub fn files_or_paths_to_ignore(&self) -> &[String] {
        &self.files_or_paths_to_ignore
    }

    pub fn return_error_if_found_vulnerability(&self) -> bool {
        self.return_error_if_found_vulnerability
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn work_dir(&self) -> &WorkDir {
        &self.work_dir
    }

    pub fn enable_git_history_analysis(&self) -> bool {
        self.enable_git_history_analysis
    }

    pub fn cert_insecure_skip_verify(&self) -> bool {
        self.cert_insecure_skip_verify
    }

    pub fn enable_commit_author(&self) -> bool {
        self.enable_commit_author
    }

    pub fn disable_docker(&self) -> bool {
        self.disable_docker
    }

    pub fn enable_information_severity(&self) -> bool {
        self.enable_information_severity
    }

    pub fn enable_owasp_dependency_check(&self) -> bool {
        self.enable_owasp_dependency_check
    }

    pub fn enable_shell_check(&self) -> bool {
        self.enable_shell_check
    }

    pub fn cert_path(&self) -> &str {
        &self.cert_path
    }

    pub fn repository_name(&self) -> &str {
        &self.repository_name
    }

    pub fn risk_accept_hashes(&self) -> &[String] {
        &self.risk_accept_hashes
    }

    pub fn false_positive_hashes(&self) -> &[String] {
        &self.false_positive_hashes
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn tools_config(&self) -> &MapToolConfig {
        &self.tools_config
    }

    pub fn custom_images(&self) -> &CustomImages {
        &self.custom_images
    }

    pub fn container_bind_project_path(&self) -> &str {
        &self.container_bind_project_path
    }

    pub fn custom_rules_path(&self) -> &str {
        &self.custom_rules_path
    }

    pub fn show_vulnerabilities_types(&self) -> &[String] {
        &self.show_vulnerabilities_types
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    pub fn log_file_path(&self) -> &str {
        &self.log_file_path
    }

    /// Whether the analysis monitor gave up waiting.
    pub fn is_timeout(&self) -> bool {
        self.is_timeout.load(Ordering::Relaxed)
    }

    /// Set by the analysis monitor; safe to call while other threads read.
    pub fn set_is_timeout(&self, is_timeout: bool) {
        self.is_timeout.store(is_timeout, Ordering::Relaxed);
    }
}
