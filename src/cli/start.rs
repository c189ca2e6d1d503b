//! Start subcommand for horusec CLI
//!
//! Every flag is optional; only flags passed on the command line overwrite
//! the values resolved from the settings file and the environment.

use crate::config::{ConfigState, FlagOverlay, coerce};
use crate::error::{ConfigError, ConfigResult};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Arguments for the start subcommand
#[derive(Args, Debug, Default)]
pub struct StartArgs {
    /// Path to run an analysis in your project
    #[arg(short = 'p', long, value_name = "PATH")]
    pub project_path: Option<PathBuf>,

    /// Url of the Horusec API
    #[arg(short = 'u', long, value_name = "URL")]
    pub horusec_url: Option<String>,

    /// Timeout in seconds for requests to the Horusec API
    #[arg(short = 'r', long, value_name = "SECONDS")]
    pub request_timeout: Option<i64>,

    /// Timeout in seconds to wait for the analysis to complete
    #[arg(short = 't', long, value_name = "SECONDS")]
    pub analysis_timeout: Option<i64>,

    /// Repository authorization token
    #[arg(short = 'a', long, value_name = "TOKEN")]
    pub authorization: Option<String>,

    /// Interval in seconds between analysis status checks
    #[arg(short = 'm', long, value_name = "SECONDS")]
    pub monitor_retry_count: Option<i64>,

    /// Output format: text, json or sonarqube
    #[arg(short = 'o', long, value_name = "FORMAT")]
    pub output_format: Option<String>,

    /// Comma-separated severities to leave out of the results
    #[arg(short = 's', long, value_name = "LIST", value_delimiter = ',')]
    pub ignore_severity: Option<Vec<String>>,

    /// Report path when the output format is json or sonarqube
    #[arg(short = 'O', long, value_name = "FILE")]
    pub json_output_file: Option<String>,

    /// Comma-separated globs of files or paths to skip
    #[arg(short = 'i', long, value_name = "LIST", value_delimiter = ',')]
    pub ignore: Option<Vec<String>>,

    /// Exit with an error status when vulnerabilities are found
    #[arg(short = 'e', long, num_args = 0..=1, default_missing_value = "true")]
    pub return_error: Option<bool>,

    /// Analyze the whole git history for leaks
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub enable_git_history: Option<bool>,

    /// Skip TLS certificate verification
    #[arg(short = 'S', long, num_args = 0..=1, default_missing_value = "true")]
    pub insecure_skip_verify: Option<bool>,

    /// Path to a custom TLS certificate
    #[arg(short = 'C', long, value_name = "FILE")]
    pub certificate_path: Option<String>,

    /// Look up the commit author of each finding
    #[arg(short = 'G', long, num_args = 0..=1, default_missing_value = "true")]
    pub enable_commit_author: Option<bool>,

    /// Repository name sent with the analysis
    #[arg(short = 'n', long, value_name = "NAME")]
    pub repository_name: Option<String>,

    /// Comma-separated hashes to mark as false positives
    #[arg(short = 'F', long, value_name = "LIST", value_delimiter = ',')]
    pub false_positive: Option<Vec<String>>,

    /// Comma-separated hashes to mark as risk accepted
    #[arg(short = 'R', long, value_name = "LIST", value_delimiter = ',')]
    pub risk_accept: Option<Vec<String>>,

    /// Project path as seen from inside the analysis containers
    #[arg(short = 'P', long, value_name = "PATH")]
    pub container_bind_project_path: Option<String>,

    /// Run only the tools that need no container runtime
    #[arg(short = 'D', long, num_args = 0..=1, default_missing_value = "true")]
    pub disable_docker: Option<bool>,

    /// Path to a custom rules file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub custom_rules_path: Option<String>,

    /// Include findings of information severity
    #[arg(short = 'I', long, num_args = 0..=1, default_missing_value = "true")]
    pub information_severity: Option<bool>,

    /// Comma-separated vulnerability types to show in the output
    #[arg(long, value_name = "LIST", value_delimiter = ',')]
    pub show_vulnerabilities_types: Option<Vec<String>>,

    /// Run OWASP dependency check
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub enable_owasp_dependency_check: Option<bool>,

    /// Run shellcheck
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub enable_shellcheck: Option<bool>,

    /// Extra request headers as a JSON object, e.g. '{"x-auth":"token"}'
    #[arg(long, value_name = "JSON")]
    pub headers: Option<String>,
}

fn trimmed(list: &[String]) -> Vec<String> {
    list.iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl FlagOverlay for StartArgs {
    fn apply(&self, state: &mut ConfigState) -> ConfigResult<()> {
        if let Some(path) = &self.project_path {
            state.project_path = path.clone();
        }
        if let Some(url) = &self.horusec_url {
            state.horusec_api_uri = url.clone();
        }
        if let Some(seconds) = self.request_timeout {
            state.timeout_in_seconds_request = seconds;
        }
        if let Some(seconds) = self.analysis_timeout {
            state.timeout_in_seconds_analysis = seconds;
        }
        if let Some(token) = &self.authorization {
            state.repository_authorization = token.clone();
        }
        if let Some(seconds) = self.monitor_retry_count {
            state.monitor_retry_in_seconds = seconds;
        }
        if let Some(format) = &self.output_format {
            state.print_output_type = format.clone();
        }
        if let Some(severities) = &self.ignore_severity {
            state.severities_to_ignore = trimmed(severities);
        }
        if let Some(path) = &self.json_output_file {
            state.json_output_file_path = path.clone();
        }
        if let Some(globs) = &self.ignore {
            state.files_or_paths_to_ignore = trimmed(globs);
        }
        if let Some(enabled) = self.return_error {
            state.return_error_if_found_vulnerability = enabled;
        }
        if let Some(enabled) = self.enable_git_history {
            state.enable_git_history_analysis = enabled;
        }
        if let Some(enabled) = self.insecure_skip_verify {
            state.cert_insecure_skip_verify = enabled;
        }
        if let Some(path) = &self.certificate_path {
            state.cert_path = path.clone();
        }
        if let Some(enabled) = self.enable_commit_author {
            state.enable_commit_author = enabled;
        }
        if let Some(name) = &self.repository_name {
            state.repository_name = name.clone();
        }
        if let Some(hashes) = &self.false_positive {
            state.false_positive_hashes = trimmed(hashes);
        }
        if let Some(hashes) = &self.risk_accept {
            state.risk_accept_hashes = trimmed(hashes);
        }
        if let Some(path) = &self.container_bind_project_path {
            state.container_bind_project_path = path.clone();
        }
        if let Some(disabled) = self.disable_docker {
            state.disable_docker = disabled;
        }
        if let Some(path) = &self.custom_rules_path {
            state.custom_rules_path = path.clone();
        }
        if let Some(enabled) = self.information_severity {
            state.enable_information_severity = enabled;
        }
        if let Some(kinds) = &self.show_vulnerabilities_types {
            state.show_vulnerabilities_types = trimmed(kinds);
        }
        if let Some(enabled) = self.enable_owasp_dependency_check {
            state.enable_owasp_dependency_check = enabled;
        }
        if let Some(enabled) = self.enable_shellcheck {
            state.enable_shell_check = enabled;
        }
        if let Some(headers) = &self.headers {
            state.headers =
                coerce::to_string_map(headers.as_str()).map_err(|e| e.with_key("--headers"))?;
        }
        Ok(())
    }
}

/// Run the start command against a resolved configuration.
///
/// Fails when the project path is not an existing directory; otherwise
/// writes the resolved configuration to `out` as indented JSON.
pub fn run_start(state: &ConfigState, out: &mut impl Write) -> anyhow::Result<()> {
    let project_path = state.project_path();
    if !project_path.is_dir() {
        return Err(ConfigError::NotADirectory(project_path.to_path_buf()).into());
    }

    info!(
        project = %project_path.display(),
        repository = state.repository_name(),
        output = state.output_format().as_str(),
        config_file = %state.config_file_path().display(),
        "configuration resolved"
    );

    out.write_all(&state.to_bytes(true)?)?;
    writeln!(out)?;
    Ok(())
}
