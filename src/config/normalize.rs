//! Post-merge normalization and validation.
//!
//! Runs once after the last layer. Every step is a function of the current
//! field values, so running it again on normalized state changes nothing.

use super::state::{ConfigState, DEFAULT_LOG_LEVEL};
use super::types::{canonical_severity, canonical_vulnerability_type};
use crate::error::{ConfigError, ConfigResult};
use crate::format::OutputFormat;
use crate::logging::parse_log_level;
use crate::paths;
use std::path::{Path, PathBuf};

/// Smallest accepted value, in seconds, for every timeout and retry interval.
pub const MIN_TIMEOUT_SECONDS: i64 = 10;

/// File name of the report when json/sonarqube output has no explicit path.
pub const DEFAULT_JSON_OUTPUT_FILE_NAME: &str = "output.json";

/// Normalize paths and defaults, then check every invariant.
pub fn normalize(state: &mut ConfigState, working_dir: &Path) -> ConfigResult<()> {
    state.project_path = paths::absolutize(&state.project_path, working_dir);

    if state.repository_name.is_empty() {
        state.repository_name = paths::dir_name(&state.project_path).unwrap_or_default();
    }

    if state.log_level.trim().is_empty() {
        state.log_level = DEFAULT_LOG_LEVEL.to_string();
    }

    let format = OutputFormat::from_str(&state.print_output_type).ok_or_else(|| {
        ConfigError::validation(format!(
            "print output type {:?} must be one of text, json, sonarqube",
            state.print_output_type
        ))
    })?;
    if !state.print_output_type.is_empty() {
        state.print_output_type = format.as_str().to_string();
    }

    canonicalize(&mut state.severities_to_ignore, canonical_severity);
    canonicalize(
        &mut state.show_vulnerabilities_types,
        canonical_vulnerability_type,
    );

    if format.writes_file() && state.json_output_file_path.is_empty() {
        state.json_output_file_path = path_string(
            state.project_path.join(DEFAULT_JSON_OUTPUT_FILE_NAME),
        );
    } else if !state.json_output_file_path.is_empty() {
        state.json_output_file_path = path_string(paths::absolutize(
            Path::new(&state.json_output_file_path),
            working_dir,
        ));
    }

    validate(state)
}

/// Check invariants without changing anything.
pub fn validate(state: &ConfigState) -> ConfigResult<()> {
    for (name, value) in [
        ("timeout in seconds request", state.timeout_in_seconds_request),
        ("timeout in seconds analysis", state.timeout_in_seconds_analysis),
        ("monitor retry in seconds", state.monitor_retry_in_seconds),
    ] {
        if value < MIN_TIMEOUT_SECONDS {
            return Err(ConfigError::validation(format!(
                "{name} must be at least {MIN_TIMEOUT_SECONDS}, got {value}"
            )));
        }
    }

    if OutputFormat::from_str(&state.print_output_type).is_none() {
        return Err(ConfigError::validation(format!(
            "print output type {:?} must be one of text, json, sonarqube",
            state.print_output_type
        )));
    }

    if !state.repository_authorization.is_empty()
        && uuid::Uuid::parse_str(&state.repository_authorization).is_err()
    {
        return Err(ConfigError::validation(format!(
            "repository authorization {:?} is not a valid UUID",
            state.repository_authorization
        )));
    }

    if state.horusec_api_uri.trim().is_empty() {
        return Err(ConfigError::validation("horusec API URI cannot be empty"));
    }

    if let Some(unknown) = state
        .severities_to_ignore
        .iter()
        .find(|severity| canonical_severity(severity).is_none())
    {
        return Err(ConfigError::validation(format!(
            "unknown severity {unknown:?} in severities to ignore"
        )));
    }

    if let Some(unknown) = state
        .show_vulnerabilities_types
        .iter()
        .find(|kind| canonical_vulnerability_type(kind).is_none())
    {
        return Err(ConfigError::validation(format!(
            "unknown vulnerability type {unknown:?} in show vulnerabilities types"
        )));
    }

    if parse_log_level(&state.log_level).is_none() {
        return Err(ConfigError::validation(format!(
            "unknown log level {:?}",
            state.log_level
        )));
    }

    Ok(())
}

/// Rewrite known names to their canonical spelling; unknown names are left
/// for [`validate`] to reject.
fn canonicalize(names: &mut [String], canonical: fn(&str) -> Option<&'static str>) {
    for name in names.iter_mut() {
        if let Some(known) = canonical(name) {
            *name = known.to_string();
        }
    }
}

fn path_string(path: PathBuf) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn state() -> ConfigState {
        ConfigState::defaults(Path::new("/home/usr/project"))
    }

    #[test]
    fn test_defaults_are_valid() {
        let mut state = state();
        normalize(&mut state, Path::new("/home/usr/project")).unwrap();
        assert_eq!(state.json_output_file_path(), "");
        assert_eq!(state.project_path(), Path::new("/home/usr/project"));
    }

    #[test]
    fn test_timeout_boundary() {
        let mut state = state();
        state.timeout_in_seconds_request = 5;
        let err = validate(&state).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);

        state.timeout_in_seconds_request = 10;
        assert!(validate(&state).is_ok());
    }

    #[test]
    fn test_analysis_and_monitor_minimums() {
        let mut state = state();
        state.timeout_in_seconds_analysis = 9;
        assert!(validate(&state).is_err());

        let mut state = self::state();
        state.monitor_retry_in_seconds = 9;
        assert!(validate(&state).is_err());
    }

    #[test]
    fn test_relative_project_path_is_absolutized() {
        let mut state = state();
        state.project_path = PathBuf::from("./cli");
        normalize(&mut state, Path::new("/home/usr")).unwrap();
        assert_eq!(state.project_path(), Path::new("/home/usr/cli"));
    }

    #[test]
    fn test_json_output_defaults_under_project() {
        let mut state = state();
        state.print_output_type = "json".to_string();
        normalize(&mut state, Path::new("/home/usr")).unwrap();
        assert_eq!(state.json_output_file_path(), "/home/usr/project/output.json");
    }

    #[test]
    fn test_explicit_json_output_is_absolutized() {
        let mut state = state();
        state.print_output_type = "sonarqube".to_string();
        state.json_output_file_path = "./output-sonarqube.json".to_string();
        normalize(&mut state, Path::new("/home/usr")).unwrap();
        assert_eq!(state.json_output_file_path(), "/home/usr/output-sonarqube.json");
    }

    #[test]
    fn test_unknown_output_type() {
        let mut state = state();
        state.print_output_type = "xml".to_string();
        let err = normalize(&mut state, Path::new("/")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    }

    #[test]
    fn test_repository_authorization() {
        let mut state = state();
        state.repository_authorization = "not-a-uuid".to_string();
        assert!(validate(&state).is_err());

        state.repository_authorization = "8beffdca-636e-4d73-a22f-b0f7c3cff1c4".to_string();
        assert!(validate(&state).is_ok());

        state.repository_authorization = String::new();
        assert!(validate(&state).is_ok());
    }

    #[test]
    fn test_vocabularies() {
        let mut state = state();
        state.severities_to_ignore = vec!["info".to_string(), "LOW".to_string()];
        assert!(validate(&state).is_ok());
        state.severities_to_ignore = vec!["TRIVIAL".to_string()];
        assert!(validate(&state).is_err());

        let mut state = self::state();
        state.show_vulnerabilities_types = vec!["Risk Accepted".to_string()];
        assert!(validate(&state).is_ok());
        state.show_vulnerabilities_types = vec!["Ignored".to_string()];
        assert!(validate(&state).is_err());
    }

    #[test]
    fn test_names_are_stored_in_canonical_spelling() {
        let mut state = state();
        state.print_output_type = "JSON".to_string();
        state.severities_to_ignore = vec!["info".to_string(), "High".to_string()];
        state.show_vulnerabilities_types = vec!["risk accepted".to_string()];
        normalize(&mut state, Path::new("/home/usr")).unwrap();

        assert_eq!(state.print_output_type(), "json");
        assert_eq!(state.severities_to_ignore(), ["INFO", "HIGH"]);
        assert_eq!(state.show_vulnerabilities_types(), ["Risk Accepted"]);
    }

    #[test]
    fn test_empty_output_type_stays_empty() {
        let mut state = state();
        normalize(&mut state, Path::new("/home/usr")).unwrap();
        assert_eq!(state.print_output_type(), "");
    }

    #[test]
    fn test_empty_log_level_becomes_info() {
        let mut state = state();
        state.log_level = String::new();
        normalize(&mut state, Path::new("/")).unwrap();
        assert_eq!(state.log_level(), "info");

        state.log_level = "loud".to_string();
        assert!(validate(&state).is_err());
    }

    #[test]
    fn test_repository_name_from_project() {
        let mut state = state();
        state.repository_name = String::new();
        state.project_path = PathBuf::from("/srv/horusec-manager");
        normalize(&mut state, Path::new("/")).unwrap();
        assert_eq!(state.repository_name(), "horusec-manager");
    }

    #[test]
    fn test_normalize_twice_is_stable() {
        let mut state = state();
        state.print_output_type = "json".to_string();
        state.project_path = PathBuf::from("./api");
        normalize(&mut state, Path::new("/home/usr")).unwrap();
        let first = state.to_bytes(false).unwrap();
        normalize(&mut state, Path::new("/home/usr")).unwrap();
        assert_eq!(state.to_bytes(false).unwrap(), first);
    }
}
