//! Static binding table from environment variable to configuration field.
//!
//! Each entry names one variable, how to coerce a raw value into its field,
//! and how to read the field back as a settings-file value. The file and
//! environment passes both walk this table; the settings key is derived from
//! the variable name.

use super::coerce::{self, RawValue};
use super::env::*;
use super::state::ConfigState;
use crate::error::ConfigResult;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

type Apply = fn(&mut ConfigState, RawValue<'_>) -> ConfigResult<()>;
type Read = fn(&ConfigState) -> Value;

/// One environment variable bound to one field.
pub struct Binding {
    /// Environment variable name.
    pub env: &'static str,
    apply: Apply,
    read: Read,
}

impl Binding {
    /// Settings-file key for this field.
    pub fn settings_key(&self) -> String {
        settings_key(self.env)
    }

    /// Coerce `raw` and overwrite the field. Errors name `source_key`, the
    /// variable or settings key the value came from.
    pub fn apply(
        &self,
        state: &mut ConfigState,
        raw: RawValue<'_>,
        source_key: &str,
    ) -> ConfigResult<()> {
        (self.apply)(state, raw).map_err(|e| e.with_key(source_key))
    }

    /// Current field value in settings-file form.
    pub fn read(&self, state: &ConfigState) -> Value {
        (self.read)(state)
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding").field("env", &self.env).finish()
    }
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Every variable the file and environment passes know about.
pub static BINDINGS: &[Binding] = &[
    Binding {
        env: ENV_HORUSEC_API_URI,
        apply: |c, v| {
            c.horusec_api_uri = coerce::to_string(v)?;
            Ok(())
        },
        read: |c| to_json(&c.horusec_api_uri),
    },
    Binding {
        env: ENV_TIMEOUT_IN_SECONDS_REQUEST,
        apply: |c, v| {
            c.timeout_in_seconds_request = coerce::to_int64(v)?;
            Ok(())
        },
        read: |c| to_json(&c.timeout_in_seconds_request),
    },
    Binding {
        env: ENV_TIMEOUT_IN_SECONDS_ANALYSIS,
        apply: |c, v| {
            c.timeout_in_seconds_analysis = coerce::to_int64(v)?;
            Ok(())
        },
        read: |c| to_json(&c.timeout_in_seconds_analysis),
    },
    Binding {
        env: ENV_MONITOR_RETRY_IN_SECONDS,
        apply: |c, v| {
            c.monitor_retry_in_seconds = coerce::to_int64(v)?;
            Ok(())
        },
        read: |c| to_json(&c.monitor_retry_in_seconds),
    },
    Binding {
        env: ENV_REPOSITORY_AUTHORIZATION,
        apply: |c, v| {
            c.repository_authorization = coerce::to_string(v)?;
            Ok(())
        },
        read: |c| to_json(&c.repository_authorization),
    },
    Binding {
        env: ENV_PRINT_OUTPUT_TYPE,
        apply: |c, v| {
            c.print_output_type = coerce::to_string(v)?;
            Ok(())
        },
        read: |c| to_json(&c.print_output_type),
    },
    Binding {
        env: ENV_JSON_OUTPUT_FILE_PATH,
        apply: |c, v| {
            c.json_output_file_path = coerce::to_string(v)?;
            Ok(())
        },
        read: |c| to_json(&c.json_output_file_path),
    },
    Binding {
        env: ENV_SEVERITIES_TO_IGNORE,
        apply: |c, v| {
            c.severities_to_ignore = coerce::to_string_list(v)?;
            Ok(())
        },
        read: |c| to_json(&c.severities_to_ignore),
    },
    Binding {
        env: ENV_FILES_OR_PATHS_TO_IGNORE,
        apply: |c, v| {
            c.files_or_paths_to_ignore = coerce::to_string_list(v)?;
            Ok(())
        },
        read: |c| to_json(&c.files_or_paths_to_ignore),
    },
    Binding {
        env: ENV_RETURN_ERROR_IF_FOUND_VULNERABILITY,
        apply: |c, v| {
            c.return_error_if_found_vulnerability = coerce::to_bool(v)?;
            Ok(())
        },
        read: |c| to_json(&c.return_error_if_found_vulnerability),
    },
    Binding {
        env: ENV_PROJECT_PATH,
        apply: |c, v| {
            c.project_path = PathBuf::from(coerce::to_string(v)?);
            Ok(())
        },
        read: |c| to_json(&c.project_path),
    },
    Binding {
        env: ENV_WORK_DIR,
        apply: |c, v| {
            c.work_dir = coerce::to_work_dir(v)?;
            Ok(())
        },
        read: |c| to_json(&c.work_dir),
    },
    Binding {
        env: ENV_ENABLE_GIT_HISTORY_ANALYSIS,
        apply: |c, v| {
            c.enable_git_history_analysis = coerce::to_bool(v)?;
            Ok(())
        },
        read: |c| to_json(&c.enable_git_history_analysis),
    },
    Binding {
        env: ENV_CERT_INSECURE_SKIP_VERIFY,
        apply: |c, v| {
            c.cert_insecure_skip_verify = coerce::to_bool(v)?;
            Ok(())
        },
        read: |c| to_json(&c.cert_insecure_skip_verify),
    },
    Binding {
        env: ENV_CERT_PATH,
        apply: |c, v| {
            c.cert_path = coerce::to_string(v)?;
            Ok(())
        },
        read: |c| to_json(&c.cert_path),
    },
    Binding {
        env: ENV_ENABLE_COMMIT_AUTHOR,
        apply: |c, v| {
            c.enable_commit_author = coerce::to_bool(v)?;
            Ok(())
        },
        read: |c| to_json(&c.enable_commit_author),
    },
    Binding {
        env: ENV_REPOSITORY_NAME,
        apply: |c, v| {
            c.repository_name = coerce::to_string(v)?;
            Ok(())
        },
        read: |c| to_json(&c.repository_name),
    },
    Binding {
        env: ENV_FALSE_POSITIVE_HASHES,
        apply: |c, v| {
            c.false_positive_hashes = coerce::to_string_list(v)?;
            Ok(())
        },
        read: |c| to_json(&c.false_positive_hashes),
    },
    Binding {
        env: ENV_RISK_ACCEPT_HASHES,
        apply: |c, v| {
            c.risk_accept_hashes = coerce::to_string_list(v)?;
            Ok(())
        },
        read: |c| to_json(&c.risk_accept_hashes),
    },
    Binding {
        env: ENV_TOOLS_CONFIG,
        apply: |c, v| {
            c.tools_config = coerce::to_tool_config_map(v)?;
            Ok(())
        },
        read: |c| to_json(&c.tools_config),
    },
    Binding {
        env: ENV_HEADERS,
        apply: |c, v| {
            c.headers = coerce::to_string_map(v)?;
            Ok(())
        },
        read: |c| to_json(&c.headers),
    },
    Binding {
        env: ENV_CONTAINER_BIND_PROJECT_PATH,
        apply: |c, v| {
            c.container_bind_project_path = coerce::to_string(v)?;
            Ok(())
        },
        read: |c| to_json(&c.container_bind_project_path),
    },
    Binding {
        env: ENV_DISABLE_DOCKER,
        apply: |c, v| {
            c.disable_docker = coerce::to_bool(v)?;
            Ok(())
        },
        read: |c| to_json(&c.disable_docker),
    },
    Binding {
        env: ENV_CUSTOM_RULES_PATH,
        apply: |c, v| {
            c.custom_rules_path = coerce::to_string(v)?;
            Ok(())
        },
        read: |c| to_json(&c.custom_rules_path),
    },
    Binding {
        env: ENV_ENABLE_INFORMATION_SEVERITY,
        apply: |c, v| {
            c.enable_information_severity = coerce::to_bool(v)?;
            Ok(())
        },
        read: |c| to_json(&c.enable_information_severity),
    },
    Binding {
        env: ENV_CUSTOM_IMAGES,
        apply: |c, v| {
            c.custom_images = coerce::to_language_image_map(v)?;
            Ok(())
        },
        read: |c| to_json(&c.custom_images),
    },
    Binding {
        env: ENV_SHOW_VULNERABILITIES_TYPES,
        apply: |c, v| {
            c.show_vulnerabilities_types = coerce::to_string_list(v)?;
            Ok(())
        },
        read: |c| to_json(&c.show_vulnerabilities_types),
    },
    Binding {
        env: ENV_ENABLE_OWASP_DEPENDENCY_CHECK,
        apply: |c, v| {
            c.enable_owasp_dependency_check = coerce::to_bool(v)?;
            Ok(())
        },
        read: |c| to_json(&c.enable_owasp_dependency_check),
    },
    Binding {
        env: ENV_ENABLE_SHELLCHECK,
        apply: |c, v| {
            c.enable_shell_check = coerce::to_bool(v)?;
            Ok(())
        },
        read: |c| to_json(&c.enable_shell_check),
    },
    Binding {
        env: ENV_LOG_LEVEL,
        apply: |c, v| {
            c.log_level = coerce::to_string(v)?;
            Ok(())
        },
        read: |c| to_json(&c.log_level),
    },
    Binding {
        env: ENV_LOG_FILE_PATH,
        apply: |c, v| {
            c.log_file_path = coerce::to_string(v)?;
            Ok(())
        },
        read: |c| to_json(&c.log_file_path),
    },
];

/// Binding for a variable name, if it is one of ours.
pub fn binding(env: &str) -> Option<&'static Binding> {
    BINDINGS.iter().find(|binding| binding.env == env)
}

/// Current state keyed by settings key, in table order.
pub fn to_settings_map(state: &ConfigState) -> serde_json::Map<String, Value> {
    BINDINGS
        .iter()
        .map(|binding| (binding.settings_key(), binding.read(state)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashSet;
    use std::path::Path;

    #[test]
    fn test_settings_keys_are_unique() {
        let keys: HashSet<String> = BINDINGS.iter().map(Binding::settings_key).collect();
        assert_eq!(keys.len(), BINDINGS.len());
    }

    #[test]
    fn test_every_key_has_prefix() {
        for binding in BINDINGS {
            assert!(binding.env.starts_with(ENV_PREFIX), "{}", binding.env);
            assert!(binding.settings_key().starts_with(KEY_PREFIX), "{}", binding.env);
        }
    }

    #[test]
    fn test_apply_reports_variable_name() {
        let mut state = ConfigState::defaults(Path::new("/tmp"));
        let err = binding(ENV_TIMEOUT_IN_SECONDS_REQUEST)
            .unwrap()
            .apply(
                &mut state,
                RawValue::Text("soon"),
                ENV_TIMEOUT_IN_SECONDS_REQUEST,
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        assert!(err.to_string().contains(ENV_TIMEOUT_IN_SECONDS_REQUEST));
        assert_eq!(state.timeout_in_seconds_request(), 300);
    }

    #[test]
    fn test_read_back_through_apply() {
        let mut source = ConfigState::defaults(Path::new("/tmp"));
        source.headers.insert("x-auth".to_string(), "token".to_string());
        source.enable_shell_check = true;

        let settings = to_settings_map(&source);
        let mut target = ConfigState::defaults(Path::new("/srv"));
        for binding in BINDINGS {
            let key = binding.settings_key();
            binding
                .apply(&mut target, RawValue::from(&settings[&key]), &key)
                .unwrap();
        }
        assert_eq!(target.headers(), source.headers());
        assert!(target.enable_shell_check());
        assert_eq!(target.project_path(), Path::new("/tmp"));
    }
}
