//! Conversion of raw source values into typed configuration values.
//!
//! Environment variables and flags deliver text; the settings file delivers
//! JSON. Text that stands for a structured value (headers, tools config,
//! custom images, work dir) must itself be a JSON object.

use super::types::{CustomImages, Language, MapToolConfig, WorkDir};
use crate::error::{ConfigError, ConfigResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

/// A value as supplied by a configuration source.
#[derive(Debug, Clone, Copy)]
pub enum RawValue<'a> {
    /// Text from an environment variable or flag.
    Text(&'a str),
    /// A value read from the settings file.
    Json(&'a Value),
}

impl<'a> From<&'a str> for RawValue<'a> {
    fn from(value: &'a str) -> Self {
        RawValue::Text(value)
    }
}

impl<'a> From<&'a String> for RawValue<'a> {
    fn from(value: &'a String) -> Self {
        RawValue::Text(value)
    }
}

impl<'a> From<&'a Value> for RawValue<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::String(text) => RawValue::Text(text),
            other => RawValue::Json(other),
        }
    }
}

pub fn to_string<'a>(raw: impl Into<RawValue<'a>>) -> ConfigResult<String> {
    match raw.into() {
        RawValue::Text(text) => Ok(text.to_string()),
        RawValue::Json(value) => Err(ConfigError::invalid_format(format!(
            "expected a string, got {}",
            json_type(value)
        ))),
    }
}

pub fn to_int64<'a>(raw: impl Into<RawValue<'a>>) -> ConfigResult<i64> {
    match raw.into() {
        RawValue::Text(text) => text.trim().parse::<i64>().map_err(|e| {
            ConfigError::invalid_format(format!("expected an integer, got {text:?}: {e}"))
        }),
        RawValue::Json(Value::Number(number)) => number.as_i64().ok_or_else(|| {
            ConfigError::invalid_format(format!("expected an integer, got {number}"))
        }),
        RawValue::Json(value) => Err(ConfigError::invalid_format(format!(
            "expected an integer, got {}",
            json_type(value)
        ))),
    }
}

pub fn to_bool<'a>(raw: impl Into<RawValue<'a>>) -> ConfigResult<bool> {
    match raw.into() {
        RawValue::Text(text) => match text.trim() {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
            other => Err(ConfigError::invalid_format(format!(
                "expected true or false, got {other:?}"
            ))),
        },
        RawValue::Json(Value::Bool(flag)) => Ok(*flag),
        RawValue::Json(value) => Err(ConfigError::invalid_format(format!(
            "expected a boolean, got {}",
            json_type(value)
        ))),
    }
}

/// Comma-separated text or a JSON array of strings. Elements are trimmed
/// and empty elements dropped; order is kept.
pub fn to_string_list<'a>(raw: impl Into<RawValue<'a>>) -> ConfigResult<Vec<String>> {
    match raw.into() {
        RawValue::Text(text) => Ok(split_list(text.split(','))),
        RawValue::Json(Value::Array(items)) => {
            let mut texts = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(text) => texts.push(text.as_str()),
                    other => {
                        return Err(ConfigError::invalid_format(format!(
                            "expected a list of strings, found {}",
                            json_type(other)
                        )));
                    }
                }
            }
            Ok(split_list(texts.into_iter()))
        }
        RawValue::Json(value) => Err(ConfigError::invalid_format(format!(
            "expected a list of strings, got {}",
            json_type(value)
        ))),
    }
}

/// A JSON object of string to string.
pub fn to_string_map<'a>(raw: impl Into<RawValue<'a>>) -> ConfigResult<BTreeMap<String, String>> {
    let object = to_object(raw.into())?;
    let mut map = BTreeMap::new();
    for (key, value) in object {
        match value {
            Value::String(text) => {
                map.insert(key, text);
            }
            other => {
                return Err(ConfigError::invalid_format(format!(
                    "expected a string value for {key:?}, got {}",
                    json_type(&other)
                )));
            }
        }
    }
    Ok(map)
}

/// A JSON object of language id to image reference.
pub fn to_language_image_map<'a>(raw: impl Into<RawValue<'a>>) -> ConfigResult<CustomImages> {
    from_object(raw.into())
}

/// A JSON object of tool id to tool settings.
pub fn to_tool_config_map<'a>(raw: impl Into<RawValue<'a>>) -> ConfigResult<MapToolConfig> {
    from_object(raw.into())
}

/// A JSON object of language id to sub-directory list, overlaid on the
/// default work directory.
pub fn to_work_dir<'a>(raw: impl Into<RawValue<'a>>) -> ConfigResult<WorkDir> {
    let entries: BTreeMap<Language, Vec<String>> = from_object(raw.into())?;
    Ok(WorkDir::from_entries(entries))
}

fn split_list<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    items
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn to_object(raw: RawValue<'_>) -> ConfigResult<serde_json::Map<String, Value>> {
    let value = match raw {
        RawValue::Text(text) => serde_json::from_str::<Value>(text).map_err(|e| {
            ConfigError::invalid_format(format!("expected a JSON object: {e}"))
        })?,
        RawValue::Json(value) => value.clone(),
    };
    match value {
        Value::Object(object) => Ok(object),
        other => Err(ConfigError::invalid_format(format!(
            "expected a JSON object, got {}",
            json_type(&other)
        ))),
    }
}

fn from_object<T: DeserializeOwned>(raw: RawValue<'_>) -> ConfigResult<T> {
    let object = to_object(raw)?;
    serde_json::from_value(Value::Object(object))
        .map_err(|e| ConfigError::invalid_format(e.to_string()))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::Tool;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_string_list_trims_and_keeps_order() {
        assert_eq!(to_string_list("a, b , c").unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_string_list_drops_empty_elements() {
        assert_eq!(to_string_list(" , hash1,, hash2 ,").unwrap(), vec!["hash1", "hash2"]);
        assert!(to_string_list("").unwrap().is_empty());
    }

    #[test]
    fn test_string_list_from_json_array() {
        let value = json!(["hash1", " hash2 "]);
        assert_eq!(to_string_list(&value).unwrap(), vec!["hash1", "hash2"]);

        let value = json!(["hash1", 2]);
        assert_eq!(to_string_list(&value).unwrap_err().kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_bool() {
        assert!(to_bool("true").unwrap());
        assert!(!to_bool("false").unwrap());
        assert!(to_bool(&json!(true)).unwrap());

        let err = to_bool("notabool").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_int64() {
        assert_eq!(to_int64("99").unwrap(), 99);
        assert_eq!(to_int64(&json!(100)).unwrap(), 100);
        assert_eq!(to_int64(&json!("20")).unwrap(), 20);
        assert_eq!(to_int64("ten").unwrap_err().kind(), ErrorKind::InvalidFormat);
        assert_eq!(to_int64(&json!(1.5)).unwrap_err().kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_string_rejects_non_string_json() {
        assert_eq!(to_string(&json!("x")).unwrap(), "x");
        assert_eq!(to_string(&json!(1)).unwrap_err().kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_string_map() {
        let headers = to_string_map(r#"{"x-auth": "987654321"}"#).unwrap();
        assert_eq!(headers.get("x-auth").map(String::as_str), Some("987654321"));

        let value = json!({"x-headers": "some-other-value"});
        assert_eq!(to_string_map(&value).unwrap().len(), 1);
    }

    #[test]
    fn test_string_map_rejects_malformed() {
        assert!(to_string_map("[1, 2]").is_err());
        assert!(to_string_map(r#"{"x-auth": 1}"#).is_err());
        assert!(to_string_map("not json").is_err());
    }

    #[test]
    fn test_language_image_map() {
        let images = to_language_image_map(r#"{"go": "docker.io/company/go:latest"}"#).unwrap();
        assert_eq!(images[&Language::Go], "docker.io/company/go:latest");

        let err = to_language_image_map(r#"{"cobol": "x"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_tool_config_map() {
        let value = json!({"GoSec": {"istoignore": true}});
        let tools = to_tool_config_map(&value).unwrap();
        assert!(tools[&Tool::GoSec].is_to_ignore);

        assert!(to_tool_config_map(r#"{"NotATool": {}}"#).is_err());
    }

    #[test]
    fn test_work_dir() {
        let work_dir = to_work_dir(r#"{"csharp": ["NetCoreProject"], "javascript": ["views"]}"#)
            .unwrap();
        assert_eq!(work_dir.paths_for(Language::CSharp), ["NetCoreProject"]);
        assert_eq!(work_dir.paths_for(Language::JavaScript), ["views"]);
        assert!(work_dir.paths_for(Language::Go).is_empty());
    }
}
