//! Value types consumed by the configuration state.
//!
//! These mirror the vocabularies the analysis pipeline understands: language
//! identifiers, tool identifiers, per-tool settings, per-language work
//! directories, and the severity / vulnerability-status names.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Severities a finding may carry.
pub const KNOWN_SEVERITIES: &[&str] = &["CRITICAL", "HIGH", "MEDIUM", "LOW", "UNKNOWN", "INFO"];

/// Vulnerability statuses that can be shown in the output.
pub const KNOWN_VULNERABILITY_TYPES: &[&str] =
    &["Vulnerability", "Risk Accepted", "False Positive", "Corrected"];

/// Language identifiers used as keys of the work directory and custom images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    CSharp,
    Dart,
    Elixir,
    Generic,
    Go,
    Hcl,
    Html,
    Java,
    JavaScript,
    Kotlin,
    Leaks,
    Nginx,
    Php,
    Python,
    Ruby,
    Shell,
    Swift,
    TypeScript,
    Yaml,
}

impl Language {
    pub const ALL: [Language; 20] = [
        Language::C,
        Language::CSharp,
        Language::Dart,
        Language::Elixir,
        Language::Generic,
        Language::Go,
        Language::Hcl,
        Language::Html,
        Language::Java,
        Language::JavaScript,
        Language::Kotlin,
        Language::Leaks,
        Language::Nginx,
        Language::Php,
        Language::Python,
        Language::Ruby,
        Language::Shell,
        Language::Swift,
        Language::TypeScript,
        Language::Yaml,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::CSharp => "csharp",
            Language::Dart => "dart",
            Language::Elixir => "elixir",
            Language::Generic => "generic",
            Language::Go => "go",
            Language::Hcl => "hcl",
            Language::Html => "html",
            Language::Java => "java",
            Language::JavaScript => "javascript",
            Language::Kotlin => "kotlin",
            Language::Leaks => "leaks",
            Language::Nginx => "nginx",
            Language::Php => "php",
            Language::Python => "python",
            Language::Ruby => "ruby",
            Language::Shell => "shell",
            Language::Swift => "swift",
            Language::TypeScript => "typescript",
            Language::Yaml => "yaml",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Analysis tool identifiers used as keys of the tools configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tool {
    GoSec,
    SecurityCodeScan,
    Brakeman,
    Safety,
    Bandit,
    NpmAudit,
    YarnAudit,
    SpotBugs,
    HorusecEngine,
    GitLeaks,
    TfSec,
    Semgrep,
    HorusecCsharp,
    HorusecKubernetes,
    HorusecKotlin,
    HorusecJava,
    HorusecLeaks,
    #[serde(rename = "HorusecNodeJS")]
    HorusecNodejs,
    HorusecDart,
    Flawfinder,
    PhpCS,
    ShellCheck,
    Sobelow,
    MixAudit,
    BundlerAudit,
    Checkov,
    DotnetCli,
    Nancy,
    OwaspDependencyCheck,
    Trivy,
}

/// Per-tool settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Skip this tool during analysis.
    #[serde(rename = "istoignore", default)]
    pub is_to_ignore: bool,
}

/// Tool settings keyed by tool.
pub type MapToolConfig = BTreeMap<Tool, ToolConfig>;

/// Custom container images keyed by language.
pub type CustomImages = BTreeMap<Language, String>;

/// Sub-directories of the project to analyse, per language.
///
/// The zero value is an empty map. [`WorkDir::new`] lists every known
/// language with no sub-directories, which is what a fresh configuration
/// starts from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkDir(BTreeMap<Language, Vec<String>>);

impl WorkDir {
    /// Default work directory: every language, no sub-directories.
    pub fn new() -> Self {
        Self(
            Language::ALL
                .iter()
                .map(|language| (*language, Vec::new()))
                .collect(),
        )
    }

    /// Start from the default and overlay the languages named in `entries`.
    pub fn from_entries(entries: BTreeMap<Language, Vec<String>>) -> Self {
        let mut work_dir = Self::new();
        work_dir.0.extend(entries);
        work_dir
    }

    /// Sub-directories configured for a language.
    pub fn paths_for(&self, language: Language) -> &[String] {
        self.0.get(&language).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.0.keys().copied()
    }
}

/// Canonical spelling of a severity name, if known.
pub fn canonical_severity(name: &str) -> Option<&'static str> {
    KNOWN_SEVERITIES
        .iter()
        .copied()
        .find(|known| known.eq_ignore_ascii_case(name.trim()))
}

/// Canonical spelling of a vulnerability status, if known.
pub fn canonical_vulnerability_type(name: &str) -> Option<&'static str> {
    KNOWN_VULNERABILITY_TYPES
        .iter()
        .copied()
        .find(|known| known.eq_ignore_ascii_case(name.trim()))
}
