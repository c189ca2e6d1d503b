//! Report output formats.

use serde::Serialize;

/// Output format for the analysis report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Sonarqube,
}

impl OutputFormat {
    /// Parse a configured output type. An empty value means text.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "sonarqube" => Some(OutputFormat::Sonarqube),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Sonarqube => "sonarqube",
        }
    }

    /// Whether the report is written to a file rather than printed.
    pub fn writes_file(&self) -> bool {
        !matches!(self, OutputFormat::Text)
    }
}
