use std::str::FromStr;

use serde::{Deserialize, Serialize};

fn default_show_unmatched() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `found: [id] kanji meaning` lines
    #[default]
    Text,
    /// One JSON object per query
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Report primitives nothing recognized when a query has no match
    #[serde(default = "default_show_unmatched")]
    pub show_unmatched: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            show_unmatched: default_show_unmatched(),
        }
    }
}
