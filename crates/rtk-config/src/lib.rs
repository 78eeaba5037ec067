use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::output::{OutputConfig, OutputFormat};

pub mod output;

fn default_log() -> String {
    "warn".to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Invalid(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    /// Log filter used when RUST_LOG is unset
    #[serde(default = "default_log")]
    pub log: String,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log: default_log(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Defaults overridden by `RTK_*` environment variables
    pub fn new() -> Self {
        let log = env::var("RTK_LOG").unwrap_or_else(|_| default_log());

        let format = env::var("RTK_OUTPUT_FORMAT")
            .ok()
            .and_then(|v| v.parse::<OutputFormat>().ok())
            .unwrap_or_default();

        let show_unmatched = env::var("RTK_SHOW_UNMATCHED")
            .ok()
            .and_then(|v| parse_flag(&v))
            .unwrap_or(true);

        Config {
            log,
            output: OutputConfig {
                format,
                show_unmatched,
            },
        }
    }

    /// Read a JSON config file; missing keys take their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
