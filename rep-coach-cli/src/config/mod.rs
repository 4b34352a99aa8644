use anyhow::{Context, Result};
use rep_coach_core::TrackerConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tracker: TrackerConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default = "default_true")]
    pub show_feedback: bool,
}

/// How overlays and summaries are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("Unknown output format: {}", other),
        }
    }
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            show_feedback: default_true(),
        }
    }
}

impl Config {
    /// Get config directory path (~/.rep-coach/)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".rep-coach"))
    }

    /// Get config file path, preferring an explicit override
    pub fn config_file(path_override: Option<&Path>) -> Result<PathBuf> {
        match path_override {
            Some(path) => Ok(path.to_path_buf()),
            None => Ok(Self::config_dir()?.join("config.toml")),
        }
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load(path_override: Option<&Path>) -> Result<Self> {
        let config_file = Self::config_file(path_override)?;

        let mut config = if config_file.exists() {
            let contents = fs::read_to_string(&config_file)
                .with_context(|| format!("Failed to read config file {}", config_file.display()))?;
            toml::from_str::<Config>(&contents).context("Failed to parse config file")?
        } else {
            tracing::info!(path = %config_file.display(), "Config file not found, using defaults");
            Self::default()
        };

        config.tracker = config
            .tracker
            .with_env_overrides()
            .context("Invalid environment override")?;
        config
            .tracker
            .validate()
            .context("Invalid tracker configuration")?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path_override: Option<&Path>) -> Result<PathBuf> {
        let config_file = Self::config_file(path_override)?;
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_file, contents).context("Failed to write config file")?;

        Ok(config_file)
    }
}
