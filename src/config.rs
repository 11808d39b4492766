//! TOML configuration for the `vsearch` CLI.
//!
//! Every section is optional; missing values fall back to the defaults
//! below. See `config/vsearch.example.toml` for a full example.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use visibility_search_core::paginate::{DEFAULT_MAX_RESULTS, DEFAULT_PAGE_SIZE};
use visibility_search_core::preset::PRESETS_KEY;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub records: RecordsConfig,
    #[serde(default)]
    pub results: ResultsConfig,
    #[serde(default)]
    pub presets: PresetsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecordsConfig {
    /// JSON file holding the record list.
    #[serde(default = "default_records_path")]
    pub path: PathBuf,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            path: default_records_path(),
        }
    }
}

fn default_records_path() -> PathBuf {
    PathBuf::from("./data/records.json")
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResultsConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Cap applied to the match list before pagination.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_results: default_max_results(),
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}
fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

#[derive(Debug, Deserialize, Clone)]
pub struct PresetsConfig {
    /// JSON key-value file the presets are persisted in.
    #[serde(default = "default_presets_path")]
    pub path: PathBuf,
    #[serde(default = "default_presets_key")]
    pub key: String,
}

impl Default for PresetsConfig {
    fn default() -> Self {
        Self {
            path: default_presets_path(),
            key: default_presets_key(),
        }
    }
}

fn default_presets_path() -> PathBuf {
    PathBuf::from("./data/presets.json")
}
fn default_presets_key() -> String {
    PRESETS_KEY.to_string()
}

impl Config {
    /// Defaults for every section, used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.results.page_size == 0 {
        anyhow::bail!("results.page_size must be >= 1");
    }
    if config.results.max_results == 0 {
        anyhow::bail!("results.max_results must be >= 1");
    }
    if config.presets.key.trim().is_empty() {
        anyhow::bail!("presets.key must not be empty");
    }

    Ok(config)
}
