use crate::common::error::{EtlError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub curation: CurationConfig,
}

#[derive(Debug, Deserialize)]
pub struct SourceConfig {
    /// Endpoint returning the product catalog as a JSON array of records.
    pub endpoint: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// Root of the landing zone (raw copies).
    pub landing_root: PathBuf,
    /// Root of the curated zone (deduplicated, with derived text columns).
    pub curated_root: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct CurationConfig {
    /// Columns to derive `_tokenize` and `_stemm` features from.
    #[serde(default = "default_text_columns")]
    pub text_columns: Vec<String>,
    /// Dotted-path column names to rewrite before the curated write.
    #[serde(default = "default_renames")]
    pub renames: BTreeMap<String, String>,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self { text_columns: default_text_columns(), renames: default_renames() }
    }
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_text_columns() -> Vec<String> {
    vec!["title".to_string(), "description".to_string()]
}

fn default_renames() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("rating.rate".to_string(), "rating_rate".to_string()),
        ("rating.count".to_string(), "rating_count".to_string()),
    ])
}

impl Config {
    /// Load configuration from a TOML file, defaulting to `config.toml` in the
    /// working directory.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            EtlError::Config(format!(
                "failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.source.endpoint.trim().is_empty() {
            return Err(EtlError::Config("source.endpoint must not be empty".into()));
        }
        if self.storage.landing_root.as_os_str().is_empty() {
            return Err(EtlError::Config("storage.landing_root must not be empty".into()));
        }
        if self.storage.curated_root.as_os_str().is_empty() {
            return Err(EtlError::Config("storage.curated_root must not be empty".into()));
        }
        Ok(())
    }
}
