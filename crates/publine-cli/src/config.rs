//! Configuration loading from TOML files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global configuration for publine
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub pubmed: PubmedConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub default_file: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_file: PathBuf::from("papers.csv"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PubmedConfig {
    pub esearch_url: String,
    pub efetch_url: String,
    pub database: String,
    pub max_results: i64,
    pub request_delay_ms: u64,
}

impl Default for PubmedConfig {
    fn default() -> Self {
        let defaults = publine_pubmed::Config::default();
        Self {
            esearch_url: defaults.esearch_url,
            efetch_url: defaults.efetch_url,
            database: defaults.database,
            max_results: publine_pubmed::Query::DEFAULT_MAX_RESULTS,
            request_delay_ms: defaults.request_delay.as_millis() as u64,
        }
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./publine.toml (current directory)
    /// 2. ~/.config/publine/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("publine.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "publine") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.output.default_file, PathBuf::from("papers.csv"));
        assert_eq!(config.pubmed.database, "pubmed");
        assert_eq!(config.pubmed.max_results, 10);
        assert_eq!(config.pubmed.request_delay_ms, 1000);
        assert!(config.pubmed.esearch_url.ends_with("/esearch.fcgi"));
        assert!(config.pubmed.efetch_url.ends_with("/efetch.fcgi"));
    }

    #[test]
    fn parse_config_toml() {
        let toml = r#"
[output]
default_file = "/tmp/out.csv"

[pubmed]
esearch_url = "http://localhost:8080/esearch.fcgi"
max_results = 250
request_delay_ms = 340
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.output.default_file, PathBuf::from("/tmp/out.csv"));
        assert_eq!(
            config.pubmed.esearch_url,
            "http://localhost:8080/esearch.fcgi"
        );
        assert_eq!(config.pubmed.max_results, 250);
        assert_eq!(config.pubmed.request_delay_ms, 340);
        // Unset keys keep their defaults
        assert_eq!(config.pubmed.database, "pubmed");
        assert!(config.pubmed.efetch_url.starts_with("https://"));
    }

    #[test]
    fn empty_file_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.pubmed.max_results, 10);
    }

    #[test]
    fn unknown_type_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("publine.toml");
        std::fs::write(&path, "[pubmed]\nmax_results = \"ten\"\n").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config file"));
    }

    #[test]
    fn missing_file_is_error() {
        let err = Config::from_file(Path::new("/nonexistent/publine.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read config file"));
    }
}
