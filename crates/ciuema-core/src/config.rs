use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::CiuemaError;

/// Top-level configuration, stored at `~/.ciuema/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CiuemaConfig {
    /// Settings for the description generator.
    #[serde(default)]
    pub describe: DescribeConfig,
}

/// Description generator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeConfig {
    /// Whether generated descriptions are offered at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Model name passed to the generation API.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the generation API.
    #[serde(default = "default_api_url")]
    pub api_url: Url,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_url() -> Url {
    Url::parse("https://generativelanguage.googleapis.com/v1beta")
        .expect("static URL is valid")
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for DescribeConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            model: default_model(),
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CiuemaConfig {
    /// Returns the home directory (`~/.ciuema/`).
    pub fn home_dir() -> Result<PathBuf, CiuemaError> {
        let base = dirs::home_dir().ok_or_else(|| CiuemaError::Config {
            message: "could not determine home directory".into(),
        })?;
        Ok(base.join(".ciuema"))
    }

    /// Returns the path to the config file.
    pub fn config_path() -> Result<PathBuf, CiuemaError> {
        Ok(Self::home_dir()?.join("config.toml"))
    }

    /// Returns the path to the database file.
    pub fn db_path() -> Result<PathBuf, CiuemaError> {
        Ok(Self::home_dir()?.join("ciuema.db"))
    }

    /// Load config from the default location, or return defaults if not found.
    pub fn load() -> Result<Self, CiuemaError> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, CiuemaError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CiuemaError::Serialization(e.to_string()))
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<(), CiuemaError> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save config to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), CiuemaError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CiuemaError::Serialization(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Initialize the home directory with default config.
    pub fn init() -> Result<PathBuf, CiuemaError> {
        let home = Self::home_dir()?;
        std::fs::create_dir_all(&home)?;

        let config_path = Self::config_path()?;
        if !config_path.exists() {
            Self::default().save_to(&config_path)?;
        }

        Ok(home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_roundtrip() {
        let config = CiuemaConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: CiuemaConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(config.describe.enabled, deserialized.describe.enabled);
        assert_eq!(config.describe.model, deserialized.describe.model);
        assert_eq!(config.describe.api_url, deserialized.describe.api_url);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: CiuemaConfig = toml::from_str("[describe]\nenabled = false\n").unwrap();
        assert!(!config.describe.enabled);
        assert_eq!(config.describe.model, "gemini-2.5-flash");
        assert_eq!(config.describe.timeout_secs, 30);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: CiuemaConfig = toml::from_str("").unwrap();
        assert!(config.describe.enabled);
    }
}
