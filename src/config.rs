use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::clients::jikan::JIKAN_API;
use crate::constants::{self, cache, limits};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub jikan: JikanConfig,

    pub images: ImagesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory holding `manga_collection.json` and `users.json`.
    pub data_dir: String,

    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JikanConfig {
    pub base_url: String,

    /// Request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,

    /// Number of results requested when no limit is given (default: 10)
    pub default_limit: u32,
}

impl Default for JikanConfig {
    fn default() -> Self {
        Self {
            base_url: JIKAN_API.to_string(),
            request_timeout_seconds: 10,
            default_limit: limits::DEFAULT_FETCH_LIMIT,
        }
    }
}

impl JikanConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    pub cache_dir: String,

    /// Cached covers older than this are removed by `cache clean`.
    pub max_age_days: u64,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            cache_dir: "assets/cache".to_string(),
            max_age_days: cache::IMAGE_MAX_AGE_DAYS,
        }
    }
}

impl ImagesConfig {
    #[must_use]
    pub const fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_days * 24 * 60 * 60)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(Self::default_config_path());

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("mangashelf").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".mangashelf").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.data_dir.trim().is_empty() {
            anyhow::bail!("general.data_dir cannot be empty");
        }

        url::Url::parse(&self.jikan.base_url)
            .with_context(|| format!("Invalid Jikan base URL: {}", self.jikan.base_url))?;

        if self.jikan.request_timeout_seconds == 0 {
            anyhow::bail!("jikan.request_timeout_seconds must be > 0");
        }

        Ok(())
    }

    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.general.data_dir)
    }

    #[must_use]
    pub fn collection_path(&self) -> PathBuf {
        self.data_dir().join(constants::COLLECTION_FILENAME)
    }

    #[must_use]
    pub fn users_path(&self) -> PathBuf {
        self.data_dir().join(constants::USERS_FILENAME)
    }

    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        PathBuf::from(&self.images.cache_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.data_dir, "data");
        assert_eq!(config.jikan.base_url, "https://api.jikan.moe/v4");
        assert_eq!(config.jikan.timeout(), Duration::from_secs(10));
        assert_eq!(config.images.max_age(), Duration::from_secs(7 * 24 * 60 * 60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_paths_resolve_under_data_dir() {
        let config = Config::default();
        assert_eq!(
            config.collection_path(),
            PathBuf::from("data").join("manga_collection.json")
        );
        assert_eq!(config.users_path(), PathBuf::from("data").join("users.json"));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[jikan]"));
        assert!(toml_str.contains("[images]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [jikan]
            request_timeout_seconds = 30
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.jikan.request_timeout_seconds, 30);

        assert_eq!(config.general.data_dir, "data");
        assert_eq!(config.images.cache_dir, "assets/cache");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.jikan.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.jikan.request_timeout_seconds = 0;
        assert!(config.validate().is_err());
    }
}
