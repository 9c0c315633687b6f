use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_NOTIFY_URL};

/// Client configuration, loaded from `~/.cribwatch/config.yaml`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the status backend
    pub base_url: String,
    /// URL of the notification stream
    pub notify_url: String,
    /// Human-readable name reported alongside the push token
    pub device_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: String::from(DEFAULT_BASE_URL),
            notify_url: String::from(DEFAULT_NOTIFY_URL),
            device_name: String::from("cribwatch"),
        }
    }
}

impl Config {
    /// Load config from the default location, falling back to defaults
    pub fn load() -> Config {
        let path = Self::default_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("No config at {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".cribwatch")
            .join("config.yaml")
    }

    /// Join an endpoint path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        assert!(Config::load_from(&dir.path().join("config.yaml")).is_err());
        assert_eq!(Config::default().base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let config = Config {
            base_url: String::from("http://192.168.1.42:3000"),
            notify_url: String::from("ws://192.168.1.42:3000/notify"),
            device_name: String::from("kitchen-tablet"),
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_endpoint_join() {
        let config = Config {
            base_url: String::from("http://localhost:3000/"),
            ..Config::default()
        };
        assert_eq!(config.endpoint("sleepstatus"), "http://localhost:3000/sleepstatus");
        assert_eq!(config.endpoint("/join"), "http://localhost:3000/join");
    }
}
