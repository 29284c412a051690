//! Application configuration management.
//!
//! This module handles loading and saving the client configuration, which
//! includes the API base URL override and the last used email address.
//!
//! Configuration is stored at `~/.config/melodica/config.json`. The API
//! base URL can also be supplied via the `MELODICA_API_URL` environment
//! variable (a `.env` file is honored), which takes precedence over the
//! config file.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "melodica";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the API base URL
const API_URL_ENV: &str = "MELODICA_API_URL";

/// Default API base URL for local development
const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_url: Option<String>,
    pub last_email: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file if present (silently ignore if not found)
        let _ = dotenvy::dotenv();

        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Resolve the API base URL: environment variable, then config file,
    /// then the local development default.
    pub fn api_url(&self) -> String {
        std::env::var(API_URL_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding the persisted session file.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_falls_back_to_default() {
        let config = Config::default();
        if std::env::var(API_URL_ENV).is_err() {
            assert_eq!(config.api_url(), DEFAULT_API_URL);
        }
    }

    #[test]
    fn test_api_url_prefers_config_value() {
        if std::env::var(API_URL_ENV).is_ok() {
            return; // environment override wins, nothing to check here
        }
        let config = Config {
            api_url: Some("https://api.melodica.example".to_string()),
            last_email: None,
        };
        assert_eq!(config.api_url(), "https://api.melodica.example");
    }
}
