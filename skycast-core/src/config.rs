use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::Unit;

/// Consulted when the config file carries no key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

fn default_city() -> String {
    "New York".to_string()
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeather API key.
    pub api_key: Option<String>,

    /// Preferred measurement system.
    #[serde(default)]
    pub units: Unit,

    /// City fetched when an interactive session starts.
    #[serde(default = "default_city")]
    pub default_city: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            units: Unit::default(),
            default_city: default_city(),
        }
    }
}

impl Config {
    /// API key from the config file, falling back to the environment.
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Some(key) = self.api_key.as_ref().filter(|key| !key.is_empty()) {
            return Ok(key.clone());
        }

        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No API key configured.\n\
                     Hint: run `skycast configure` and enter your OpenWeather API key,\n\
                     or set the {API_KEY_ENV} environment variable."
                )
            })
    }

    pub fn set_api_key(&mut self, key: String) {
        self.api_key = Some(key);
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_new_york_metric() {
        let cfg = Config::default();
        assert_eq!(cfg.units, Unit::Metric);
        assert_eq!(cfg.default_city, "New York");
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn empty_file_parses_to_defaults() {
        let cfg: Config = toml::from_str("").expect("empty config must parse");
        assert_eq!(cfg.default_city, "New York");
        assert_eq!(cfg.units, Unit::Metric);
    }

    #[test]
    fn full_file_parses() {
        let cfg: Config = toml::from_str(
            "api_key = \"KEY\"\nunits = \"imperial\"\ndefault_city = \"Oslo\"\n",
        )
        .unwrap();
        assert_eq!(cfg.api_key.as_deref(), Some("KEY"));
        assert_eq!(cfg.units, Unit::Imperial);
        assert_eq!(cfg.default_city, "Oslo");
    }

    #[test]
    fn configured_key_wins() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        let key = cfg.resolve_api_key().expect("key must resolve");
        assert_eq!(key, "KEY");
    }

    #[test]
    fn empty_configured_key_is_ignored() {
        let mut cfg = Config::default();
        cfg.set_api_key(String::new());
        // Falls through to the environment; either way it never yields "".
        if let Ok(key) = cfg.resolve_api_key() {
            assert!(!key.is_empty());
        }
    }
}
