//! CLI configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "APIARY_CONFIG";

const FORMATS: &[&str] = &["table", "json"];
const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Get default config directory
pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".apiary")
}

/// Location of the config file
pub fn config_file_path() -> PathBuf {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => default_config_dir().join("config.toml"),
    }
}

/// Configuration for the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output format when `--format` is not given
    pub format: String,
    /// Log filter when no `-v`/`-q` flag is given
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: "table".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load from the config file, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    pub fn load_from(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => return Self::default(),
        };
        match toml::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring invalid config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&config_file_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["format", "log_level"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "format" => Some(self.format.clone()),
            "log_level" => Some(self.log_level.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let value = value.to_lowercase();
        match key {
            "format" => {
                if !FORMATS.contains(&value.as_str()) {
                    anyhow::bail!("Invalid format '{}'. Expected one of: {}", value, FORMATS.join(", "));
                }
                self.format = value;
            }
            "log_level" => {
                if !LOG_LEVELS.contains(&value.as_str()) {
                    anyhow::bail!(
                        "Invalid log level '{}'. Expected one of: {}",
                        value,
                        LOG_LEVELS.join(", ")
                    );
                }
                self.log_level = value;
            }
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("format", "JSON").unwrap();
        config.set("log_level", "debug").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path);
        assert_eq!(loaded.format, "json");
        assert_eq!(loaded.log_level, "debug");
    }

    #[test]
    fn test_partial_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        std::fs::write(&path, "format = \"json\"\n").unwrap();
        let config = Config::load_from(&path);
        assert_eq!(config.format, "json");
        assert_eq!(config.log_level, "warn");

        std::fs::write(&path, "format = [").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("format", "csv").is_err());
        assert!(config.set("log_level", "loud").is_err());
        assert!(config.set("colour", "on").is_err());
        assert_eq!(config.get("colour"), None);
    }
}
