//! CLI configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Get default config file path
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("paramgraph")
        .join("config.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default output format: table or json
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Log level used when no -v/-q flag is given
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_output_format() -> String {
    "table".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: default_output_format(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load config from `path`, falling back to defaults if it is missing or
    /// cannot be parsed
    pub fn load(path: &Path) -> Self {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        toml::from_str(&contents).unwrap_or_else(|e| {
            eprintln!("Ignoring invalid config file {}: {}", path.display(), e);
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["output_format", "log_level"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "output_format" => Some(self.output_format.clone()),
            "log_level" => Some(self.log_level.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "output_format" => {
                if !matches!(value, "table" | "json") {
                    anyhow::bail!("output_format must be 'table' or 'json'");
                }
                self.output_format = value.to_string();
            }
            "log_level" => {
                if !matches!(value, "error" | "warn" | "info" | "debug" | "trace") {
                    anyhow::bail!("log_level must be one of error, warn, info, debug, trace");
                }
                self.log_level = value.to_string();
            }
            _ => anyhow::bail!(
                "Unknown config key: {} (available: {})",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml"));
        assert_eq!(config.output_format, "table");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("output_format", "json").unwrap();
        config.save(&path).unwrap();

        let loaded = Config::load(&path);
        assert_eq!(loaded.output_format, "json");
        assert_eq!(loaded.get("log_level").as_deref(), Some("warn"));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("output_format", "csv").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert!(config.get("colour").is_none());
    }
}
