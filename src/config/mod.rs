//! User configuration for the `gw` CLI.
//!
//! Stored as TOML at `<data root>/config.toml`. All keys are optional
//! preferences; absent keys fall back to built-in defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::storage::get_data_root;
use crate::{Error, Result};

const CONFIG_FILE: &str = "config.toml";

/// Persisted CLI preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default output format: "json" (default) or "human".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Default label language for new documents: "en" or "es".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Default target phase for new documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,

    /// Whether the action log is written. Defaults to true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_log: Option<bool>,
}

impl Config {
    /// Load the config file, returning defaults when it does not exist.
    pub fn load() -> Result<Config> {
        let path = config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Other(format!("Invalid config file {}: {}", path.display(), e)))
    }

    /// Write the config file, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Other(format!("Could not serialize config: {}", e)))?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// True when human-readable output is the configured default.
    pub fn human_output(&self) -> bool {
        self.output.as_deref() == Some("human")
    }

    /// True unless the action log is explicitly disabled.
    pub fn action_log_enabled(&self) -> bool {
        self.action_log.unwrap_or(true)
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match key {
            "output" => Ok(self.output.clone()),
            "language" => Ok(self.language.clone()),
            "phase" => Ok(self.phase.clone()),
            "action_log" => Ok(self.action_log.map(|b| b.to_string())),
            _ => Err(Error::InvalidInput(format!("Unknown config key: {}", key))),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "output" => match value {
                "json" | "human" => self.output = Some(value.to_string()),
                _ => {
                    return Err(Error::InvalidInput(format!(
                        "Invalid output '{}'. Must be json or human",
                        value
                    )));
                }
            },
            "language" => {
                crate::models::Language::from_label(value).ok_or_else(|| {
                    Error::InvalidInput(format!("Invalid language '{}'. Must be en or es", value))
                })?;
                self.language = Some(value.to_string());
            }
            "phase" => {
                crate::models::Phase::from_label(value).ok_or_else(|| {
                    Error::InvalidInput(format!(
                        "Invalid phase '{}'. Must be MVP, V1, V2, or Future",
                        value
                    ))
                })?;
                self.phase = Some(value.to_string());
            }
            "action_log" => {
                let parsed = value.to_lowercase();
                self.action_log = Some(parsed == "true" || parsed == "1" || parsed == "yes");
            }
            _ => return Err(Error::InvalidInput(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }
}

/// Path to the config file under the data root.
pub fn config_path() -> Result<PathBuf> {
    Ok(get_data_root()?.join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.human_output());
        assert!(config.action_log_enabled());
        assert_eq!(config.get("output").unwrap(), None);
    }

    #[test]
    fn test_set_validates_values() {
        let mut config = Config::default();
        config.set("output", "human").unwrap();
        assert!(config.human_output());
        assert!(config.set("output", "xml").is_err());
        assert!(config.set("phase", "Eventually").is_err());
        config.set("phase", "MVP").unwrap();
        assert_eq!(config.get("phase").unwrap(), Some("MVP".to_string()));
        assert!(config.set("bogus", "x").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.set("output", "human").unwrap();
        config.set("language", "es").unwrap();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.output, Some("human".to_string()));
        assert_eq!(back.language, Some("es".to_string()));
    }
}
