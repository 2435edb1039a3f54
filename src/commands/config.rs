//! Configuration commands.

use serde::Serialize;

use crate::commands::Output;
use crate::config::Config;
use crate::Result;

/// Result of `gw config get` / `set`.
#[derive(Debug, Serialize)]
pub struct ConfigValueResult {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Output for ConfigValueResult {
    fn to_human(&self) -> String {
        match &self.value {
            Some(value) => format!("{} = {}", self.key, value),
            None => format!("{} is not set", self.key),
        }
    }
}

/// Result of `gw config list`.
#[derive(Debug, Serialize)]
pub struct ConfigListResult {
    pub config: Config,
}

impl Output for ConfigListResult {
    fn to_human(&self) -> String {
        let entries = [
            ("output", self.config.output.clone()),
            ("language", self.config.language.clone()),
            ("phase", self.config.phase.clone()),
            ("action_log", self.config.action_log.map(|b| b.to_string())),
        ];
        entries
            .iter()
            .map(|(key, value)| match value {
                Some(value) => format!("{} = {}", key, value),
                None => format!("{} = (default)", key),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn config_get(key: &str) -> Result<ConfigValueResult> {
    let config = Config::load()?;
    Ok(ConfigValueResult {
        value: config.get(key)?,
        key: key.to_string(),
    })
}

pub fn config_set(key: &str, value: &str) -> Result<ConfigValueResult> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;
    Ok(ConfigValueResult {
        value: config.get(key)?,
        key: key.to_string(),
    })
}

pub fn config_list() -> Result<ConfigListResult> {
    Ok(ConfigListResult {
        config: Config::load()?,
    })
}
