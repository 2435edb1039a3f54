//! System commands: initialization and build info.

use serde::Serialize;
use std::path::Path;

use crate::cli;
use crate::commands::Output;
use crate::storage::{Store, get_storage_dir};
use crate::Result;

/// Result of `gw system init`.
#[derive(Debug, Serialize)]
pub struct InitResult {
    pub status: String,
    pub storage_path: String,
}

impl Output for InitResult {
    fn to_human(&self) -> String {
        match self.status.as_str() {
            "already_initialized" => format!("Already initialized at {}", self.storage_path),
            _ => format!("Initialized Groundwork storage at {}", self.storage_path),
        }
    }
}

/// Initialize storage for the repository. Idempotent.
pub fn system_init(repo_path: &Path) -> Result<InitResult> {
    let already = Store::exists(repo_path)?;
    Store::init(repo_path)?;
    Ok(InitResult {
        status: if already {
            "already_initialized".to_string()
        } else {
            "initialized".to_string()
        },
        storage_path: get_storage_dir(repo_path)?.display().to_string(),
    })
}

/// Result of `gw system build-info`.
#[derive(Debug, Serialize)]
pub struct BuildInfoResult {
    pub version: String,
    pub commit: String,
    pub built: String,
}

impl Output for BuildInfoResult {
    fn to_human(&self) -> String {
        format!(
            "gw {} ({}, built {})",
            self.version, self.commit, self.built
        )
    }
}

pub fn build_info() -> Result<BuildInfoResult> {
    Ok(BuildInfoResult {
        version: cli::package_version().to_string(),
        commit: cli::git_commit().to_string(),
        built: cli::build_timestamp().to_string(),
    })
}
