//! Scope item collection operations.

use serde::Serialize;
use std::path::Path;

use crate::commands::{Output, read_doc, update_doc};
use crate::models::{Phase, ScopeItem, ScopePriority};
use crate::storage::generate_id;
use crate::{Error, Result};

/// Result of single scope-item commands.
#[derive(Debug, Serialize)]
pub struct ScopeResult {
    pub doc_id: String,
    pub item: ScopeItem,
}

fn scope_line(item: &ScopeItem) -> String {
    let version = item
        .version
        .map(|v| v.label().to_string())
        .unwrap_or_else(|| "Unassigned".to_string());
    let mut line = format!(
        "{}  [{}] [{}]  {}",
        item.id,
        version,
        item.priority.label(),
        item.item
    );
    if !item.description.is_empty() {
        line.push_str(&format!(" — {}", item.description));
    }
    line
}

impl Output for ScopeResult {
    fn to_human(&self) -> String {
        scope_line(&self.item)
    }
}

/// Result of `gw scope list`.
#[derive(Debug, Serialize)]
pub struct ScopeListResult {
    pub doc_id: String,
    pub items: Vec<ScopeItem>,
    pub count: usize,
}

impl Output for ScopeListResult {
    fn to_human(&self) -> String {
        if self.items.is_empty() {
            return "No scope items".to_string();
        }
        self.items
            .iter()
            .map(scope_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn parse_version(value: &str) -> Result<Option<Phase>> {
    if value.trim().eq_ignore_ascii_case("unassigned") {
        return Ok(None);
    }
    Phase::from_label(value)
        .map(Some)
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "Invalid version '{}'. Must be MVP, V1, V2, Future, or unassigned",
                value
            ))
        })
}

fn parse_priority(value: &str) -> Result<ScopePriority> {
    ScopePriority::from_label(value).ok_or_else(|| {
        Error::InvalidInput(format!(
            "Invalid priority '{}'. Must be High, Medium, or Low",
            value
        ))
    })
}

pub fn scope_add(
    repo_path: &Path,
    item: String,
    version: Option<String>,
    priority: Option<String>,
    description: Option<String>,
    doc_id: Option<&str>,
) -> Result<ScopeResult> {
    if item.trim().is_empty() {
        return Err(Error::InvalidInput("Scope item cannot be empty".to_string()));
    }
    let version = match version {
        Some(value) => parse_version(&value)?,
        None => None,
    };
    let priority = match priority {
        Some(value) => parse_priority(&value)?,
        None => ScopePriority::default(),
    };

    let (doc_id, item) = update_doc(repo_path, doc_id, |doc| {
        let item = ScopeItem {
            id: generate_id("gws", &item),
            item: item.clone(),
            description: description.clone().unwrap_or_default(),
            version,
            priority,
        };
        doc.scope.items.push(item.clone());
        Ok(item)
    })?;
    Ok(ScopeResult { doc_id, item })
}

pub fn scope_list(repo_path: &Path, doc_id: Option<&str>) -> Result<ScopeListResult> {
    let doc = read_doc(repo_path, doc_id)?;
    Ok(ScopeListResult {
        doc_id: doc.id,
        count: doc.scope.items.len(),
        items: doc.scope.items,
    })
}

pub fn scope_update(
    repo_path: &Path,
    id: &str,
    item: Option<String>,
    version: Option<String>,
    priority: Option<String>,
    description: Option<String>,
    doc_id: Option<&str>,
) -> Result<ScopeResult> {
    let version = match version {
        Some(value) => Some(parse_version(&value)?),
        None => None,
    };
    let priority = match priority {
        Some(value) => Some(parse_priority(&value)?),
        None => None,
    };

    let (doc_id, item) = update_doc(repo_path, doc_id, |doc| {
        let entry = doc
            .scope
            .items
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        if let Some(item) = item {
            if item.trim().is_empty() {
                return Err(Error::InvalidInput("Scope item cannot be empty".to_string()));
            }
            entry.item = item;
        }
        if let Some(version) = version {
            entry.version = version;
        }
        if let Some(priority) = priority {
            entry.priority = priority;
        }
        if let Some(description) = description {
            entry.description = description;
        }
        Ok(entry.clone())
    })?;
    Ok(ScopeResult { doc_id, item })
}

pub fn scope_remove(repo_path: &Path, id: &str, doc_id: Option<&str>) -> Result<ScopeResult> {
    let (doc_id, item) = update_doc(repo_path, doc_id, |doc| {
        let pos = doc
            .scope
            .items
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        Ok(doc.scope.items.remove(pos))
    })?;
    Ok(ScopeResult { doc_id, item })
}
