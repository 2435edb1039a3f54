//! Assumption collection operations.

use serde::Serialize;
use std::path::Path;

use crate::commands::{Output, read_doc, update_doc};
use crate::models::{Assumption, AssumptionStatus, add_tag};
use crate::storage::generate_id;
use crate::{Error, Result};

/// Result of `gw assumption add` / `update` / `remove`.
#[derive(Debug, Serialize)]
pub struct AssumptionResult {
    pub doc_id: String,
    pub assumption: Assumption,
}

impl Output for AssumptionResult {
    fn to_human(&self) -> String {
        format!(
            "{}  [{}]  {}",
            self.assumption.id,
            self.assumption.status.label(),
            self.assumption.text
        )
    }
}

/// Result of `gw assumption list`.
#[derive(Debug, Serialize)]
pub struct AssumptionListResult {
    pub doc_id: String,
    pub assumptions: Vec<Assumption>,
    pub count: usize,
}

impl Output for AssumptionListResult {
    fn to_human(&self) -> String {
        if self.assumptions.is_empty() {
            return "No assumptions logged".to_string();
        }
        self.assumptions
            .iter()
            .map(|a| {
                let tags = if a.tags.is_empty() {
                    String::new()
                } else {
                    format!("  #{}", a.tags.join(" #"))
                };
                format!("{}  [{}]  {}{}", a.id, a.status.label(), a.text, tags)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn parse_status(value: &str) -> Result<AssumptionStatus> {
    AssumptionStatus::from_label(value).ok_or_else(|| {
        Error::InvalidInput(format!(
            "Invalid status '{}'. Must be Unvalidated, Needs Research, Validated, or Disproven",
            value
        ))
    })
}

pub fn assumption_add(
    repo_path: &Path,
    text: String,
    status: Option<String>,
    tags: Vec<String>,
    doc_id: Option<&str>,
) -> Result<AssumptionResult> {
    if text.trim().is_empty() {
        return Err(Error::InvalidInput("Assumption text cannot be empty".to_string()));
    }
    let status = match status {
        Some(value) => parse_status(&value)?,
        None => AssumptionStatus::default(),
    };

    let (doc_id, assumption) = update_doc(repo_path, doc_id, |doc| {
        let mut assumption = Assumption {
            id: generate_id("gwa", &text),
            text: text.clone(),
            status,
            tags: Vec::new(),
        };
        for tag in &tags {
            add_tag(&mut assumption.tags, tag);
        }
        doc.assumptions.push(assumption.clone());
        Ok(assumption)
    })?;
    Ok(AssumptionResult { doc_id, assumption })
}

pub fn assumption_list(repo_path: &Path, doc_id: Option<&str>) -> Result<AssumptionListResult> {
    let doc = read_doc(repo_path, doc_id)?;
    Ok(AssumptionListResult {
        doc_id: doc.id,
        count: doc.assumptions.len(),
        assumptions: doc.assumptions,
    })
}

pub fn assumption_update(
    repo_path: &Path,
    id: &str,
    text: Option<String>,
    status: Option<String>,
    add_tags: Vec<String>,
    doc_id: Option<&str>,
) -> Result<AssumptionResult> {
    let status = match status {
        Some(value) => Some(parse_status(&value)?),
        None => None,
    };

    let (doc_id, assumption) = update_doc(repo_path, doc_id, |doc| {
        let assumption = doc
            .assumptions
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        if let Some(text) = text {
            if text.trim().is_empty() {
                return Err(Error::InvalidInput(
                    "Assumption text cannot be empty".to_string(),
                ));
            }
            assumption.text = text;
        }
        if let Some(status) = status {
            assumption.status = status;
        }
        for tag in &add_tags {
            add_tag(&mut assumption.tags, tag);
        }
        Ok(assumption.clone())
    })?;
    Ok(AssumptionResult { doc_id, assumption })
}

pub fn assumption_remove(
    repo_path: &Path,
    id: &str,
    doc_id: Option<&str>,
) -> Result<AssumptionResult> {
    let (doc_id, assumption) = update_doc(repo_path, doc_id, |doc| {
        let pos = doc
            .assumptions
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        Ok(doc.assumptions.remove(pos))
    })?;
    Ok(AssumptionResult { doc_id, assumption })
}
