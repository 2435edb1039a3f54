//! Edge-case checklist operations.

use serde::Serialize;
use std::path::Path;

use crate::commands::{Output, read_doc, update_doc};
use crate::models::EdgeCase;
use crate::{Error, Result};

/// One row of the edge-case checklist.
#[derive(Debug, Serialize)]
pub struct EdgeCaseRow {
    pub key: String,
    pub label: String,
    pub considered: bool,
    pub notes: String,
}

fn edge_line(row: &EdgeCaseRow) -> String {
    let marker = if row.considered { "x" } else { " " };
    let mut line = format!("[{}] {:<12} {}", marker, row.key, row.label);
    if !row.notes.is_empty() {
        line.push_str(&format!(": {}", row.notes));
    }
    line
}

/// Result of `gw edge consider` / `clear`.
#[derive(Debug, Serialize)]
pub struct EdgeResult {
    pub doc_id: String,
    #[serde(flatten)]
    pub case: EdgeCaseRow,
}

impl Output for EdgeResult {
    fn to_human(&self) -> String {
        edge_line(&self.case)
    }
}

/// Result of `gw edge list`.
#[derive(Debug, Serialize)]
pub struct EdgeListResult {
    pub doc_id: String,
    pub cases: Vec<EdgeCaseRow>,
    pub considered: usize,
}

impl Output for EdgeListResult {
    fn to_human(&self) -> String {
        self.cases
            .iter()
            .map(edge_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn parse_key(key: &str) -> Result<EdgeCase> {
    EdgeCase::from_key(key).ok_or_else(|| {
        Error::InvalidInput(format!(
            "Unknown edge case '{}'. Keys: empty, loading, error, offline, permissions, large_data, concurrent, localization",
            key
        ))
    })
}

fn row(key: EdgeCase, considered: bool, notes: String) -> EdgeCaseRow {
    EdgeCaseRow {
        key: key.key().to_string(),
        label: key.label().to_string(),
        considered,
        notes,
    }
}

/// Mark an edge case as considered, optionally recording notes.
pub fn edge_consider(
    repo_path: &Path,
    key: &str,
    notes: Option<String>,
    doc_id: Option<&str>,
) -> Result<EdgeResult> {
    let key = parse_key(key)?;
    let (doc_id, case) = update_doc(repo_path, doc_id, |doc| {
        let state = doc.edge_cases.entry(key).or_default();
        state.considered = true;
        if let Some(notes) = &notes {
            state.notes = notes.clone();
        }
        Ok(row(key, state.considered, state.notes.clone()))
    })?;
    Ok(EdgeResult { doc_id, case })
}

/// Mark an edge case as not considered and clear its notes.
pub fn edge_clear(repo_path: &Path, key: &str, doc_id: Option<&str>) -> Result<EdgeResult> {
    let key = parse_key(key)?;
    let (doc_id, case) = update_doc(repo_path, doc_id, |doc| {
        let state = doc.edge_cases.entry(key).or_default();
        state.considered = false;
        state.notes = String::new();
        Ok(row(key, false, String::new()))
    })?;
    Ok(EdgeResult { doc_id, case })
}

pub fn edge_list(repo_path: &Path, doc_id: Option<&str>) -> Result<EdgeListResult> {
    let doc = read_doc(repo_path, doc_id)?;
    let cases: Vec<EdgeCaseRow> = EdgeCase::ALL
        .iter()
        .map(|key| {
            let state = doc.edge_case(*key);
            row(*key, state.considered, state.notes)
        })
        .collect();
    let considered = cases.iter().filter(|c| c.considered).count();
    Ok(EdgeListResult {
        doc_id: doc.id,
        cases,
        considered,
    })
}
