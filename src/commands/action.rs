//! Action item collection operations.

use serde::Serialize;
use std::path::Path;

use crate::commands::{Output, read_doc, update_doc};
use crate::models::ActionItem;
use crate::storage::generate_id;
use crate::{Error, Result};

/// Result of single action-item commands.
#[derive(Debug, Serialize)]
pub struct ActionResult {
    pub doc_id: String,
    pub action: ActionItem,
}

fn action_line(a: &ActionItem) -> String {
    let marker = if a.completed { "X" } else { " " };
    let mut line = format!("{}  [{}]  {}", a.id, marker, a.text);
    if !a.note.is_empty() {
        line.push_str(&format!("  ({})", a.note));
    }
    line
}

impl Output for ActionResult {
    fn to_human(&self) -> String {
        action_line(&self.action)
    }
}

/// Result of `gw action list`.
#[derive(Debug, Serialize)]
pub struct ActionListResult {
    pub doc_id: String,
    pub actions: Vec<ActionItem>,
    pub count: usize,
    pub completed: usize,
}

impl Output for ActionListResult {
    fn to_human(&self) -> String {
        if self.actions.is_empty() {
            return "No action items logged".to_string();
        }
        self.actions
            .iter()
            .map(action_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn action_add(repo_path: &Path, text: String, doc_id: Option<&str>) -> Result<ActionResult> {
    if text.trim().is_empty() {
        return Err(Error::InvalidInput("Action text cannot be empty".to_string()));
    }

    let (doc_id, action) = update_doc(repo_path, doc_id, |doc| {
        let action = ActionItem {
            id: generate_id("gwx", &text),
            text: text.clone(),
            completed: false,
            note: String::new(),
        };
        doc.actions.push(action.clone());
        Ok(action)
    })?;
    Ok(ActionResult { doc_id, action })
}

/// Mark an action item completed, optionally with a note.
pub fn action_check(
    repo_path: &Path,
    id: &str,
    note: Option<String>,
    doc_id: Option<&str>,
) -> Result<ActionResult> {
    let (doc_id, action) = update_doc(repo_path, doc_id, |doc| {
        let action = doc
            .actions
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        action.completed = true;
        if let Some(note) = &note {
            action.note = note.clone();
        }
        Ok(action.clone())
    })?;
    Ok(ActionResult { doc_id, action })
}

pub fn action_uncheck(repo_path: &Path, id: &str, doc_id: Option<&str>) -> Result<ActionResult> {
    let (doc_id, action) = update_doc(repo_path, doc_id, |doc| {
        let action = doc
            .actions
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        action.completed = false;
        Ok(action.clone())
    })?;
    Ok(ActionResult { doc_id, action })
}

pub fn action_list(repo_path: &Path, doc_id: Option<&str>) -> Result<ActionListResult> {
    let doc = read_doc(repo_path, doc_id)?;
    let completed = doc.actions.iter().filter(|a| a.completed).count();
    Ok(ActionListResult {
        doc_id: doc.id,
        count: doc.actions.len(),
        completed,
        actions: doc.actions,
    })
}

pub fn action_remove(repo_path: &Path, id: &str, doc_id: Option<&str>) -> Result<ActionResult> {
    let (doc_id, action) = update_doc(repo_path, doc_id, |doc| {
        let pos = doc
            .actions
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        Ok(doc.actions.remove(pos))
    })?;
    Ok(ActionResult { doc_id, action })
}
