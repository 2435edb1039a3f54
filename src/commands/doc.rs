//! Document CRUD operations and the active-document pointer.

use serde::Serialize;
use std::path::Path;

use crate::commands::Output;
use crate::config::Config;
use crate::models::{AnalysisDocument, Language, Phase};
use crate::score;
use crate::storage::{Store, generate_id};
use crate::{Error, Result};

/// One row in `gw doc list`.
#[derive(Debug, Serialize)]
pub struct DocSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    pub score: u8,
    pub active: bool,
    pub updated_at: String,
}

/// Result of `gw doc create`.
#[derive(Debug, Serialize)]
pub struct DocCreateResult {
    pub id: String,
    pub name: String,
    pub active: bool,
}

impl Output for DocCreateResult {
    fn to_human(&self) -> String {
        format!("Created document {} \"{}\" (now active)", self.id, self.name)
    }
}

/// Result of `gw doc list`.
#[derive(Debug, Serialize)]
pub struct DocListResult {
    pub documents: Vec<DocSummary>,
    pub count: usize,
}

impl Output for DocListResult {
    fn to_human(&self) -> String {
        if self.documents.is_empty() {
            return "No documents".to_string();
        }
        let mut lines = Vec::new();
        for doc in &self.documents {
            let marker = if doc.active { "*" } else { " " };
            let phase = doc.phase.as_deref().unwrap_or("-");
            lines.push(format!(
                "{} {}  {:>3}%  [{}]  {}",
                marker, doc.id, doc.score, phase, doc.name
            ));
        }
        lines.join("\n")
    }
}

/// Result of `gw doc show`.
#[derive(Debug, Serialize)]
pub struct DocShowResult {
    pub document: AnalysisDocument,
    pub score: u8,
}

impl Output for DocShowResult {
    fn to_human(&self) -> String {
        let doc = &self.document;
        let mut lines = vec![format!("{}  \"{}\"  ({}%)", doc.id, doc.name, self.score)];
        if let Some(phase) = doc.phase {
            lines.push(format!("Phase: {}", phase));
        }
        if !doc.jira_ticket.is_empty() {
            lines.push(format!("Ticket: {}", doc.jira_ticket));
        }
        lines.push(format!(
            "Assumptions: {}  Questions: {}  Actions: {}  Scope items: {}",
            doc.assumptions.len(),
            doc.questions.len(),
            doc.actions.len(),
            doc.scope.items.len()
        ));
        lines.push(format!("Updated: {}", doc.updated_at.to_rfc3339()));
        lines.join("\n")
    }
}

/// Result of `gw doc open`.
#[derive(Debug, Serialize)]
pub struct DocOpenResult {
    pub id: String,
    pub name: String,
}

impl Output for DocOpenResult {
    fn to_human(&self) -> String {
        format!("Active document is now {} \"{}\"", self.id, self.name)
    }
}

/// Result of `gw doc update`.
#[derive(Debug, Serialize)]
pub struct DocUpdateResult {
    pub id: String,
    pub name: String,
}

impl Output for DocUpdateResult {
    fn to_human(&self) -> String {
        format!("Updated document {} \"{}\"", self.id, self.name)
    }
}

/// Result of `gw doc delete`.
#[derive(Debug, Serialize)]
pub struct DocDeleteResult {
    pub id: String,
    pub name: String,
    pub deleted: bool,
}

impl Output for DocDeleteResult {
    fn to_human(&self) -> String {
        format!("Deleted document {} \"{}\"", self.id, self.name)
    }
}

fn parse_phase(value: &str) -> Result<Phase> {
    Phase::from_label(value).ok_or_else(|| {
        Error::InvalidInput(format!(
            "Invalid phase '{}'. Must be MVP, V1, V2, or Future",
            value
        ))
    })
}

fn parse_language(value: &str) -> Result<Language> {
    Language::from_label(value).ok_or_else(|| {
        Error::InvalidInput(format!("Invalid language '{}'. Must be en or es", value))
    })
}

/// Create a blank document. It becomes the active document.
///
/// Config defaults for phase and language apply when the flags are absent.
pub fn doc_create(
    repo_path: &Path,
    name: String,
    phase: Option<String>,
    ticket: Option<String>,
    language: Option<String>,
    secure: bool,
) -> Result<DocCreateResult> {
    if name.trim().is_empty() {
        return Err(Error::InvalidInput("Document name cannot be empty".to_string()));
    }

    let config = Config::load().unwrap_or_default();
    let phase = match phase.or(config.phase) {
        Some(value) => Some(parse_phase(&value)?),
        None => None,
    };
    let language = match language.or(config.language) {
        Some(value) => parse_language(&value)?,
        None => Language::default(),
    };

    let mut store = Store::open(repo_path)?;
    let mut id = generate_id("gw", &name);
    // Re-mint on the rare id collision.
    while store.get(&id).is_some() {
        id = generate_id("gw", &name);
    }

    let mut doc = AnalysisDocument::new(id.clone(), name.clone());
    doc.phase = phase;
    doc.jira_ticket = ticket.unwrap_or_default();
    doc.language = language;
    doc.secure = secure;
    store.put(doc)?;
    store.set_active(Some(id.clone()))?;

    Ok(DocCreateResult {
        id,
        name,
        active: true,
    })
}

/// List all documents in first-created order.
pub fn doc_list(repo_path: &Path) -> Result<DocListResult> {
    let store = Store::open(repo_path)?;
    let documents: Vec<DocSummary> = store
        .documents()
        .map(|doc| DocSummary {
            id: doc.id.clone(),
            name: doc.name.clone(),
            phase: doc.phase.map(|p| p.label().to_string()),
            score: score::score(doc),
            active: store.active_id() == Some(doc.id.as_str()),
            updated_at: doc.updated_at.to_rfc3339(),
        })
        .collect();
    let count = documents.len();
    Ok(DocListResult { documents, count })
}

/// Show a full document.
pub fn doc_show(repo_path: &Path, id: Option<&str>) -> Result<DocShowResult> {
    let store = Store::open(repo_path)?;
    let id = store.resolve(id)?;
    let document = store
        .get(&id)
        .ok_or_else(|| Error::NotFound(id.clone()))?
        .clone();
    let score = score::score(&document);
    Ok(DocShowResult { document, score })
}

/// Set the active document.
pub fn doc_open(repo_path: &Path, id: &str) -> Result<DocOpenResult> {
    let mut store = Store::open(repo_path)?;
    let name = store
        .get(id)
        .ok_or_else(|| Error::NotFound(id.to_string()))?
        .name
        .clone();
    store.set_active(Some(id.to_string()))?;
    Ok(DocOpenResult {
        id: id.to_string(),
        name,
    })
}

/// Update document metadata.
#[allow(clippy::too_many_arguments)]
pub fn doc_update(
    repo_path: &Path,
    id: Option<&str>,
    name: Option<String>,
    phase: Option<String>,
    ticket: Option<String>,
    language: Option<String>,
    secure: bool,
    no_secure: bool,
) -> Result<DocUpdateResult> {
    let phase = match phase {
        Some(value) if value.trim().is_empty() => Some(None),
        Some(value) => Some(Some(parse_phase(&value)?)),
        None => None,
    };
    let language = match language {
        Some(value) => Some(parse_language(&value)?),
        None => None,
    };

    let mut store = Store::open(repo_path)?;
    let id = store.resolve(id)?;
    let mut doc = store
        .get(&id)
        .ok_or_else(|| Error::NotFound(id.clone()))?
        .clone();

    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(Error::InvalidInput("Document name cannot be empty".to_string()));
        }
        doc.name = name;
    }
    if let Some(phase) = phase {
        doc.phase = phase;
    }
    if let Some(ticket) = ticket {
        doc.jira_ticket = ticket;
    }
    if let Some(language) = language {
        doc.language = language;
    }
    if secure {
        doc.secure = true;
    } else if no_secure {
        doc.secure = false;
    }

    doc.touch();
    let name = doc.name.clone();
    store.put(doc)?;
    Ok(DocUpdateResult { id, name })
}

/// Delete a document. Requires an explicit id.
pub fn doc_delete(repo_path: &Path, id: &str) -> Result<DocDeleteResult> {
    let mut store = Store::open(repo_path)?;
    let doc = store.remove(id)?;
    Ok(DocDeleteResult {
        id: doc.id,
        name: doc.name,
        deleted: true,
    })
}
