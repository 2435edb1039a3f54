//! Text-format transfer commands: status, export, import, and ingest.

use serde::Serialize;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::codec;
use crate::commands::{Output, read_doc};
use crate::intake::ExtractedFields;
use crate::merge::{MergeMode, MergePolicy, merge};
use crate::score;
use crate::storage::Store;
use crate::{Error, Result};

/// Result of `gw status`.
#[derive(Debug, Serialize)]
pub struct StatusResult {
    pub id: String,
    pub name: String,
    pub score: u8,
    pub filled: usize,
    pub total: usize,
    pub missing: Vec<String>,
}

impl Output for StatusResult {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "{} \"{}\": {}% complete ({}/{} slots)",
            self.id, self.name, self.score, self.filled, self.total
        )];
        if !self.missing.is_empty() {
            lines.push(format!("Missing: {}", self.missing.join(", ")));
        }
        lines.join("\n")
    }
}

/// Compute the completion breakdown for a document.
pub fn status(repo_path: &Path, id: Option<&str>) -> Result<StatusResult> {
    let doc = read_doc(repo_path, id)?;
    let breakdown = score::breakdown(&doc);
    Ok(StatusResult {
        id: doc.id,
        name: doc.name,
        score: breakdown.score,
        filled: breakdown.filled,
        total: breakdown.total,
        missing: breakdown.missing,
    })
}

/// Result of `gw export`.
#[derive(Debug, Serialize)]
pub struct ExportResult {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub text: String,
}

impl Output for ExportResult {
    fn to_human(&self) -> String {
        match &self.path {
            Some(path) => format!("Exported {} to {}", self.id, path),
            // The encoder ends with one newline; println adds it back.
            None => self.text.strip_suffix('\n').unwrap_or(&self.text).to_string(),
        }
    }
}

/// Encode a document to the canonical text format.
pub fn export(repo_path: &Path, id: Option<&str>, output: Option<&Path>) -> Result<ExportResult> {
    let doc = read_doc(repo_path, id)?;
    let text = codec::encode(&doc);
    let path = match output {
        Some(path) => {
            fs::write(path, &text)?;
            Some(path.display().to_string())
        }
        None => None,
    };
    Ok(ExportResult {
        id: doc.id,
        path,
        text,
    })
}

/// Result of `gw import` and `gw ingest`.
#[derive(Debug, Serialize)]
pub struct ImportResult {
    pub id: String,
    pub name: String,
    pub created: bool,
    pub merged: bool,
    pub score: u8,
}

impl Output for ImportResult {
    fn to_human(&self) -> String {
        let verb = if self.created { "Created" } else { "Merged into" };
        format!(
            "{} {} \"{}\" ({}% complete)",
            verb, self.id, self.name, self.score
        )
    }
}

/// Build a merge policy from `--append` dotted field keys.
fn policy_from_keys(append: &[String]) -> Result<MergePolicy> {
    let mut policy = MergePolicy::new();
    for key in append {
        let field = super::parse_field_key(key)?;
        policy.set(field, MergeMode::Append);
    }
    Ok(policy)
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Decode canonical text and create a new document or merge into one.
///
/// With `--new` the decoded document is stored as-is and becomes active.
/// Otherwise the target is `--into`, falling back to the active document;
/// with neither, a new document is created.
pub fn import(
    repo_path: &Path,
    file: Option<&Path>,
    new: bool,
    into: Option<&str>,
    append: &[String],
) -> Result<ImportResult> {
    let policy = policy_from_keys(append)?;
    let text = read_input(file)?;
    let incoming = codec::decode(&text);

    let mut store = Store::open(repo_path)?;
    let target = if new {
        None
    } else {
        match into {
            Some(id) => Some(store.resolve(Some(id))?),
            None => store.active_id().map(|s| s.to_string()),
        }
    };

    match target {
        Some(id) => {
            let mut doc = store
                .get(&id)
                .ok_or_else(|| Error::NotFound(id.clone()))?
                .clone();
            merge(&mut doc, incoming, &policy);
            let name = doc.name.clone();
            let score = score::score(&doc);
            store.put(doc)?;
            Ok(ImportResult {
                id,
                name,
                created: false,
                merged: true,
                score,
            })
        }
        None => {
            let mut doc = incoming;
            while store.get(&doc.id).is_some() {
                doc.id = crate::storage::generate_id("gw", &doc.name);
            }
            let id = doc.id.clone();
            let name = doc.name.clone();
            let score = score::score(&doc);
            store.put(doc)?;
            store.set_active(Some(id.clone()))?;
            Ok(ImportResult {
                id,
                name,
                created: true,
                merged: false,
                score,
            })
        }
    }
}

/// Merge a partial extraction record (JSON) into a document.
///
/// Targets `--into`, falling back to the active document; with neither,
/// a new document is created from the extraction alone.
pub fn ingest(
    repo_path: &Path,
    file: &Path,
    into: Option<&str>,
    append: &[String],
) -> Result<ImportResult> {
    let policy = policy_from_keys(append)?;
    let payload = fs::read_to_string(file)?;
    let fields: ExtractedFields = serde_json::from_str(&payload)
        .map_err(|e| Error::InvalidInput(format!("Invalid extraction payload: {}", e)))?;
    let mut incoming = fields.into_document();

    let mut store = Store::open(repo_path)?;
    let target = match into {
        Some(id) => Some(store.resolve(Some(id))?),
        None => store.active_id().map(|s| s.to_string()),
    };

    match target {
        Some(id) => {
            let mut doc = store
                .get(&id)
                .ok_or_else(|| Error::NotFound(id.clone()))?
                .clone();
            merge(&mut doc, incoming, &policy);
            let name = doc.name.clone();
            let score = score::score(&doc);
            store.put(doc)?;
            Ok(ImportResult {
                id,
                name,
                created: false,
                merged: true,
                score,
            })
        }
        None => {
            if incoming.name.is_empty() {
                incoming.name = incoming.overview.feature.clone();
            }
            let id = incoming.id.clone();
            let name = incoming.name.clone();
            let score = score::score(&incoming);
            store.put(incoming)?;
            store.set_active(Some(id.clone()))?;
            Ok(ImportResult {
                id,
                name,
                created: true,
                merged: false,
                score,
            })
        }
    }
}
