//! Command implementations for the Groundwork CLI.
//!
//! This module contains the business logic for each CLI command.
//! Commands are organized by entity type:
//! - `system` - Initialization and build info
//! - `doc` - Document CRUD and the active-document pointer
//! - `field` - Scalar field writes by dotted key
//! - `assumption`, `question`, `action`, `scope`, `edge` - Collection operations
//! - `transfer` - Status, export, import, and extraction ingest
//! - `config` - User preferences
//!
//! Every function takes the repository path explicitly and returns a
//! serializable result struct implementing [`Output`].

use serde::Serialize;

pub mod action;
pub mod assumption;
pub mod config;
pub mod doc;
pub mod edge;
pub mod field;
pub mod question;
pub mod scope;
pub mod system;
pub mod transfer;

pub use action::*;
pub use assumption::*;
pub use config::*;
pub use doc::*;
pub use edge::*;
pub use field::*;
pub use question::*;
pub use scope::*;
pub use system::*;
pub use transfer::*;

/// Resolve a target document, apply a mutation, and persist it.
///
/// Returns the document id alongside whatever the mutation produced.
pub(crate) fn update_doc<T>(
    repo_path: &std::path::Path,
    id: Option<&str>,
    f: impl FnOnce(&mut crate::models::AnalysisDocument) -> crate::Result<T>,
) -> crate::Result<(String, T)> {
    let mut store = crate::storage::Store::open(repo_path)?;
    let id = store.resolve(id)?;
    let mut doc = store
        .get(&id)
        .ok_or_else(|| crate::Error::NotFound(id.clone()))?
        .clone();
    let value = f(&mut doc)?;
    doc.touch();
    store.put(doc)?;
    Ok((id, value))
}

/// Resolve a target document for read-only commands.
pub(crate) fn read_doc(
    repo_path: &std::path::Path,
    id: Option<&str>,
) -> crate::Result<crate::models::AnalysisDocument> {
    let store = crate::storage::Store::open(repo_path)?;
    let id = store.resolve(id)?;
    store
        .get(&id)
        .cloned()
        .ok_or(crate::Error::NotFound(id))
}

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output: Serialize {
    /// Serialize to JSON string.
    fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}
