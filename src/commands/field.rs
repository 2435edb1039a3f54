//! Scalar field writes by dotted key (`gw set`).

use serde::Serialize;
use std::path::Path;

use crate::commands::Output;
use crate::merge::{self, ScalarField};
use crate::storage::Store;
use crate::{Error, Result};

/// Result of `gw set`.
#[derive(Debug, Serialize)]
pub struct SetResult {
    pub id: String,
    pub field: String,
    pub value: String,
    pub appended: bool,
}

impl Output for SetResult {
    fn to_human(&self) -> String {
        let verb = if self.appended { "Appended to" } else { "Set" };
        format!("{} {} on {}", verb, self.field, self.id)
    }
}

/// Parse a dotted field key, with a helpful error for unknown keys.
pub fn parse_field_key(key: &str) -> Result<ScalarField> {
    ScalarField::parse(key).ok_or_else(|| {
        Error::InvalidInput(format!(
            "Unknown field '{}'. Run `gw status` to see field keys",
            key
        ))
    })
}

/// Write one scalar field on a document.
pub fn set(
    repo_path: &Path,
    field_key: &str,
    value: String,
    doc_id: Option<&str>,
    append: bool,
) -> Result<SetResult> {
    let field = parse_field_key(field_key)?;

    let mut store = Store::open(repo_path)?;
    let id = store.resolve(doc_id)?;
    let mut doc = store
        .get(&id)
        .ok_or_else(|| Error::NotFound(id.clone()))?
        .clone();

    if append {
        merge::append_field(&mut doc, field, &value)?;
    } else {
        merge::set_field(&mut doc, field, &value)?;
    }

    doc.touch();
    store.put(doc)?;
    Ok(SetResult {
        id,
        field: field.key(),
        value,
        appended: append,
    })
}
