//! Storage layer for Groundwork documents.
//!
//! Documents live outside the repository, under
//! `<data_dir>/groundwork/<repo-hash>/`, keyed by a hash of the canonical
//! repository path. The `GW_DATA_DIR` environment variable overrides the
//! base directory (used for test isolation).
//!
//! Persistence is an append-only JSONL event log (`documents.jsonl`):
//! every mutation appends one `put`/`delete`/`active` record, and opening
//! the store replays the log. Last `put` per id wins; document order is
//! first-`put` order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::models::AnalysisDocument;
use crate::{Error, Result};

const LOG_FILE: &str = "documents.jsonl";

/// One record in the event log.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum LogRecord {
    Put { doc: AnalysisDocument },
    Delete { id: String },
    Active { id: Option<String> },
}

/// Document store for a single repository.
///
/// Owns the ordered id -> document map and the active-document pointer.
/// All core operations take an explicit target; nothing reads ambient state.
pub struct Store {
    /// Root directory for this repository's data
    pub root: PathBuf,
    documents: IndexMap<String, AnalysisDocument>,
    active_id: Option<String>,
}

impl Store {
    /// Open an existing store, replaying the event log.
    pub fn open(repo_path: &Path) -> Result<Self> {
        Self::open_at(get_storage_dir(repo_path)?)
    }

    /// Initialize a store for a new repository.
    pub fn init(repo_path: &Path) -> Result<Self> {
        Self::init_at(get_storage_dir(repo_path)?)
    }

    /// Check whether a store exists for the given repository.
    pub fn exists(repo_path: &Path) -> Result<bool> {
        let root = get_storage_dir(repo_path)?;
        Ok(root.join(LOG_FILE).exists())
    }

    /// Open with an explicit data directory (dependency injection for tests).
    pub fn open_with_data_dir(repo_path: &Path, data_dir: &Path) -> Result<Self> {
        Self::open_at(storage_dir_under(data_dir, repo_path)?)
    }

    /// Init with an explicit data directory (dependency injection for tests).
    pub fn init_with_data_dir(repo_path: &Path, data_dir: &Path) -> Result<Self> {
        Self::init_at(storage_dir_under(data_dir, repo_path)?)
    }

    fn open_at(root: PathBuf) -> Result<Self> {
        let log_path = root.join(LOG_FILE);
        if !log_path.exists() {
            return Err(Error::NotInitialized);
        }

        let mut store = Self {
            root,
            documents: IndexMap::new(),
            active_id: None,
        };
        store.replay(&log_path)?;
        Ok(store)
    }

    fn init_at(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root)?;
        let log_path = root.join(LOG_FILE);
        if !log_path.exists() {
            File::create(&log_path)?;
        }
        Self::open_at(root)
    }

    /// Replay the event log into memory. Corrupt lines are skipped so a
    /// damaged tail never makes the whole store unreadable.
    fn replay(&mut self, log_path: &Path) -> Result<()> {
        let file = File::open(log_path)?;
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: LogRecord = match serde_json::from_str(&line) {
                Ok(record) => record,
                Err(_) => continue,
            };
            match record {
                LogRecord::Put { doc } => {
                    // IndexMap keeps the original position on re-insert,
                    // which gives first-put ordering for free.
                    self.documents.insert(doc.id.clone(), doc);
                }
                LogRecord::Delete { id } => {
                    self.documents.shift_remove(&id);
                }
                LogRecord::Active { id } => {
                    self.active_id = id;
                }
            }
        }
        // The pointer may reference a document deleted later in the log.
        if let Some(id) = &self.active_id {
            if !self.documents.contains_key(id) {
                self.active_id = None;
            }
        }
        Ok(())
    }

    fn append(&self, record: &LogRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.root.join(LOG_FILE))?;
        writeln!(file, "{}", json)?;
        Ok(())
    }

    /// All documents in first-put order.
    pub fn documents(&self) -> impl Iterator<Item = &AnalysisDocument> {
        self.documents.values()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&AnalysisDocument> {
        self.documents.get(id)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// Resolve a target document id: the explicit id if given (must exist),
    /// otherwise the active document.
    pub fn resolve(&self, explicit: Option<&str>) -> Result<String> {
        match explicit {
            Some(id) => {
                if self.documents.contains_key(id) {
                    Ok(id.to_string())
                } else {
                    Err(Error::NotFound(id.to_string()))
                }
            }
            None => self
                .active_id
                .clone()
                .ok_or(Error::NoActiveDocument),
        }
    }

    /// Insert or update a document and persist the change.
    pub fn put(&mut self, doc: AnalysisDocument) -> Result<()> {
        self.append(&LogRecord::Put { doc: doc.clone() })?;
        self.documents.insert(doc.id.clone(), doc);
        Ok(())
    }

    /// Remove a document. Clears the active pointer if it was the target.
    pub fn remove(&mut self, id: &str) -> Result<AnalysisDocument> {
        let doc = self
            .documents
            .shift_remove(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        self.append(&LogRecord::Delete { id: id.to_string() })?;
        if self.active_id.as_deref() == Some(id) {
            self.set_active(None)?;
        }
        Ok(doc)
    }

    /// Set (or clear) the active document pointer.
    pub fn set_active(&mut self, id: Option<String>) -> Result<()> {
        if let Some(id) = &id {
            if !self.documents.contains_key(id) {
                return Err(Error::NotFound(id.clone()));
            }
        }
        self.append(&LogRecord::Active { id: id.clone() })?;
        self.active_id = id;
        Ok(())
    }
}

/// Base data directory: `GW_DATA_DIR` override, else the platform data dir.
pub fn get_data_root() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("GW_DATA_DIR") {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let data_dir = dirs::data_dir()
        .ok_or_else(|| Error::Other("Could not determine data directory".to_string()))?;
    Ok(data_dir.join("groundwork"))
}

/// Storage directory for a repository: `<data root>/<12-hex path hash>`.
pub fn get_storage_dir(repo_path: &Path) -> Result<PathBuf> {
    storage_dir_under(&get_data_root()?, repo_path)
}

fn storage_dir_under(data_root: &Path, repo_path: &Path) -> Result<PathBuf> {
    let repo_canonical = repo_path
        .canonicalize()
        .map_err(|e| Error::Other(format!("Could not canonicalize repo path: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(repo_canonical.to_string_lossy().as_bytes());
    let hash = hasher.finalize();
    let hash_hex = format!("{:x}", hash);

    Ok(data_root.join(&hash_hex[..12]))
}

/// Generate a unique ID.
///
/// Format: `<prefix>-<4 hex chars>`
/// - Document prefix: "gw"
/// - Assumption "gwa", question "gwq", action "gwx", scope item "gws"
pub fn generate_id(prefix: &str, seed: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(seed.as_bytes());
    hasher.update(
        chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or(0)
            .to_le_bytes(),
    );
    let hash = hasher.finalize();
    let hash_hex = format!("{:x}", hash);
    format!("{}-{}", prefix, &hash_hex[..4])
}

/// Walk up from `start` looking for a `.git` directory.
pub fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(".git").exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn new_store() -> (TempDir, TempDir, Store) {
        let repo = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        let store = Store::init_with_data_dir(repo.path(), data.path()).unwrap();
        (repo, data, store)
    }

    #[test]
    fn test_open_uninitialized_fails() {
        let repo = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        assert!(matches!(
            Store::open_with_data_dir(repo.path(), data.path()),
            Err(Error::NotInitialized)
        ));
    }

    #[test]
    fn test_put_and_reopen() {
        let (repo, data, mut store) = new_store();
        let doc = AnalysisDocument::new("gw-a1b2".to_string(), "One".to_string());
        store.put(doc).unwrap();
        store.set_active(Some("gw-a1b2".to_string())).unwrap();

        let reopened = Store::open_with_data_dir(repo.path(), data.path()).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.get("gw-a1b2").unwrap().name, "One");
        assert_eq!(reopened.active_id(), Some("gw-a1b2"));
    }

    #[test]
    fn test_last_put_wins_and_order_is_first_put() {
        let (repo, data, mut store) = new_store();
        store
            .put(AnalysisDocument::new("gw-0001".to_string(), "A".to_string()))
            .unwrap();
        store
            .put(AnalysisDocument::new("gw-0002".to_string(), "B".to_string()))
            .unwrap();
        store
            .put(AnalysisDocument::new("gw-0001".to_string(), "A2".to_string()))
            .unwrap();

        let reopened = Store::open_with_data_dir(repo.path(), data.path()).unwrap();
        let names: Vec<&str> = reopened.documents().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["A2", "B"]);
    }

    #[test]
    fn test_delete_clears_active_pointer() {
        let (repo, data, mut store) = new_store();
        store
            .put(AnalysisDocument::new("gw-0001".to_string(), "A".to_string()))
            .unwrap();
        store.set_active(Some("gw-0001".to_string())).unwrap();
        store.remove("gw-0001").unwrap();
        assert_eq!(store.active_id(), None);

        let reopened = Store::open_with_data_dir(repo.path(), data.path()).unwrap();
        assert!(reopened.is_empty());
        assert_eq!(reopened.active_id(), None);
    }

    #[test]
    fn test_remove_missing_errors() {
        let (_repo, _data, mut store) = new_store();
        assert!(matches!(store.remove("gw-ffff"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_resolve_explicit_and_active() {
        let (_repo, _data, mut store) = new_store();
        assert!(matches!(store.resolve(None), Err(Error::NoActiveDocument)));
        store
            .put(AnalysisDocument::new("gw-0001".to_string(), "A".to_string()))
            .unwrap();
        assert!(matches!(
            store.resolve(Some("gw-9999")),
            Err(Error::NotFound(_))
        ));
        store.set_active(Some("gw-0001".to_string())).unwrap();
        assert_eq!(store.resolve(None).unwrap(), "gw-0001");
        assert_eq!(store.resolve(Some("gw-0001")).unwrap(), "gw-0001");
    }

    #[test]
    fn test_corrupt_log_lines_are_skipped() {
        let (repo, data, mut store) = new_store();
        store
            .put(AnalysisDocument::new("gw-0001".to_string(), "A".to_string()))
            .unwrap();
        let log = store.root.join(LOG_FILE);
        let mut file = OpenOptions::new().append(true).open(&log).unwrap();
        writeln!(file, "{{not json").unwrap();

        let reopened = Store::open_with_data_dir(repo.path(), data.path()).unwrap();
        assert_eq!(reopened.len(), 1);
    }

    #[test]
    fn test_generate_id_format() {
        let id = generate_id("gw", "seed");
        let suffix = id.strip_prefix("gw-").unwrap();
        assert_eq!(suffix.len(), 4);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
