//! File-backed persistence for the task store.
//!
//! The engine never touches disk; callers compose `load → transition → save`
//! per command. Saves go through a sibling `.tmp` file followed by a rename
//! so a crash mid-write cannot corrupt the store. Single-writer assumption,
//! no locking.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TaskellError;
use crate::state_machine::Store;

pub const DEFAULT_STORE_FILE: &str = "taskell.json";

/// Takes the already-resolved store path; precedence between the config
/// file, the environment override, and `--store` is decided by the caller.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the store. A missing file is an empty store, not an error;
    /// an unreadable or corrupt file is.
    pub fn load(&self) -> Result<Store, TaskellError> {
        if !self.path.exists() {
            return Ok(Store::empty());
        }
        let data = fs::read_to_string(&self.path)?;
        let store: Store = serde_json::from_str(&data)?;
        store.check_invariants()?;
        Ok(store)
    }

    /// Writes the store atomically: serialize to `<path>.tmp`, then rename
    /// over the real file.
    pub fn save(&self, store: &Store) -> Result<(), TaskellError> {
        let data = serde_json::to_string_pretty(store)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
