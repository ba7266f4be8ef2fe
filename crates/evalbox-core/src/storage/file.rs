//! JSON-file backed storage.
//!
//! All keys live in a single JSON object on disk. Reads come from the copy
//! loaded on open; every change re-reads the file, applies just that key and
//! rewrites it atomically, so other handles' keys are never clobbered.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};

use super::Storage;
use crate::fsutil::write_atomic;

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Opens the store at `path`.
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// also treated as empty (and logged) so a bad write never locks the
    /// user out; the next `set` replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = read_values(&path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), "ignoring unreadable state file: {e:#}");
            BTreeMap::new()
        });
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `change` to the current on-disk map and writes it back if it
    /// reports a modification. The cached copy takes the result even if the
    /// write fails.
    fn update<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let mut cached = self
            .values
            .lock()
            .map_err(|e| anyhow!("storage lock poisoned: {e}"))?;

        let mut values = read_values(&self.path).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), "replacing unreadable state file: {e:#}");
            BTreeMap::new()
        });
        let changed = change(&mut values);
        *cached = values;
        if changed {
            let json = serde_json::to_string_pretty(&*cached).context("serialize state")?;
            write_atomic(&self.path, &json)?;
        }
        Ok(())
    }
}

fn read_values(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read state from {}", path.display()))?;
    if contents.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse state from {}", path.display()))
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|values| values.remove(key).is_some())
    }
}
