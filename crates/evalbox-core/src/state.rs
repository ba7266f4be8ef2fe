//! Persisted UI state: command text, evaluation history, display preference.
//!
//! The store is the source of truth on load. Every mutation writes the
//! serialized value to the store before updating memory, so the two never
//! diverge after a call returns. Store write failures are logged and
//! otherwise ignored: the in-memory value still changes.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::SharedStorage;

/// Storage key for the command text (stored verbatim).
pub const COMMAND_TEXT_KEY: &str = "command_text";
/// Storage key for the history (JSON array of `{code, response}`).
pub const HISTORY_KEY: &str = "history";
/// Storage key for the display preference (JSON boolean).
pub const DARK_MODE_KEY: &str = "dark_mode";

/// Stable identifier for a history entry.
///
/// Assigned when an entry is created or loaded; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One past submission and the server's textual response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(skip)]
    pub id: EntryId,
    pub code: String,
    pub response: String,
}

impl HistoryEntry {
    pub fn new(code: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            code: code.into(),
            response: response.into(),
        }
    }
}

/// Entries compare by content; ids are view-state only.
impl PartialEq for HistoryEntry {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.response == other.response
    }
}

impl Eq for HistoryEntry {}

pub struct PersistedState {
    storage: SharedStorage,
    code: String,
    history: Vec<HistoryEntry>,
    dark_mode: bool,
}

impl fmt::Debug for PersistedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistedState")
            .field("code", &self.code)
            .field("history", &self.history.len())
            .field("dark_mode", &self.dark_mode)
            .finish_non_exhaustive()
    }
}

impl PersistedState {
    /// Loads state from `storage`, falling back to defaults for absent or
    /// malformed values.
    pub fn load(storage: SharedStorage) -> Self {
        let code = storage.get(COMMAND_TEXT_KEY).unwrap_or_default();
        let history = load_json(&storage, HISTORY_KEY).unwrap_or_default();
        let dark_mode = load_json(&storage, DARK_MODE_KEY).unwrap_or(false);
        Self {
            storage,
            code,
            history,
            dark_mode,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn save_code(&mut self, code: impl Into<String>) {
        let code = code.into();
        self.write(COMMAND_TEXT_KEY, &code);
        self.code = code;
    }

    pub fn save_history(&mut self, history: Vec<HistoryEntry>) {
        match serde_json::to_string(&history) {
            Ok(json) => self.write(HISTORY_KEY, &json),
            Err(e) => tracing::warn!("failed to serialize history: {e}"),
        }
        self.history = history;
    }

    pub fn save_dark_mode(&mut self, dark_mode: bool) {
        self.write(DARK_MODE_KEY, if dark_mode { "true" } else { "false" });
        self.dark_mode = dark_mode;
    }

    pub fn append_entry(&mut self, entry: HistoryEntry) {
        let mut history = self.history.clone();
        history.push(entry);
        self.save_history(history);
    }

    /// Removes the entry at `index`, returning it. Out-of-range is a no-op.
    pub fn delete_entry(&mut self, index: usize) -> Option<HistoryEntry> {
        if index >= self.history.len() {
            return None;
        }
        let mut history = self.history.clone();
        let removed = history.remove(index);
        self.save_history(history);
        Some(removed)
    }

    pub fn clear_history(&mut self) {
        self.save_history(Vec::new());
    }

    pub fn toggle_dark_mode(&mut self) {
        self.save_dark_mode(!self.dark_mode);
    }

    /// Copies the code of the entry at `index` into the command text.
    pub fn load_entry(&mut self, index: usize) -> bool {
        let Some(code) = self.history.get(index).map(|e| e.code.clone()) else {
            return false;
        };
        self.save_code(code);
        true
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            tracing::warn!(key, "failed to persist state: {e:#}");
        }
    }
}

fn load_json<T: DeserializeOwned>(storage: &SharedStorage, key: &str) -> Option<T> {
    let raw = storage.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, "ignoring malformed stored value: {e}");
            None
        }
    }
}
