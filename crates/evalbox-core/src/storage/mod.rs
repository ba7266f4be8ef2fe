//! Key-value persistence for UI state.
//!
//! `Storage` is a small string-keyed store. The UI state owns a shared
//! handle to one and writes through on every mutation.

mod file;
mod memory;

use std::sync::Arc;

use anyhow::Result;
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// String key-value store.
pub trait Storage: Send + Sync {
    /// Returns the stored value, or `None` if the key is absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Shared storage reference.
pub type SharedStorage = Arc<dyn Storage>;
