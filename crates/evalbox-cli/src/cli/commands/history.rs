//! History command handlers.
//!
//! Entries are numbered from 1, matching the interactive table.

use anyhow::{Result, bail};
use evalbox_core::state::PersistedState;

pub fn list(persisted: &PersistedState) {
    let entries = persisted.history();
    if entries.is_empty() {
        println!("No history entries.");
        return;
    }
    for (i, entry) in entries.iter().enumerate() {
        let response = entry.response.lines().next().unwrap_or_default();
        println!("{:>3}  {response}", i + 1);
    }
}

pub fn show(persisted: &PersistedState, index: usize) -> Result<()> {
    let offset = to_offset(persisted, index)?;
    let entry = &persisted.history()[offset];
    println!("Command:\n{}\n\nResponse:\n{}", entry.code, entry.response);
    Ok(())
}

pub fn delete(persisted: &mut PersistedState, index: usize) -> Result<()> {
    let offset = to_offset(persisted, index)?;
    if persisted.delete_entry(offset).is_some() {
        println!("Deleted entry {index}");
    }
    Ok(())
}

pub fn clear(persisted: &mut PersistedState) {
    let count = persisted.history().len();
    persisted.clear_history();
    println!("Cleared {count} history entries");
}

fn to_offset(persisted: &PersistedState, index: usize) -> Result<usize> {
    let len = persisted.history().len();
    if index == 0 || index > len {
        bail!("No history entry {index} (have {len})");
    }
    Ok(index - 1)
}
