//! Theme command handlers.

use evalbox_core::state::PersistedState;

fn name(dark_mode: bool) -> &'static str {
    if dark_mode { "dark" } else { "light" }
}

pub fn show(persisted: &PersistedState) {
    println!("{}", name(persisted.dark_mode()));
}

pub fn toggle(persisted: &mut PersistedState) {
    persisted.toggle_dark_mode();
    println!("Switched to {} mode", name(persisted.dark_mode()));
}
