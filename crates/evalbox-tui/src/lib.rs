//! Full-screen TUI for evalbox.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod theme;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use evalbox_core::api::ApiClient;
use evalbox_core::config::Config;
use evalbox_core::eval::EvalSettings;
use evalbox_core::state::PersistedState;
pub use runtime::TuiRuntime;

use crate::state::AppState;

/// Runs the interactive editor until the user quits.
///
/// Must be called from inside a multi-threaded tokio runtime: the event loop
/// blocks its thread while evaluations run as spawned tasks.
pub async fn run_interactive(
    config: &Config,
    persisted: PersistedState,
    client: ApiClient,
) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Interactive mode requires a terminal.\n\
             Use `evalbox eval '...'` for non-interactive evaluation."
        );
    }

    tracing::info!(base_url = client.base_url(), "starting interactive session");
    let state = AppState::new(config, persisted);
    let mut runtime = TuiRuntime::new(state, client, EvalSettings::from(config))?;
    runtime.run()
}
