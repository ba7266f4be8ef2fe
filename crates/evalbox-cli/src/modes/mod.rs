//! Runtime execution modes.
//!
//! The full-screen editor lives behind the `tui` feature.

#[cfg(feature = "tui")]
pub use evalbox_tui::run_interactive;

#[cfg(not(feature = "tui"))]
use evalbox_core::api::ApiClient;
#[cfg(not(feature = "tui"))]
use evalbox_core::config::Config;
#[cfg(not(feature = "tui"))]
use evalbox_core::state::PersistedState;

#[cfg(not(feature = "tui"))]
pub async fn run_interactive(
    _config: &Config,
    _persisted: PersistedState,
    _client: ApiClient,
) -> anyhow::Result<()> {
    anyhow::bail!("TUI support is disabled in this build (feature \"tui\").");
}
