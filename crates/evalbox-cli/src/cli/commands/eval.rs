//! Non-interactive evaluation.

use anyhow::{Result, bail};
use evalbox_core::api::ApiClient;
use evalbox_core::config::Config;
use evalbox_core::eval::{self, EvalSettings, Severity};
use evalbox_core::state::PersistedState;

pub async fn run(
    client: &ApiClient,
    config: &Config,
    persisted: &mut PersistedState,
    command: &str,
) -> Result<()> {
    if !eval::can_evaluate(command, false) {
        bail!("Nothing to evaluate: the command is empty");
    }

    let settings = EvalSettings::from(config);
    let evaluation = eval::evaluate(client, command, &settings).await;
    evaluation.record(persisted);

    let notice = evaluation.notice;
    match notice.severity {
        Severity::Error => bail!("{}", notice.message),
        Severity::Warning => {
            eprintln!(
                "Warning: response does not contain \"{}\"",
                settings.success_marker
            );
            println!("{}", notice.message);
        }
        Severity::Success | Severity::Info => println!("{}", notice.message),
    }
    Ok(())
}
