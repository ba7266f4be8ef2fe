//! Command evaluation against the remote endpoint.
//!
//! The command is sent with every whitespace character removed. A response
//! containing the success marker is a success, anything else a warning; both
//! produce a history entry holding the command as the user typed it. Request
//! failures produce the fixed error message and no entry.

use crate::api::{ApiClient, Callbacks, Outcome, QueryParams};
use crate::config::Config;
use crate::state::{HistoryEntry, PersistedState};

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// Message and severity to show after an evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

/// Settings that shape an evaluation, usually taken from [`Config`].
#[derive(Debug, Clone)]
pub struct EvalSettings {
    pub path: String,
    pub success_marker: String,
    pub error_message: String,
}

impl From<&Config> for EvalSettings {
    fn from(config: &Config) -> Self {
        Self {
            path: config.eval_path.clone(),
            success_marker: config.success_marker.clone(),
            error_message: config.error_message.clone(),
        }
    }
}

impl Default for EvalSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Result of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub notice: Notice,
    /// Entry to append to history; `None` when the request failed.
    pub entry: Option<HistoryEntry>,
}

impl Evaluation {
    /// Appends the history entry, if any, to `state`.
    pub fn record(&self, state: &mut PersistedState) {
        if let Some(entry) = &self.entry {
            state.append_entry(entry.clone());
        }
    }
}

/// Removes every whitespace character.
pub fn strip_whitespace(code: &str) -> String {
    code.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Submission is blocked while a request is running or the text is empty.
pub fn can_evaluate(code: &str, loading: bool) -> bool {
    !loading && !code.is_empty()
}

pub fn classify(response: &str, success_marker: &str) -> Severity {
    if response.contains(success_marker) {
        Severity::Success
    } else {
        Severity::Warning
    }
}

/// Turns a request outcome into a notice and optional history entry.
pub fn interpret(code: &str, outcome: Outcome, settings: &EvalSettings) -> Evaluation {
    match outcome {
        Outcome::Success(body) => {
            let response = body.unwrap_or_default();
            Evaluation {
                notice: Notice {
                    severity: classify(&response, &settings.success_marker),
                    message: response.clone(),
                },
                entry: Some(HistoryEntry::new(code, response)),
            }
        }
        Outcome::Error(reason) => {
            tracing::warn!("evaluation failed: {reason}");
            Evaluation {
                notice: Notice {
                    severity: Severity::Error,
                    message: settings.error_message.clone(),
                },
                entry: None,
            }
        }
    }
}

/// Sends `code` to the evaluation endpoint.
pub async fn evaluate(client: &ApiClient, code: &str, settings: &EvalSettings) -> Evaluation {
    let body = strip_whitespace(code);
    let outcome = client
        .submit(&settings.path, &QueryParams::new(), &body, Callbacks::none(), true)
        .await;
    interpret(code, outcome, settings)
}
