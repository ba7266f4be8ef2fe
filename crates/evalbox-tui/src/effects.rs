//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer mutates state only; network work is requested through here.

use crate::common::TaskId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Send `code` to the evaluation endpoint. The result comes back as
    /// `UiEvent::EvalCompleted` carrying the same `task`.
    StartEvaluation { task: TaskId, code: String },
}
