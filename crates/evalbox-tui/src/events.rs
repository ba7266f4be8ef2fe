//! UI event types.
//!
//! Every input the reducer sees is a `UiEvent`: terminal input, the periodic
//! tick, and results that async tasks send back through the runtime inbox.

use crossterm::event::Event as CrosstermEvent;
use evalbox_core::eval::Evaluation;

use crate::common::TaskId;

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick: advances the spinner, expires notifications, triggers render.
    Tick,

    /// Raw terminal input.
    Terminal(CrosstermEvent),

    /// An evaluation task finished.
    EvalCompleted { task: TaskId, evaluation: Evaluation },
}
