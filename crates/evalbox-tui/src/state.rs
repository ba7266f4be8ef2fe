//! Application state composition.
//!
//! ```text
//! AppState
//! ├── persisted: PersistedState  (command text, history, dark mode)
//! ├── editor: EditorState        (cursor)
//! ├── history: HistoryView       (selection, expanded rows)
//! ├── notification: NotificationState
//! ├── task_seq / eval_task       (evaluation lifecycle)
//! └── focus, spinner_frame, should_quit
//! ```

use std::time::Duration;

use evalbox_core::config::Config;
use evalbox_core::state::PersistedState;

use crate::common::{TaskSeq, TaskState};
use crate::features::editor::EditorState;
use crate::features::history::HistoryView;
use crate::features::notification::NotificationState;
use crate::theme::{self, Palette};

/// Which pane receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Editor,
    History,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Editor => Focus::History,
            Focus::History => Focus::Editor,
        }
    }
}

pub struct AppState {
    pub persisted: PersistedState,
    pub editor: EditorState,
    pub history: HistoryView,
    pub notification: NotificationState,
    pub focus: Focus,
    pub task_seq: TaskSeq,
    pub eval_task: TaskState,
    pub spinner_frame: usize,
    pub should_quit: bool,
    pub notification_timeout: Option<Duration>,
    pub editor_rows: u16,
}

impl AppState {
    pub fn new(config: &Config, persisted: PersistedState) -> Self {
        let editor = EditorState::at_end(persisted.code());
        Self {
            persisted,
            editor,
            history: HistoryView::default(),
            notification: NotificationState::default(),
            focus: Focus::default(),
            task_seq: TaskSeq::default(),
            eval_task: TaskState::default(),
            spinner_frame: 0,
            should_quit: false,
            notification_timeout: config.notification_timeout(),
            editor_rows: config.editor_rows.max(1),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.eval_task.is_running()
    }

    pub fn palette(&self) -> Palette {
        theme::palette(self.persisted.dark_mode())
    }
}
