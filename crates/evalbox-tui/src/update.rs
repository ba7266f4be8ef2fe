//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use evalbox_core::eval::{Evaluation, can_evaluate};

use crate::common::{TaskId, sanitize_for_display};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::editor::EditorState;
use crate::state::{AppState, Focus};

pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            app.notification
                .expire(Instant::now(), app.notification_timeout);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::EvalCompleted { task, evaluation } => {
            handle_eval_completed(app, task, evaluation);
            vec![]
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => {
            if app.focus == Focus::Editor {
                insert_text(app, &sanitize_for_display(&text));
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c' | 'q') if ctrl => return vec![UiEffect::Quit],
        KeyCode::Char('t') if ctrl => {
            app.persisted.toggle_dark_mode();
            return vec![];
        }
        KeyCode::Esc => {
            app.notification.dismiss();
            return vec![];
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = app.focus.toggle();
            return vec![];
        }
        _ => {}
    }

    match app.focus {
        Focus::Editor => handle_editor_key(app, key),
        Focus::History => {
            handle_history_key(app, key);
            vec![]
        }
    }
}

fn handle_editor_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let code = app.persisted.code().to_string();

    match key.code {
        KeyCode::Enter if !shift && !alt => return submit(app),
        KeyCode::Enter => insert_text(app, "\n"),
        KeyCode::Char('j') if ctrl => insert_text(app, "\n"),
        KeyCode::Backspace => {
            if let Some(edited) = app.editor.backspace(&code) {
                app.persisted.save_code(edited);
            }
        }
        KeyCode::Delete => {
            if let Some(edited) = app.editor.delete(&code) {
                app.persisted.save_code(edited);
            }
        }
        KeyCode::Left => app.editor.move_left(),
        KeyCode::Right => app.editor.move_right(&code),
        KeyCode::Up => app.editor.move_up(&code),
        KeyCode::Down => app.editor.move_down(&code),
        KeyCode::Home => app.editor.move_home(&code),
        KeyCode::End => app.editor.move_end(&code),
        KeyCode::Char(c) if !ctrl && !alt => insert_text(app, c.encode_utf8(&mut [0; 4])),
        _ => {}
    }
    vec![]
}

fn handle_history_key(app: &mut AppState, key: KeyEvent) {
    let len = app.persisted.history().len();

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.history.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.history.select_next(len),
        KeyCode::Home | KeyCode::Char('g') => app.history.selected = 0,
        KeyCode::End | KeyCode::Char('G') => app.history.select_last(len),
        KeyCode::Char(' ') | KeyCode::Enter => {
            if let Some(entry) = app.persisted.history().get(app.history.selected) {
                app.history.toggle(entry.id);
            }
        }
        KeyCode::Char('l') => {
            if app.persisted.load_entry(app.history.selected) {
                app.editor = EditorState::at_end(app.persisted.code());
                app.focus = Focus::Editor;
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if app.persisted.delete_entry(app.history.selected).is_some() {
                app.history.sync(app.persisted.history());
            }
        }
        KeyCode::Char('C') => {
            app.persisted.clear_history();
            app.history.sync(app.persisted.history());
        }
        _ => {}
    }
}

fn insert_text(app: &mut AppState, text: &str) {
    let edited = app.editor.insert(app.persisted.code(), text);
    app.persisted.save_code(edited);
}

/// Starts an evaluation unless one is running or the command is empty.
///
/// The task is marked active here, before the runtime spawns it.
fn submit(app: &mut AppState) -> Vec<UiEffect> {
    let code = app.persisted.code();
    if !can_evaluate(code, app.is_loading()) {
        return vec![];
    }
    let code = code.to_string();
    let task = app.task_seq.next_id();
    app.eval_task.start(task);
    tracing::debug!(?task, "starting evaluation");
    vec![UiEffect::StartEvaluation { task, code }]
}

fn handle_eval_completed(app: &mut AppState, task: TaskId, evaluation: Evaluation) {
    if !app.eval_task.finish_if_active(task) {
        tracing::debug!(?task, "ignoring stale evaluation result");
        return;
    }
    evaluation.record(&mut app.persisted);
    app.history.sync(app.persisted.history());
    app.notification.show(evaluation.notice, Instant::now());
}
