//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use evalbox_core::state::HistoryEntry;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};

use crate::common::text::display_width;
use crate::common::truncate_with_ellipsis;
use crate::features::history::HistoryView;
use crate::state::{AppState, Focus};
use crate::theme::{self, Palette};

/// Spinner frames for the submit button while loading.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

const EDITOR_TITLE: &str = "Type your command here";
const INDEX_WIDTH: u16 = 4;
const TOAST_MAX_WIDTH: u16 = 60;
const TOAST_MAX_LINES: u16 = 6;

pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let palette = app.palette();

    frame.render_widget(
        Block::default().style(
            Style::default()
                .bg(palette.background)
                .fg(palette.foreground),
        ),
        area,
    );

    let [editor_area, actions_area, history_area, footer_area] = Layout::vertical([
        Constraint::Length(app.editor_rows.saturating_add(2)),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_editor(app, &palette, frame, editor_area);
    render_actions(app, &palette, frame, actions_area);
    render_history(app, &palette, frame, history_area);
    render_footer(app, &palette, frame, footer_area);

    if app.notification.visible {
        render_notification(app, frame, area);
    }
}

fn pane_block<'a>(title: String, focused: bool, palette: &Palette) -> Block<'a> {
    let border = if focused { palette.accent } else { palette.border };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(border).add_modifier(Modifier::BOLD),
        ))
}

fn render_editor(app: &AppState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let focused = app.focus == Focus::Editor;
    let block = pane_block(EDITOR_TITLE.to_string(), focused, palette);
    let inner = block.inner(area);

    let code = app.persisted.code();
    let (line, col) = app.editor.visual_position(code);
    let rows = usize::from(inner.height.max(1));
    let scroll = line.saturating_sub(rows - 1);

    let paragraph = Paragraph::new(code)
        .block(block)
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(paragraph, area);

    if focused && inner.width > 0 && inner.height > 0 {
        let x = inner.x + u16::try_from(col).unwrap_or(u16::MAX).min(inner.width - 1);
        let y = inner.y + u16::try_from(line - scroll).unwrap_or(0);
        frame.set_cursor_position(Position::new(x, y));
    }
}

fn render_actions(app: &AppState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let submit = if app.is_loading() {
        let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
        format!(" {spinner} Evaluating... ")
    } else {
        " Evaluate ".to_string()
    };
    let submit_style = if app.is_loading() || app.persisted.code().is_empty() {
        Style::default().fg(palette.muted)
    } else {
        Style::default()
            .fg(palette.background)
            .bg(palette.accent)
            .add_modifier(Modifier::BOLD)
    };
    let toggle = theme::toggle_label(app.persisted.dark_mode());

    let line = Line::from(vec![
        Span::styled(format!("[{submit}]"), submit_style),
        Span::raw("  "),
        Span::styled(format!("[ {toggle} ]"), Style::default().fg(palette.accent)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_history(app: &AppState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let entries = app.persisted.history();
    let block = pane_block(
        format!("History ({})", entries.len()),
        app.focus == Focus::History,
        palette,
    );

    if entries.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No evaluations yet",
            Style::default().fg(palette.muted),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let response_width = usize::from(block.inner(area).width.saturating_sub(INDEX_WIDTH + 1));
    let rows: Vec<Row> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| history_row(index, entry, &app.history, response_width, palette))
        .collect();

    let header = Row::new(vec!["#", "Response"])
        .style(Style::default().fg(palette.muted).add_modifier(Modifier::BOLD));
    let table = Table::new(rows, [Constraint::Length(INDEX_WIDTH), Constraint::Fill(1)])
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(palette.selection));

    let mut table_state = TableState::default().with_selected(Some(app.history.selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn history_row<'a>(
    index: usize,
    entry: &'a HistoryEntry,
    view: &HistoryView,
    width: usize,
    palette: &Palette,
) -> Row<'a> {
    let mut lines = vec![Line::raw(truncate_with_ellipsis(&entry.response, width))];
    if view.is_expanded(entry.id) {
        lines.extend(entry.code.split('\n').map(|code_line| {
            Line::styled(format!("› {code_line}"), Style::default().fg(palette.muted))
        }));
    }
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    Row::new(vec![
        Cell::from(Span::styled(
            (index + 1).to_string(),
            Style::default().fg(palette.muted),
        )),
        Cell::from(Text::from(lines)),
    ])
    .height(height)
}

fn render_footer(app: &AppState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let hints: &[(&str, &str)] = match app.focus {
        Focus::Editor => &[
            ("Enter", "evaluate"),
            ("Alt+Enter", "newline"),
            ("Tab", "history"),
            ("Ctrl+T", "theme"),
            ("Ctrl+Q", "quit"),
        ],
        Focus::History => &[
            ("Space", "expand"),
            ("l", "load"),
            ("d", "delete"),
            ("C", "Clear history"),
            ("Tab", "editor"),
        ],
    };

    let key_style = Style::default().fg(palette.accent).add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(palette.muted);
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", label_style));
        }
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(format!(" {label}"), label_style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Toast at the top centre, bordered in the severity color.
fn render_notification(app: &AppState, frame: &mut Frame, area: Rect) {
    let notification = &app.notification;
    let color = theme::severity_color(notification.severity);

    let width = TOAST_MAX_WIDTH.min(area.width.saturating_sub(4));
    if width < 4 {
        return;
    }
    let text_width = usize::from(width - 2);
    let wrapped_lines: usize = notification
        .message
        .split('\n')
        .map(|line| display_width(line).div_ceil(text_width).max(1))
        .sum();
    let height = u16::try_from(wrapped_lines)
        .unwrap_or(u16::MAX)
        .clamp(1, TOAST_MAX_LINES)
        + 2;

    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + 1,
        width,
        height.min(area.height.saturating_sub(1)),
    );
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} ", notification.severity.label()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(Span::styled(" Esc ", Style::default().fg(color))).right_aligned());
    let paragraph = Paragraph::new(notification.message.as_str())
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup);
}
