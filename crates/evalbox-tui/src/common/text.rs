//! Text utilities for TUI rendering.

use std::borrow::Cow;
use std::iter::Peekable;
use std::str::Chars;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with ellipsis if it exceeds `max_width` (unicode-aware).
///
/// Only the first line is kept; multi-line responses collapse to one row.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    let has_more_lines = text.trim_end().lines().nth(1).is_some();
    if first_line.width() <= max_width && !has_more_lines {
        return first_line.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in first_line.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        truncated.push(ch);
        width += ch_width;
    }
    truncated.push('…');
    truncated
}

/// Display width of `text` (unicode-aware).
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Tabs expand to a fixed run of spaces; `unicode_width` gives them no width.
const TAB_EXPANSION: &str = "    ";

/// Cleans external text (pastes) before it enters the editor.
///
/// ANSI escape sequences are removed whole, tabs expand to four spaces and
/// `\r\n` / `\r` become `\n`. Borrowed when nothing needs changing.
pub fn sanitize_for_display(s: &str) -> Cow<'_, str> {
    if !s.contains(['\x1b', '\t', '\r']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\x1b' => skip_escape(&mut chars),
            '\t' => out.push_str(TAB_EXPANSION),
            '\r' => {
                chars.next_if_eq(&'\n');
                out.push('\n');
            }
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Consumes the rest of an escape sequence whose ESC was already read.
fn skip_escape(chars: &mut Peekable<Chars<'_>>) {
    match chars.next() {
        // CSI: parameters, then one final byte in `@..=~`.
        Some('[') => {
            for ch in chars.by_ref() {
                if ('@'..='~').contains(&ch) {
                    break;
                }
            }
        }
        // OSC: terminated by BEL or ST (`ESC \`).
        Some(']') => {
            while let Some(ch) = chars.next() {
                if ch == '\x07' {
                    break;
                }
                if ch == '\x1b' {
                    chars.next_if_eq(&'\\');
                    break;
                }
            }
        }
        _ => {}
    }
}
