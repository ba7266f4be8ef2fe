//! Color palettes for light and dark display modes.

use evalbox_core::eval::Severity;
use ratatui::style::Color;

/// Accent used for the focused pane, buttons and the title.
pub const PRIMARY: Color = Color::Rgb(25, 118, 210);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub selection: Color,
}

pub const LIGHT: Palette = Palette {
    background: Color::Rgb(250, 250, 250),
    foreground: Color::Rgb(33, 33, 33),
    muted: Color::Rgb(117, 117, 117),
    border: Color::Rgb(189, 189, 189),
    accent: PRIMARY,
    selection: Color::Rgb(227, 242, 253),
};

pub const DARK: Palette = Palette {
    background: Color::Rgb(18, 18, 18),
    foreground: Color::Rgb(238, 238, 238),
    muted: Color::Rgb(158, 158, 158),
    border: Color::Rgb(66, 66, 66),
    accent: Color::Rgb(144, 202, 249),
    selection: Color::Rgb(38, 50, 56),
};

pub fn palette(dark_mode: bool) -> Palette {
    if dark_mode { DARK } else { LIGHT }
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Rgb(2, 136, 209),
        Severity::Success => Color::Rgb(56, 142, 60),
        Severity::Warning => Color::Rgb(245, 124, 0),
        Severity::Error => Color::Rgb(211, 47, 47),
    }
}

/// Label of the button that switches to the other mode.
pub fn toggle_label(dark_mode: bool) -> &'static str {
    if dark_mode { "Light mode" } else { "Dark mode" }
}
