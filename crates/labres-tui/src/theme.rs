//! Colors and styles. Screens ask for a role (`input_border`, `toast`),
//! never for a raw color.

use ratatui::style::{Color, Modifier, Style};

// ── Palette ───────────────────────────────────────────────────────────

const TEAL: Color = Color::Rgb(94, 234, 212); // #5eead4
const INDIGO: Color = Color::Rgb(129, 140, 248); // #818cf8
const AMBER: Color = Color::Rgb(251, 191, 36); // #fbbf24
const GREEN: Color = Color::Rgb(74, 222, 128); // #4ade80
const RED: Color = Color::Rgb(248, 113, 113); // #f87171

const TEXT: Color = Color::Rgb(203, 213, 225); // #cbd5e1
const SUBTLE: Color = Color::Rgb(100, 116, 139); // #64748b
const SELECTION_BG: Color = Color::Rgb(30, 41, 59); // #1e293b
const OVERLAY_BG: Color = Color::Rgb(15, 23, 42); // #0f172a

// ── Panels ────────────────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}

pub fn border(focused: bool) -> Style {
    Style::default().fg(if focused { INDIGO } else { SUBTLE })
}

/// Section heading inside an overlay.
pub fn heading() -> Style {
    Style::default().fg(TEAL)
}

/// Background fill behind popups so the screen underneath does not show.
pub fn overlay() -> Style {
    Style::default().bg(OVERLAY_BG)
}

// ── Tables ────────────────────────────────────────────────────────────

pub fn table_header() -> Style {
    Style::default()
        .fg(TEAL)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(TEXT)
}

pub fn table_selected() -> Style {
    Style::default()
        .fg(INDIGO)
        .bg(SELECTION_BG)
        .add_modifier(Modifier::BOLD)
}

// ── Inputs ────────────────────────────────────────────────────────────

pub fn input_label(active: bool) -> Style {
    Style::default().fg(if active { TEAL } else { TEXT })
}

pub fn input_text() -> Style {
    Style::default().fg(TEAL)
}

/// `◂ ▸` arrows around a selector value.
pub fn selector_arrow(active: bool) -> Style {
    Style::default().fg(if active { INDIGO } else { SUBTLE })
}

pub fn selector_value(active: bool) -> Style {
    if active {
        Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT)
    }
}

// ── Tab and status bars ───────────────────────────────────────────────

pub fn tab(active: bool) -> Style {
    if active {
        Style::default().fg(INDIGO).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT)
    }
}

/// A request is in flight.
pub fn busy() -> Style {
    Style::default().fg(AMBER)
}

pub fn idle() -> Style {
    Style::default().fg(GREEN)
}

pub fn key_hint() -> Style {
    Style::default().fg(SUBTLE)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}

// ── Feedback ──────────────────────────────────────────────────────────

pub fn throbber_label() -> Style {
    Style::default().fg(TEXT)
}

pub fn throbber_symbol() -> Style {
    Style::default().fg(INDIGO)
}

pub fn error_banner() -> Style {
    Style::default().fg(RED).add_modifier(Modifier::BOLD)
}

/// Success toast frame and check mark.
pub fn toast() -> Style {
    Style::default().fg(GREEN)
}

pub fn toast_text() -> Style {
    Style::default().fg(TEXT)
}

/// Placeholder and empty-state text.
pub fn muted() -> Style {
    Style::default().fg(SUBTLE)
}
