//! Color palette and semantic styling for the status view.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const ELECTRIC_YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363
pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

/// Default panel border.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Body text.
pub fn text_style() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Footer key-hint text.
pub fn hint_style() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Active/positive indicator.
pub fn active_style() -> Style {
    Style::default().fg(SUCCESS_GREEN)
}

/// Inactive/negative indicator.
pub fn inactive_style() -> Style {
    Style::default().fg(ERROR_RED)
}

/// Warning accents (confirmation bar, recording badge).
pub fn warning_style() -> Style {
    Style::default().fg(ELECTRIC_YELLOW)
}
