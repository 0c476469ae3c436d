//! Semantic style builders.

use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

pub fn link() -> Style {
    Style::default()
        .fg(palette::LINK)
        .add_modifier(Modifier::UNDERLINED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

pub fn status_red() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

/// Pass/fail colouring of a result.
pub fn passed(passed: Option<bool>) -> Style {
    match passed {
        Some(true) => Style::default().fg(palette::STATUS_GREEN),
        Some(false) => Style::default().fg(palette::STATUS_RED),
        None => text_secondary(),
    }
}

/// "Black on Cyan" - used for focused+selected rows and tabs
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Selected row of an unfocused table
pub fn unfocused_selected() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

pub fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(accent_bold())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_active())
        .style(Style::default().bg(palette::POPUP_BG))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glass_block_border_follows_focus() {
        let focused = glass_block(true);
        let unfocused = glass_block(false);
        assert_ne!(format!("{focused:?}"), format!("{unfocused:?}"));
    }

    #[test]
    fn test_passed_colours() {
        assert_eq!(passed(Some(true)).fg, Some(palette::STATUS_GREEN));
        assert_eq!(passed(Some(false)).fg, Some(palette::STATUS_RED));
        assert_eq!(passed(None).fg, Some(palette::TEXT_SECONDARY));
    }
}
