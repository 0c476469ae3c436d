//! Status bar widget
//!
//! First row: shareable link for the current view. Second row: the latest
//! status message, or key hints for the active mode.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;
use vfb_app::{AppState, UiMode};

use crate::theme::styles;

pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.state.ui_mode() {
            UiMode::Error => &[("Enter", "dismiss")],
            UiMode::Config => &[("Enter", "apply"), ("Esc", "cancel")],
            UiMode::Detail(_) => &[("Tab", "tab"), ("s", "save"), ("Esc", "close")],
            UiMode::Browse => &[
                ("↑↓", "select"),
                ("Enter", "open"),
                ("Tab", "focus"),
                ("c", "configure"),
                ("r", "reload"),
                ("w", "wide"),
                ("x/u", "hide/restore"),
                ("s", "save"),
                ("q", "quit"),
            ],
        }
    }

    fn second_row(&self) -> Line<'static> {
        if let Some(message) = &self.state.status_message {
            return Line::styled(format!(" {message}"), styles::text_secondary());
        }
        let mut spans = vec![Span::raw(" ")];
        for (key, action) in self.hints() {
            spans.push(Span::styled(*key, styles::keybinding()));
            spans.push(Span::styled(format!(" {action}  "), styles::text_muted()));
        }
        Line::from(spans)
    }
}

/// Shorten `text` to `max_width` columns, keeping the tail (the fragment is
/// the interesting part of a link).
pub fn truncate_start(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut tail: Vec<char> = Vec::new();
    let mut width = 1; // leading ellipsis
    for c in text.chars().rev() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        tail.push(c);
    }
    std::iter::once('…').chain(tail.into_iter().rev()).collect()
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(styles::border_inactive());
        let inner = block.inner(area);
        block.render(area, buf);

        let label = " Link: ";
        let link_width = (inner.width as usize).saturating_sub(label.len() + 1);
        let link = truncate_start(&self.state.share_link(), link_width);
        let lines = vec![
            Line::from(vec![
                Span::styled(label, styles::text_muted()),
                Span::styled(link, styles::link()),
            ]),
            self.second_row(),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}
