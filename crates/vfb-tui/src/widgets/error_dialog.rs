//! Error dialog for the get/update error slots

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Paragraph, Widget, Wrap},
};

use super::modal_overlay;
use crate::theme::styles;

pub struct ErrorDialog<'a> {
    title: &'a str,
    message: &'a str,
}

impl<'a> ErrorDialog<'a> {
    pub fn new(title: &'a str, message: &'a str) -> Self {
        Self { title, message }
    }
}

impl Widget for ErrorDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = modal_overlay::centered_rect(64, 10, area);
        modal_overlay::prepare_modal(buf, area, modal);

        let title = format!(" {} ", self.title);
        let block = styles::modal_block(&title).border_style(styles::status_red());
        let inner = block.inner(modal);
        block.render(modal, buf);

        let [body, hint] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        let lines: Vec<Line> = self
            .message
            .lines()
            .map(|l| Line::styled(l.to_string(), styles::text_primary()))
            .collect();
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(body, buf);
        Paragraph::new(Line::styled(" Enter/Esc dismiss", styles::text_muted())).render(hint, buf);
    }
}
