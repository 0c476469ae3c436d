//! Introduction shown instead of the tables when embedded without filters

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Paragraph, Widget, Wrap},
};

use crate::theme::styles;

pub struct Introduction;

impl Introduction {
    fn lines() -> Vec<Line<'static>> {
        vec![
            Line::styled("Welcome to the Validation Framework Browser", styles::accent_bold()),
            Line::from(""),
            Line::styled(
                "This instance has not been configured yet, so no models or tests are listed.",
                styles::text_primary(),
            ),
            Line::styled(
                "Press c to choose species, brain regions, cell types and other filters.",
                styles::text_primary(),
            ),
            Line::styled(
                "The selection is saved with the page, and the matching models and tests appear here.",
                styles::text_secondary(),
            ),
        ]
    }
}

impl Widget for Introduction {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false);
        Paragraph::new(Self::lines())
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
