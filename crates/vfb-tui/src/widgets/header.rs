//! Header: application title, display mode and active filters

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use vfb_core::{DisplayMode, FilterConfiguration, SETTINGS_DELIMITER};

use crate::theme::styles;

pub const APP_TITLE: &str = "Validation Framework Browser";

pub struct MainHeader<'a> {
    filters: &'a FilterConfiguration,
    display: DisplayMode,
}

impl<'a> MainHeader<'a> {
    pub fn new(filters: &'a FilterConfiguration, display: DisplayMode) -> Self {
        Self { filters, display }
    }

    /// `Species: a, b · Brain region: c`, or a placeholder without filters.
    fn filter_summary(&self) -> String {
        if self.filters.is_empty() {
            return "No filters".to_string();
        }
        self.filters
            .active()
            .map(|(key, values)| {
                let joined = values.join(&format!("{SETTINGS_DELIMITER} "));
                format!("{}: {}", key.label(), joined)
            })
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false);
        let inner = block.inner(area);
        block.render(area, buf);

        let line = Line::from(vec![
            Span::styled(format!(" {APP_TITLE} "), styles::accent_bold()),
            Span::styled("│ ", styles::text_muted()),
            Span::styled(self.display.as_str(), styles::text_primary()),
            Span::styled(" │ ", styles::text_muted()),
            Span::styled(self.filter_summary(), styles::text_secondary()),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}
