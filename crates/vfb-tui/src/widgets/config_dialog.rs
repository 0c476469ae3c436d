//! Configuration dialog: display mode and per-key filter values

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use vfb_app::config_dialog::{ConfigDialogState, ROW_COUNT};
use vfb_core::{FilterKey, SETTINGS_DELIMITER};

use super::modal_overlay;
use crate::theme::styles;

pub struct ConfigDialog<'a> {
    state: &'a ConfigDialogState,
}

impl<'a> ConfigDialog<'a> {
    pub fn new(state: &'a ConfigDialogState) -> Self {
        Self { state }
    }

    fn row_line(&self, row: usize) -> Line<'static> {
        let selected = row == self.state.row;
        let marker = if selected { "▶ " } else { "  " };
        let label_style = if selected {
            styles::accent_bold()
        } else {
            styles::text_secondary()
        };

        let Some(key) = row.checked_sub(1).and_then(|i| FilterKey::ALL.get(i)) else {
            return Line::from(vec![
                Span::styled(marker, styles::accent_bold()),
                Span::styled(format!("{:<18}", "Display"), label_style),
                Span::styled(format!("◀ {} ▶", self.state.display.as_str()), styles::text_primary()),
            ]);
        };

        let values = self.state.filters.get(*key);
        let mut spans = vec![
            Span::styled(marker, styles::accent_bold()),
            Span::styled(format!("{:<18}", key.label()), label_style),
            Span::styled(
                values.join(&format!("{SETTINGS_DELIMITER} ")),
                styles::text_primary(),
            ),
        ];
        if selected {
            if !values.is_empty() {
                spans.push(Span::raw(format!("{SETTINGS_DELIMITER} ")));
            }
            spans.push(Span::styled(self.state.input.clone(), styles::keybinding()));
            spans.push(Span::styled("█", styles::keybinding()));
        }
        Line::from(spans)
    }
}

impl Widget for ConfigDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = modal_overlay::centered_rect(72, ROW_COUNT as u16 + 6, area);
        modal_overlay::prepare_modal(buf, area, modal);

        let block = styles::modal_block(" Configure ");
        let inner = block.inner(modal);
        block.render(modal, buf);

        let [rows_area, hint_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(2)]).areas(inner);

        let lines: Vec<Line> = (0..ROW_COUNT).map(|row| self.row_line(row)).collect();
        Paragraph::new(lines).render(rows_area, buf);

        let hint = if self.state.selected_key().is_some() {
            "type values (comma separated) · Enter add/apply · Backspace · Del clear · Esc cancel"
        } else {
            "←→ change display · ↑↓ rows · Enter apply · Esc cancel"
        };
        Paragraph::new(Line::styled(hint, styles::text_muted()))
            .wrap(Wrap { trim: true })
            .render(hint_area, buf);
    }
}
