//! Main render/view function (View in TEA pattern)


use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;
use vfb_app::{AppState, UiMode};
use vfb_core::{Collection, EntityKind};

use super::{layout, widgets};
use crate::theme::palette;

/// Render the complete UI (View function in TEA)
///
/// Pure with respect to `state`: every overlay is derived from it, topmost
/// last.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area);

    frame.render_widget(
        widgets::MainHeader::new(&state.filters, state.display),
        areas.header,
    );

    if state.show_introduction() {
        frame.render_widget(widgets::Introduction, areas.body);
    } else {
        render_tables(frame, state, areas.body);
    }

    frame.render_widget(widgets::StatusBar::new(state), areas.status);

    // Detail views stack: model or test, then result on top
    for kind in [EntityKind::Model, EntityKind::Test, EntityKind::Result] {
        if !state.detail.is_open(kind) {
            continue;
        }
        match kind {
            EntityKind::Model => frame.render_widget(
                widgets::OwnerDetailDialog::new(&state.detail.model),
                areas.body,
            ),
            EntityKind::Test => frame.render_widget(
                widgets::OwnerDetailDialog::new(&state.detail.test),
                areas.body,
            ),
            EntityKind::Result => frame.render_widget(
                widgets::ResultDetailDialog::new(&state.detail.result),
                areas.body,
            ),
        }
    }

    if let Some(dialog) = &state.config_dialog {
        frame.render_widget(widgets::ConfigDialog::new(dialog), area);
    }

    if state.ui_mode() == UiMode::Error {
        if let Some((title, message)) = state.current_error() {
            frame.render_widget(widgets::ErrorDialog::new(title, message), area);
        }
    }
}

fn render_tables(frame: &mut Frame, state: &AppState, body: ratatui::layout::Rect) {
    let focus = state.effective_focus();
    for (collection, rect) in layout::table_areas(body, state.table_layout()) {
        let focused = collection == focus;
        match collection {
            Collection::Models => {
                frame.render_widget(widgets::EntityTable::new(&state.models, focused), rect)
            }
            Collection::Tests => {
                frame.render_widget(widgets::EntityTable::new(&state.tests, focused), rect)
            }
        }
    }
}
