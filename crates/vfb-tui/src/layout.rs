//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};
use vfb_app::TableLayout;
use vfb_core::Collection;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title and active filter summary
    pub header: Rect,

    /// Tables or the introduction
    pub body: Rect,

    /// Share link, key hints and transient messages
    pub status: Rect,
}

pub fn create(area: Rect) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header (bordered, one inner row)
        Constraint::Min(3),
        Constraint::Length(3), // Status bar (top border + two rows)
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        body: chunks[1],
        status: chunks[2],
    }
}

/// Areas of the tables a layout shows, left to right.
pub fn table_areas(body: Rect, layout: TableLayout) -> Vec<(Collection, Rect)> {
    match layout {
        TableLayout::Single(collection) => vec![(collection, body)],
        TableLayout::Split => {
            let chunks =
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(body);
            vec![
                (Collection::Models, chunks[0]),
                (Collection::Tests, chunks[1]),
            ]
        }
    }
}
