//! Model and test tables
//!
//! Columns come from [`FilterKey::columns_for`], so a new filter key shows up
//! here without touching this widget.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::Line,
    widgets::{Paragraph, Row, StatefulWidget, Table, TableState, Widget, Wrap},
};
use vfb_app::list_state::EntityListState;
use vfb_core::{format_authors, format_date, Collection, FilterKey, Model, Record, Test};

use crate::theme::styles;

/// One table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Alias,
    Authors,
    Attribute(FilterKey),
    Status,
    Created,
}

impl Column {
    pub fn title(&self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Alias => "Alias",
            Column::Authors => "Authors",
            Column::Attribute(key) => key.label(),
            Column::Status => "Status",
            Column::Created => "Created",
        }
    }

    fn constraint(&self) -> Constraint {
        match self {
            Column::Name => Constraint::Fill(3),
            Column::Created => Constraint::Length(10),
            _ => Constraint::Fill(2),
        }
    }
}

/// Columns of a collection. Narrow tables keep name, alias and the shared
/// filter attributes.
pub fn columns(collection: Collection, wide: bool) -> Vec<Column> {
    let mut columns = vec![Column::Name, Column::Alias];
    if wide {
        columns.push(Column::Authors);
    }
    columns.extend(
        FilterKey::columns_for(collection)
            .into_iter()
            .filter(|key| wide || key.applies_to(collection.other()))
            .map(Column::Attribute),
    );
    if wide {
        if collection == Collection::Tests {
            columns.push(Column::Status);
        }
        columns.push(Column::Created);
    }
    columns
}

/// Record fields the tables display beyond [`Record`].
pub trait TableRecord: Record {
    const COLLECTION: Collection;

    fn name(&self) -> &str;
    fn authors(&self) -> String;
    fn created(&self) -> String;
    fn status(&self) -> &str {
        ""
    }

    fn cell(&self, column: Column) -> String {
        match column {
            Column::Name => self.name().to_string(),
            Column::Alias => self.alias().unwrap_or_default().to_string(),
            Column::Authors => self.authors(),
            Column::Attribute(key) => self.attribute(key),
            Column::Status => self.status().to_string(),
            Column::Created => self.created(),
        }
    }
}

impl TableRecord for Model {
    const COLLECTION: Collection = Collection::Models;

    fn name(&self) -> &str {
        &self.name
    }

    fn authors(&self) -> String {
        format_authors(&self.author)
    }

    fn created(&self) -> String {
        self.date_created.as_deref().map(format_date).unwrap_or_default()
    }
}

impl TableRecord for Test {
    const COLLECTION: Collection = Collection::Tests;

    fn name(&self) -> &str {
        &self.name
    }

    fn authors(&self) -> String {
        format_authors(&self.author)
    }

    fn created(&self) -> String {
        self.date_created.as_deref().map(format_date).unwrap_or_default()
    }

    fn status(&self) -> &str {
        self.status.as_deref().unwrap_or_default()
    }
}

pub struct EntityTable<'a, T> {
    list: &'a EntityListState<T>,
    focused: bool,
}

impl<'a, T: TableRecord> EntityTable<'a, T> {
    pub fn new(list: &'a EntityListState<T>, focused: bool) -> Self {
        Self { list, focused }
    }

    fn title(&self) -> String {
        let mut title = format!(" {} ({})", T::COLLECTION.title(), self.list.visible_len());
        if !self.list.hidden.is_empty() {
            title.push_str(&format!(" · {} hidden", self.list.hidden.len()));
        }
        if self.list.is_loading() {
            title.push_str(" · loading…");
        }
        title.push(' ');
        title
    }

    fn placeholder(&self) -> Option<Line<'static>> {
        if !self.list.visible().is_empty() {
            return None;
        }
        let collection = T::COLLECTION.path();
        let line = if self.list.is_loading() {
            Line::styled(format!("Loading {collection}…"), styles::text_muted())
        } else if let Some(error) = &self.list.status.error {
            Line::styled(format!("Could not load {collection}: {error}"), styles::status_red())
        } else {
            Line::styled(
                format!("No {collection} match the current filters"),
                styles::text_muted(),
            )
        };
        Some(line)
    }
}

impl<T: TableRecord> Widget for EntityTable<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.focused).title(self.title());

        if let Some(placeholder) = self.placeholder() {
            Paragraph::new(placeholder)
                .wrap(Wrap { trim: true })
                .block(block)
                .render(area, buf);
            return;
        }

        let columns = columns(T::COLLECTION, self.list.wide);
        let header = Row::new(columns.iter().map(Column::title)).style(styles::accent_bold());
        let rows = self
            .list
            .visible()
            .into_iter()
            .map(|record| Row::new(columns.iter().map(|c| record.cell(*c))));

        let highlight = if self.focused {
            styles::focused_selected()
        } else {
            styles::unfocused_selected()
        };
        let table = Table::new(rows, columns.iter().map(Column::constraint))
            .header(header)
            .block(block)
            .row_highlight_style(highlight)
            .column_spacing(1);

        let mut table_state = TableState::default().with_selected(Some(self.list.selected));
        StatefulWidget::render(table, area, buf, &mut table_state);
    }
}
