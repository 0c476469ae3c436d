//! Detail dialogs for models, tests and results

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Row, StatefulWidget, Table, TableState, Tabs, Widget, Wrap},
};
use serde_json::Value;
use vfb_app::detail_state::{DetailTab, OwnerDetail, ResultDetail, ResultTab};
use vfb_app::list_state::EntityListState;
use vfb_core::{
    format_date, value_to_text, Collection, EntityKind, FilterKey, Record, ValidationResult,
    Version,
};

use super::entity_table::TableRecord;
use super::modal_overlay;
use crate::theme::styles;

pub const NO_FILES_MESSAGE: &str = "No files were generated during the validation process!";

/// Fields rendered explicitly or in the versions section; everything else in
/// `extra` is listed after the filter attributes.
const SKIPPED_EXTRA: &[&str] = &["instances", "images", "codes", "model", "test"];

fn field(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:>18}: "), styles::text_muted()),
        Span::styled(value.into(), styles::text_primary()),
    ])
}

fn tab_bar<'a>(titles: impl IntoIterator<Item = &'static str>, selected: usize) -> Tabs<'a> {
    Tabs::new(titles)
        .select(selected)
        .highlight_style(styles::focused_selected())
        .divider("│")
}

/// Model or test detail with Info and Results tabs.
pub struct OwnerDetailDialog<'a, T> {
    detail: &'a OwnerDetail<T>,
}

impl<'a, T: TableRecord> OwnerDetailDialog<'a, T> {
    pub fn new(detail: &'a OwnerDetail<T>) -> Self {
        Self { detail }
    }

    fn info_lines(record: &T, results: &EntityListState<ValidationResult>) -> Vec<Line<'static>> {
        let mut lines = vec![
            field("ID", record.id()),
            field("Alias", record.alias().unwrap_or_default()),
            field("Name", record.name()),
            field("Authors", record.authors()),
            field("Created", record.created()),
        ];
        if T::COLLECTION == Collection::Tests {
            lines.push(field("Status", record.status()));
        }
        for key in FilterKey::columns_for(T::COLLECTION) {
            lines.push(field(key.label(), record.attribute(key)));
        }

        let mut extras: Vec<(&String, &Value)> = record
            .extra()
            .iter()
            .filter(|(k, _)| {
                FilterKey::ALL.iter().all(|key| key.as_str() != k.as_str())
                    && !SKIPPED_EXTRA.contains(&k.as_str())
            })
            .collect();
        extras.sort_by(|a, b| a.0.cmp(b.0));
        for (key, value) in extras {
            let text = value_to_text(value);
            if !text.is_empty() {
                lines.push(field(key, text));
            }
        }

        let versions = record.versions();
        if !versions.is_empty() {
            let heading = match T::COLLECTION {
                Collection::Models => "Versions",
                Collection::Tests => "Code versions",
            };
            lines.push(Line::default());
            lines.push(Line::styled(heading, styles::accent_bold()));
            for version in &versions {
                lines.extend(version_lines(version, T::KIND, results));
            }
        }
        lines
    }

    fn render_results(&self, area: Rect, buf: &mut Buffer) {
        let results = &self.detail.results;
        if results.items.is_empty() {
            let line = if results.is_loading() {
                Line::styled("Loading results…", styles::text_muted())
            } else if let Some(error) = &results.status.error {
                Line::styled(format!("Could not load results: {error}"), styles::status_red())
            } else {
                Line::styled("No results have been recorded yet", styles::text_muted())
            };
            Paragraph::new(line).wrap(Wrap { trim: true }).render(area, buf);
            return;
        }

        // Results of a model name the test, and vice versa
        let counterpart = match T::COLLECTION {
            Collection::Models => EntityKind::Test,
            Collection::Tests => EntityKind::Model,
        };
        let header = Row::new(["Date", counterpart.title(), "Score", "Passed"])
            .style(styles::accent_bold());
        let rows = results.items.iter().map(|r| {
            Row::new([
                r.timestamp.as_deref().map(format_date).unwrap_or_default(),
                r.embedded_name(counterpart).unwrap_or(r.id()).to_string(),
                r.score_text(),
                passed_text(r),
            ])
            .style(styles::passed(r.passed))
        });
        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Fill(1),
                Constraint::Length(10),
                Constraint::Length(6),
            ],
        )
        .header(header)
        .row_highlight_style(styles::focused_selected());

        let mut state = TableState::default().with_selected(Some(results.selected));
        StatefulWidget::render(table, area, buf, &mut state);
    }
}

fn version_lines(
    version: &Version,
    kind: EntityKind,
    results: &EntityListState<ValidationResult>,
) -> Vec<Line<'static>> {
    let mut lines = vec![field("Version", version.version.clone())];
    if let Some(timestamp) = &version.timestamp {
        lines.push(field("Timestamp", format_date(timestamp)));
    }
    if let Some(location) = version.location() {
        lines.push(field("Source", location.to_string()));
    }
    if let Some(path) = version.path.as_deref().filter(|p| !p.is_empty()) {
        lines.push(field("Path", path.to_string()));
    }
    let parameters = version.parameters.as_ref().map(value_to_text).unwrap_or_default();
    if !parameters.is_empty() {
        lines.push(field("Parameters", parameters));
    }
    if !results.is_loading() {
        lines.push(field("Results", score_summary(version, kind, &results.items)));
    }
    lines
}

/// Result count, passes and mean score for one version.
fn score_summary(version: &Version, kind: EntityKind, results: &[ValidationResult]) -> String {
    let matching: Vec<&ValidationResult> = results
        .iter()
        .filter(|r| r.version_id(kind) == Some(version.id.as_str()))
        .collect();
    if matching.is_empty() {
        return "none".to_string();
    }
    let passed = matching.iter().filter(|r| r.passed == Some(true)).count();
    let scores: Vec<f64> = matching.iter().filter_map(|r| r.score).collect();
    let mut summary = format!("{} ({} passed)", matching.len(), passed);
    if !scores.is_empty() {
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        summary.push_str(&format!(", mean score {mean:.4}"));
    }
    summary
}

fn passed_text(result: &ValidationResult) -> String {
    match result.passed {
        Some(true) => "yes",
        Some(false) => "no",
        None => "",
    }
    .to_string()
}

impl<T: TableRecord> Widget for OwnerDetailDialog<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(record) = &self.detail.record else {
            return;
        };

        let modal = modal_overlay::centered_rect_percent(85, 80, area);
        modal_overlay::prepare_modal(buf, area, modal);

        let title = format!(" {}: {} ", T::KIND.title(), record.label());
        let block = styles::modal_block(&title);
        let inner = block.inner(modal);
        block.render(modal, buf);

        let [tabs_area, body, hint_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        tab_bar(
            DetailTab::ALL.iter().map(DetailTab::title),
            self.detail.tab.index(),
        )
        .render(tabs_area, buf);

        match self.detail.tab {
            DetailTab::Info => Paragraph::new(Self::info_lines(record, &self.detail.results))
                .wrap(Wrap { trim: false })
                .render(body, buf),
            DetailTab::Results => self.render_results(body, buf),
        }

        let hint = match self.detail.tab {
            DetailTab::Info => " Tab switch · s save JSON · Esc close",
            DetailTab::Results => " ↑↓ select · Enter open result · Tab switch · Esc close",
        };
        Paragraph::new(Line::styled(hint, styles::text_muted())).render(hint_area, buf);
    }
}

/// Result detail with Info and Files tabs.
pub struct ResultDetailDialog<'a> {
    detail: &'a ResultDetail,
}

impl<'a> ResultDetailDialog<'a> {
    pub fn new(detail: &'a ResultDetail) -> Self {
        Self { detail }
    }

    fn info_lines(result: &ValidationResult) -> Vec<Line<'static>> {
        let optional = |v: &Option<String>| v.clone().unwrap_or_default();
        let mut lines = vec![
            field("ID", result.id.clone()),
            field("Model", result.embedded_name(EntityKind::Model).unwrap_or_default()),
            field("Model version", optional(&result.model_version_id)),
            field("Test", result.embedded_name(EntityKind::Test).unwrap_or_default()),
            field("Test version", optional(&result.test_code_id)),
            field("Score", result.score_text()),
            field(
                "Normalized score",
                result.normalized_score.map(|s| format!("{s:.4}")).unwrap_or_default(),
            ),
            field("Passed", passed_text(result)),
            field(
                "Timestamp",
                result.timestamp.as_deref().map(format_date).unwrap_or_default(),
            ),
        ];
        if let Some(project) = result.extra.get("project_id").map(value_to_text) {
            lines.push(field("Project", project));
        }
        lines
    }

    fn file_lines(&self, result: &ValidationResult) -> Vec<Line<'static>> {
        if result.results_storage.is_empty() {
            return vec![Line::styled(NO_FILES_MESSAGE, styles::text_muted())];
        }
        result
            .results_storage
            .iter()
            .enumerate()
            .map(|(i, file)| {
                let name_style = if i == self.detail.selected_file {
                    styles::focused_selected()
                } else {
                    styles::text_primary()
                };
                Line::from(vec![
                    Span::styled(file.file_name(), name_style),
                    Span::raw("  "),
                    Span::styled(file.link().to_string(), styles::link()),
                ])
            })
            .collect()
    }
}

impl Widget for ResultDetailDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(result) = &self.detail.record else {
            return;
        };

        let modal = modal_overlay::centered_rect_percent(75, 70, area);
        modal_overlay::prepare_modal(buf, area, modal);

        let title = format!(" Result: {} ", result.id);
        let block = styles::modal_block(&title);
        let inner = block.inner(modal);
        block.render(modal, buf);

        let [tabs_area, body] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(inner);

        tab_bar(
            ResultTab::ALL.iter().map(ResultTab::title),
            self.detail.tab.index(),
        )
        .render(tabs_area, buf);

        let lines = match self.detail.tab {
            ResultTab::Info => Self::info_lines(result),
            ResultTab::Files => self.file_lines(result),
        };
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(body, buf);
    }
}
