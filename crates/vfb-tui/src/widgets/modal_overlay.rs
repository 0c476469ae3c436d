//! Shared modal overlay utilities.
//!
//! Centering, background dimming and drop shadows for the dialogs.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Clear, Widget};

use crate::theme::palette;

/// Center a fixed-size rect within an area, clamped to the area.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Center a percentage-based rect within an area.
///
/// `width_percent` and `height_percent` should be 0-100.
pub fn centered_rect_percent(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Dim every cell of `area` so the dialog on top stands out.
pub fn dim_background(buf: &mut Buffer, area: Rect) {
    let dim_style = Style::default()
        .fg(palette::TEXT_MUTED)
        .bg(palette::DEEPEST_BG);

    let y_end = area.y.saturating_add(area.height);
    let x_end = area.x.saturating_add(area.width);
    for y in area.y..y_end {
        for x in area.x..x_end {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_style(dim_style);
            }
        }
    }
}

/// Render a 1-cell shadow offset to the right and bottom of a modal rect.
pub fn render_shadow(buf: &mut Buffer, modal_rect: Rect) {
    let shadow_style = Style::default().fg(palette::SHADOW).bg(palette::SHADOW);

    let right_x = modal_rect.x.saturating_add(modal_rect.width);
    let bottom_y = modal_rect.y.saturating_add(modal_rect.height);

    for y in modal_rect.y.saturating_add(1)..bottom_y.saturating_add(1) {
        if let Some(cell) = buf.cell_mut((right_x, y)) {
            cell.set_char(' ');
            cell.set_style(shadow_style);
        }
    }
    for x in modal_rect.x.saturating_add(1)..right_x.saturating_add(1) {
        if let Some(cell) = buf.cell_mut((x, bottom_y)) {
            cell.set_char(' ');
            cell.set_style(shadow_style);
        }
    }
}

/// Dim the screen, clear the modal area and draw its shadow.
pub fn prepare_modal(buf: &mut Buffer, screen: Rect, modal: Rect) {
    dim_background(buf, screen);
    render_shadow(buf, modal);
    Clear.render(modal, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_within_area() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(40, 10, area), Rect::new(20, 7, 40, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 10);
        let result = centered_rect(40, 12, area);
        assert_eq!(result.width, 30);
        assert_eq!(result.height, 10);
    }

    #[test]
    fn test_centered_rect_percent() {
        let area = Rect::new(0, 0, 100, 50);
        let result = centered_rect_percent(80, 70, area);
        assert!(result.width >= 78 && result.width <= 82);
        assert!(result.height >= 33 && result.height <= 37);
    }

    #[test]
    fn test_dim_background_covers_area() {
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        dim_background(&mut buf, area);
        for y in 0..5 {
            for x in 0..10 {
                assert_eq!(buf[(x, y)].fg, palette::TEXT_MUTED);
            }
        }
    }

    #[test]
    fn test_render_shadow_no_overflow() {
        let area = Rect::new(0, 0, 10, 10);
        let mut buf = Buffer::empty(area);
        render_shadow(&mut buf, Rect::new(8, 8, 2, 2));
        render_shadow(&mut buf, Rect::new(2, 2, 4, 4));
        assert_eq!(buf[(6, 3)].bg, palette::SHADOW);
        assert_eq!(buf[(3, 6)].bg, palette::SHADOW);
    }
}
