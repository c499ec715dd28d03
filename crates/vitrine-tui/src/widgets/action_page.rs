use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::card::{card_lines, draw_clipped};
use crate::app::App;

/// Cells of a static grid: `columns` equal columns separated by `gap`,
/// filled row by row. Cells below `area` are dropped.
pub fn grid_cells(area: Rect, columns: u16, card_height: u16, gap: u16, count: usize) -> Vec<Rect> {
    let columns = columns.max(1);
    let gaps = gap.saturating_mul(columns - 1);
    let width = area.width.saturating_sub(gaps) / columns;
    if width == 0 || card_height == 0 {
        return Vec::new();
    }

    let mut cells = Vec::with_capacity(count);
    for index in 0..count {
        let column = (index % usize::from(columns)) as u16;
        let row = (index / usize::from(columns)) as u32;
        let y = u32::from(area.y) + row * (u32::from(card_height) + 1);
        if y + u32::from(card_height) > u32::from(area.bottom()) {
            break;
        }
        cells.push(Rect::new(
            area.x.saturating_add(column.saturating_mul(width.saturating_add(gap))),
            y as u16,
            width,
            card_height,
        ));
    }
    cells
}

/// Heading, explanation and the thumbnail grid
pub struct ActionPageWidget;

impl ActionPageWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let page = &app.catalog.action;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Min(0),
            ])
            .split(area);

        let heading = Paragraph::new(vec![
            Line::from(""),
            Line::styled(
                page.title.clone(),
                Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
            ),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().bg(theme.bg));
        frame.render_widget(heading, chunks[0]);

        let body = Paragraph::new(page.body.clone())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(theme.muted).bg(theme.bg));
        frame.render_widget(body, chunks[1]);

        let grid = chunks[2];
        let ui = &app.config.ui;
        let columns = ui.grid.columns_for(grid.width);
        let cells = grid_cells(grid, columns, ui.card_height, ui.card_gap, app.catalog.thumbnails.len());

        let buf = frame.buffer_mut();
        for (item, cell) in app.catalog.thumbnails.iter().zip(cells) {
            let lines = card_lines(
                item,
                app.is_source_missing(item),
                cell.width,
                cell.height,
                theme,
                false,
            );
            draw_clipped(buf, &lines, i32::from(cell.x), cell.y, grid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_cells_fill_rows() {
        let cells = grid_cells(Rect::new(0, 10, 62, 14), 2, 6, 2, 5);
        assert_eq!(cells.len(), 2 * 2);
        assert_eq!(cells[0], Rect::new(0, 10, 30, 6));
        assert_eq!(cells[1], Rect::new(32, 10, 30, 6));
        assert_eq!(cells[2], Rect::new(0, 17, 30, 6));
        assert_eq!(cells[3], Rect::new(32, 17, 30, 6));
    }

    #[test]
    fn test_single_column_grid() {
        let cells = grid_cells(Rect::new(0, 0, 40, 100), 1, 6, 2, 8);
        assert_eq!(cells.len(), 8);
        assert!(cells.iter().all(|c| c.x == 0 && c.width == 40));
    }

    #[test]
    fn test_extreme_card_height_yields_no_cells() {
        assert!(grid_cells(Rect::new(0, 0, 80, 40), 2, u16::MAX, 2, 8).is_empty());
        let cells = grid_cells(Rect::new(0, 0, 80, 40), 1, 6, u16::MAX, 2);
        assert_eq!(cells.len(), 2);
        assert!(cells.iter().all(|c| c.x == 0));
    }

    #[test]
    fn test_too_narrow_grid_is_empty() {
        assert!(grid_cells(Rect::new(0, 0, 3, 10), 4, 6, 2, 8).is_empty());
    }
}
