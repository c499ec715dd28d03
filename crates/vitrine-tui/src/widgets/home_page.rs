use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use vitrine_core::DisplayItem;

use super::MarqueeRowWidget;
use crate::app::App;

/// Heading followed by the two marquee rows
pub struct HomePageWidget;

impl HomePageWidget {
    /// Split `area` into the heading and one strip per carousel row
    pub fn layout(area: Rect, row_count: usize, card_height: u16) -> (Rect, Vec<Rect>) {
        let row_height = card_height.saturating_add(1);
        let mut constraints = vec![Constraint::Length(3)];
        constraints.extend(std::iter::repeat(Constraint::Length(row_height)).take(row_count));
        constraints.push(Constraint::Min(0));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let rows = chunks[1..=row_count].to_vec();
        (chunks[0], rows)
    }

    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let row_count = app.carousel.as_ref().map(|c| c.len()).unwrap_or(0);
        let (heading, rows) = Self::layout(area, row_count, app.config.ui.card_height);
        // Pointer hit-testing uses the areas of the last draw
        app.row_areas = rows.clone();

        let theme = &app.theme;
        let mut lines = vec![
            Line::from(""),
            Line::styled(
                app.catalog.title.clone(),
                Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(ref subtitle) = app.catalog.subtitle {
            lines.push(Line::styled(subtitle.clone(), Style::default().fg(theme.muted)));
        }
        let title = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().bg(theme.bg));
        frame.render_widget(title, heading);

        let Some(ref carousel) = app.carousel else {
            return;
        };
        let is_missing = |item: &DisplayItem| app.is_source_missing(item);
        for (row, row_area) in carousel.rows().iter().zip(rows) {
            let widget = MarqueeRowWidget::new(
                &row.engine,
                &app.theme,
                app.config.ui.card_width,
                app.config.ui.card_height,
                &is_missing,
            );
            frame.render_widget(widget, row_area);
        }
    }
}
