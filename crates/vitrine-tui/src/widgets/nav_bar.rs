use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use vitrine_core::SiteCatalog;

use crate::app::App;

pub struct NavBarWidget;

impl NavBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mut spans = Vec::new();

        for (i, item) in app.catalog.navigation.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", Style::default().bg(theme.bg)));
            }
            let style = if SiteCatalog::is_active(item, &app.current_path) {
                Style::default()
                    .fg(theme.active_fg)
                    .bg(theme.active_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted).bg(theme.bg)
            };
            spans.push(Span::styled(format!(" {} {} ", i + 1, item.label), style));
        }

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.bg));

        let paragraph = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
    }
}
