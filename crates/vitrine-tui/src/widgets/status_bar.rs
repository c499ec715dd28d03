use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use vitrine_core::EngineState;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let page = app
            .catalog
            .navigation
            .get(app.current_page_index())
            .map(|item| item.label.as_str())
            .unwrap_or("");

        let rows = app
            .carousel
            .as_ref()
            .map(|carousel| {
                carousel
                    .frames()
                    .iter()
                    .map(|f| match f.state {
                        EngineState::Running => format!("{}", f.direction),
                        EngineState::Paused => "paused".to_string(),
                        EngineState::Idle => "idle".to_string(),
                        EngineState::Destroyed => "stopped".to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(" / ")
            })
            .unwrap_or_default();

        let status_text = if rows.is_empty() {
            format!(" {}", page)
        } else {
            format!(" {} | rows: {}", page, rows)
        };

        let help_hint = " q:quit tab:next page 1-9:page ";
        let padding_len = usize::from(area.width)
            .saturating_sub(status_text.chars().count() + help_hint.len());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg).bg(theme.active_bg)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.active_bg)),
            Span::styled(help_hint, Style::default().fg(theme.muted).bg(theme.active_bg)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
