use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Terminal,
};
use tokio::time::Instant;
use tracing::info;

use vitrine_core::{AppConfig, SiteCatalog};
use vitrine_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    widgets::{ActionPageWidget, HomePageWidget, NavBarWidget, StatusBarWidget},
    Theme,
};

pub async fn run(config: Arc<AppConfig>, catalog: SiteCatalog) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        SetTitle(catalog.title.as_str())
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, config, catalog);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: Arc<AppConfig>,
    catalog: SiteCatalog,
) -> Result<()> {
    let event_handler = EventHandler::new(config.ui.tick_rate_ms);
    let mut app = App::new(config, catalog, Theme::default(), Instant::now());

    let size = terminal.size()?;
    app.fit_width(size.width, Instant::now());
    info!("Terminal UI started ({}x{})", size.width, size.height);

    loop {
        app.tick(Instant::now());

        terminal.draw(|frame| {
            let area = frame.area();
            frame.render_widget(Block::default().style(Style::default().bg(app.theme.bg)), area);

            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(2),
                    Constraint::Min(0),
                    Constraint::Length(1),
                ])
                .split(area);

            NavBarWidget::render(frame, layout[0], &app);
            if app.is_home() {
                HomePageWidget::render(frame, layout[1], &mut app);
            } else {
                ActionPageWidget::render(frame, layout[1], &app);
            }
            StatusBarWidget::render(frame, layout[2], &app);
        })?;

        if let Some(event) = event_handler.next(app.next_deadline())? {
            let now = Instant::now();
            match event {
                AppEvent::Key(key) => match handle_key_event(key) {
                    Action::Quit => app.quit(),
                    Action::NextPage => app.next_page(now),
                    Action::SelectPage(index) => app.navigate(index, now),
                    Action::None => {}
                },
                AppEvent::PointerMoved { column, row } => app.pointer_moved(column, row, now),
                AppEvent::PointerLeft => app.pointer_left(now),
                AppEvent::Resize(width, _) => app.fit_width(width, now),
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    info!("Terminal UI stopped");
    Ok(())
}
