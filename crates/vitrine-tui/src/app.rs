use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use ratatui::layout::{Position, Rect};
use tokio::time::Instant;
use tracing::{debug, info};

use vitrine_core::{AppConfig, Carousel, DisplayItem, MarqueeConfig, SiteCatalog, UiConfig};

use crate::theme::Theme;

/// Path of the page that carries the marquee rows
pub const HOME_PATH: &str = "/";

/// Marquee options in terminal cells.
///
/// Keeps the configured velocity in items per second, measured in cards of
/// `card_width + card_gap` cells, and redraws at `marquee_frame_ms`.
pub fn terminal_marquee_config(
    marquee: &MarqueeConfig,
    ui: &UiConfig,
    visible_count: usize,
) -> MarqueeConfig {
    let cell_extent = f64::from(ui.card_width.saturating_add(ui.card_gap).max(1));
    let scale = cell_extent / marquee.effective_item_extent();
    let scaled = MarqueeConfig {
        item_extent: cell_extent,
        step: marquee.effective_step() * scale,
        visible_count,
        ..marquee.clone()
    };

    if ui.marquee_frame_ms == 0 {
        scaled
    } else {
        scaled.with_cadence(Duration::from_millis(ui.marquee_frame_ms))
    }
}

/// Cards needed to cover `width` cells, counting a partial card at each edge
pub fn visible_count_for(width: u16, ui: &UiConfig) -> usize {
    let cell_extent = ui.card_width.saturating_add(ui.card_gap).max(1);
    usize::from(width.div_ceil(cell_extent)) + 1
}

pub struct App {
    pub config: Arc<AppConfig>,
    pub catalog: SiteCatalog,
    pub theme: Theme,
    pub current_path: String,
    /// Mounted only while the home page is shown
    pub carousel: Option<Carousel>,
    /// Screen areas of the marquee rows from the last draw
    pub row_areas: Vec<Rect>,
    pub should_quit: bool,
    visible_count: usize,
    missing_sources: HashSet<String>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, catalog: SiteCatalog, theme: Theme, now: Instant) -> Self {
        let missing_sources = catalog
            .thumbnails
            .iter()
            .filter(|item| !catalog.resolve_source(item).exists())
            .map(|item| item.source().to_string())
            .collect::<HashSet<_>>();
        if !missing_sources.is_empty() {
            info!(
                "{} thumbnail source(s) not found, using fallback cards",
                missing_sources.len()
            );
        }

        let current_path = catalog
            .navigation
            .first()
            .map(|item| item.path.clone())
            .unwrap_or_else(|| HOME_PATH.to_string());

        let mut app = Self {
            visible_count: config.marquee.visible_count,
            config,
            catalog,
            theme,
            current_path,
            carousel: None,
            row_areas: Vec::new(),
            should_quit: false,
            missing_sources,
        };
        if app.is_home() {
            app.mount_carousel(now);
        }
        app
    }

    pub fn is_home(&self) -> bool {
        self.current_path == HOME_PATH
    }

    pub fn current_page_index(&self) -> usize {
        self.catalog.page_index(&self.current_path).unwrap_or(0)
    }

    /// Show the page at `index` in the navigation bar. Leaving the home
    /// page tears its carousel down; coming back builds a fresh one.
    pub fn navigate(&mut self, index: usize, now: Instant) {
        let Some(item) = self.catalog.navigation.get(index) else {
            return;
        };
        if item.path == self.current_path {
            return;
        }

        debug!("Navigating to {}", item.path);
        self.current_path = item.path.clone();
        if self.is_home() {
            self.mount_carousel(now);
        } else {
            self.unmount_carousel();
        }
    }

    pub fn next_page(&mut self, now: Instant) {
        let count = self.catalog.navigation.len().max(1);
        self.navigate((self.current_page_index() + 1) % count, now);
    }

    /// Rebuild the rows when the terminal grew wider than they can fill
    pub fn fit_width(&mut self, width: u16, now: Instant) {
        let needed = visible_count_for(width, &self.config.ui);
        if needed <= self.visible_count {
            return;
        }
        self.visible_count = needed;
        if self.carousel.is_some() {
            debug!("Width {} needs {} visible cards, rebuilding rows", width, needed);
            self.mount_carousel(now);
        }
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    fn mount_carousel(&mut self, now: Instant) {
        self.unmount_carousel();
        let config = terminal_marquee_config(&self.config.marquee, &self.config.ui, self.visible_count);
        self.carousel = Some(Carousel::bidirectional(&self.catalog.thumbnails, &config, now));
    }

    fn unmount_carousel(&mut self) {
        if let Some(mut carousel) = self.carousel.take() {
            carousel.destroy();
        }
        self.row_areas.clear();
    }

    /// Advance the marquee rows to `now`
    pub fn tick(&mut self, now: Instant) {
        if let Some(ref mut carousel) = self.carousel {
            carousel.advance(now);
        }
    }

    /// Route a pointer position to every row: rows under it pause, the
    /// others are told the pointer left.
    pub fn pointer_moved(&mut self, column: u16, row: u16, now: Instant) {
        let Some(ref mut carousel) = self.carousel else {
            return;
        };
        let position = Position::new(column, row);

        for (index, area) in self.row_areas.iter().enumerate() {
            let result = if area.contains(position) {
                carousel.pointer_enter(index, now)
            } else {
                carousel.pointer_leave(index, now)
            };
            if let Err(e) = result {
                debug!("Stale row area {}: {}", index, e);
            }
        }
    }

    /// The pointer left the terminal window: every row resumes
    pub fn pointer_left(&mut self, now: Instant) {
        let Some(ref mut carousel) = self.carousel else {
            return;
        };
        for index in 0..carousel.len() {
            if let Err(e) = carousel.pointer_leave(index, now) {
                debug!("Pointer leave on row {}: {}", index, e);
            }
        }
    }

    /// Earliest instant a row needs to be advanced
    pub fn next_deadline(&self) -> Option<Instant> {
        self.carousel.as_ref().and_then(Carousel::next_deadline)
    }

    /// Whether the thumbnail's image could not be found
    pub fn is_source_missing(&self, item: &DisplayItem) -> bool {
        self.missing_sources.contains(item.source())
    }

    pub fn quit(&mut self) {
        self.unmount_carousel();
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::EngineState;

    fn app(now: Instant) -> App {
        let mut config = AppConfig::default();
        config.marquee.speed_ms = Some(3000);
        config.ui.marquee_frame_ms = 0;
        App::new(
            Arc::new(config),
            SiteCatalog::builtin().unwrap(),
            Theme::default(),
            now,
        )
    }

    fn states(app: &App) -> Vec<EngineState> {
        app.carousel
            .as_ref()
            .map(|c| c.frames().iter().map(|f| f.state).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_terminal_config_scales_to_cells() {
        let ui = UiConfig::default();
        let config = terminal_marquee_config(&MarqueeConfig::default(), &ui, 5);
        assert_eq!(config.item_extent, 28.0);
        assert_eq!(config.visible_count, 5);
        assert_eq!(config.interval(), Duration::from_millis(50));
        // 20/296 cards per second, 28 cells per card
        let expected = 20.0 / 296.0 * 28.0;
        assert!((config.velocity() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_visible_count_for_width() {
        let ui = UiConfig::default();
        assert_eq!(visible_count_for(28, &ui), 2);
        assert_eq!(visible_count_for(100, &ui), 5);
    }

    #[test]
    fn test_home_page_mounts_two_rows() {
        let app = app(Instant::now());
        assert!(app.is_home());
        assert_eq!(states(&app), vec![EngineState::Running, EngineState::Running]);
    }

    #[test]
    fn test_leaving_home_unmounts_rows() {
        let t0 = Instant::now();
        let mut app = app(t0);

        app.next_page(t0);
        assert_eq!(app.current_path, "/action");
        assert!(app.carousel.is_none());
        assert_eq!(app.next_deadline(), None);

        app.navigate(0, t0 + Duration::from_secs(1));
        assert!(app.is_home());
        assert!(app.carousel.is_some());
    }

    #[test]
    fn test_pointer_pauses_only_the_row_under_it() {
        let t0 = Instant::now();
        let mut app = app(t0);
        app.row_areas = vec![Rect::new(0, 5, 80, 6), Rect::new(0, 11, 80, 6)];

        app.pointer_moved(10, 7, t0);
        assert_eq!(states(&app), vec![EngineState::Paused, EngineState::Running]);

        app.pointer_moved(10, 12, t0);
        assert_eq!(states(&app), vec![EngineState::Paused, EngineState::Paused]);

        // Resume commits after the debounce window
        app.pointer_moved(10, 0, t0);
        app.tick(t0 + Duration::from_millis(20));
        assert_eq!(states(&app), vec![EngineState::Running, EngineState::Running]);
    }

    #[test]
    fn test_pointer_on_tick_deadline_keeps_the_tick() {
        let t0 = Instant::now();
        let mut app = app(t0);
        app.row_areas = vec![Rect::new(0, 5, 80, 6), Rect::new(0, 11, 80, 6)];

        // No tick() ran at the deadline; the pointer event collects it
        app.pointer_moved(10, 7, t0 + Duration::from_millis(3000));
        let carousel = app.carousel.as_ref().unwrap();
        assert_eq!(carousel.rows()[0].engine.state(), EngineState::Paused);
        assert_eq!(carousel.rows()[0].engine.ticks(), 1);
        assert_eq!(carousel.rows()[1].engine.ticks(), 1);
    }

    #[test]
    fn test_focus_lost_resumes_every_row() {
        let t0 = Instant::now();
        let mut app = app(t0);
        app.row_areas = vec![Rect::new(0, 5, 80, 6), Rect::new(0, 11, 80, 6)];

        app.pointer_moved(10, 7, t0);
        assert_eq!(states(&app), vec![EngineState::Paused, EngineState::Running]);

        app.pointer_left(t0);
        app.tick(t0 + Duration::from_millis(20));
        assert_eq!(states(&app), vec![EngineState::Running, EngineState::Running]);
    }

    #[test]
    fn test_fit_width_rebuilds_rows() {
        let t0 = Instant::now();
        let mut app = app(t0);
        let before = app.visible_count();

        app.fit_width(10, t0);
        assert_eq!(app.visible_count(), before);

        app.fit_width(400, t0);
        assert!(app.visible_count() > before);
        let carousel = app.carousel.as_ref().unwrap();
        for row in carousel.rows() {
            assert!(row.engine.sequence().len() >= 2 * app.visible_count());
        }
    }

    #[test]
    fn test_builtin_sources_fall_back() {
        let app = app(Instant::now());
        let item = &app.catalog.thumbnails[0];
        assert!(app.is_source_missing(item));
    }

    #[test]
    fn test_quit_tears_down() {
        let mut app = app(Instant::now());
        app.quit();
        assert!(app.should_quit);
        assert!(app.carousel.is_none());
    }
}
