//! Independent marquee rows shown together on a page.
//!
//! Each row owns its engine and pointer controller. Rows share nothing, so
//! hovering one row never touches another row's offset or timing.

use tokio::time::Instant;

use crate::config::MarqueeConfig;
use crate::engine::{MarqueeEngine, MarqueeFrame};
use crate::error::{Error, Result};
use crate::hover::HoverController;
use crate::item::{Direction, DisplayItem};

/// The top row of the home page shows at most this many items
pub const TOP_ROW_LIMIT: usize = 8;

#[derive(Debug, Clone)]
pub struct CarouselRow {
    pub engine: MarqueeEngine,
    pub hover: HoverController,
}

impl CarouselRow {
    pub fn new(items: &[DisplayItem], config: &MarqueeConfig, now: Instant) -> Self {
        Self {
            engine: MarqueeEngine::new(items, config, now),
            hover: HoverController::new(config.hover_debounce()),
        }
    }

    /// Commit due resumes, then due ticks. Returns ticks applied.
    pub fn advance(&mut self, now: Instant) -> u64 {
        self.hover.poll(&mut self.engine, now);
        self.engine.advance(now)
    }

    /// Pointer entered the row. Ticks already due at `now` land first, so
    /// the row freezes on the tick boundary it reached.
    pub fn pointer_enter(&mut self, now: Instant) -> u64 {
        let ticks = self.advance(now);
        self.hover.pointer_enter(&mut self.engine);
        ticks
    }

    pub fn pointer_leave(&mut self, now: Instant) -> u64 {
        let ticks = self.advance(now);
        self.hover.pointer_leave(&mut self.engine, now);
        ticks
    }

    /// Stop the engine and drop any pending hover resume
    pub fn destroy(&mut self) {
        self.hover.reset();
        self.engine.destroy();
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.engine.next_deadline(), self.hover.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Carousel {
    rows: Vec<CarouselRow>,
}

impl Carousel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Home page layout: the first [`TOP_ROW_LIMIT`] items scrolling right
    /// above every item scrolling left.
    pub fn bidirectional(items: &[DisplayItem], config: &MarqueeConfig, now: Instant) -> Self {
        let top = &items[..items.len().min(TOP_ROW_LIMIT)];
        Self::new()
            .with_row(top, &config.clone().with_direction(Direction::Forward), now)
            .with_row(items, &config.clone().with_direction(Direction::Reverse), now)
    }

    pub fn with_row(mut self, items: &[DisplayItem], config: &MarqueeConfig, now: Instant) -> Self {
        self.push_row(items, config, now);
        self
    }

    /// Add a row; returns its index
    pub fn push_row(&mut self, items: &[DisplayItem], config: &MarqueeConfig, now: Instant) -> usize {
        self.rows.push(CarouselRow::new(items, config, now));
        self.rows.len() - 1
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[CarouselRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Result<&CarouselRow> {
        self.rows.get(index).ok_or(Error::RowNotFound(index))
    }

    fn row_mut(&mut self, index: usize) -> Result<&mut CarouselRow> {
        self.rows.get_mut(index).ok_or(Error::RowNotFound(index))
    }

    /// Advance every row to `now`. Returns ticks applied per row.
    pub fn advance(&mut self, now: Instant) -> Vec<u64> {
        self.rows.iter_mut().map(|row| row.advance(now)).collect()
    }

    /// Pointer entered row `index` at `now`. Returns ticks that were
    /// already due and got applied before the pause.
    pub fn pointer_enter(&mut self, index: usize, now: Instant) -> Result<u64> {
        Ok(self.row_mut(index)?.pointer_enter(now))
    }

    pub fn pointer_leave(&mut self, index: usize, now: Instant) -> Result<u64> {
        Ok(self.row_mut(index)?.pointer_leave(now))
    }

    pub fn frames(&self) -> Vec<MarqueeFrame> {
        self.rows.iter().map(|row| row.engine.frame()).collect()
    }

    /// Earliest instant at which any row has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        self.rows.iter().filter_map(CarouselRow::next_deadline).min()
    }

    /// Tear down every row
    pub fn destroy(&mut self) {
        for row in &mut self.rows {
            row.destroy();
        }
    }
}
