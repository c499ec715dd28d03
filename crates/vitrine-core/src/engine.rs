//! Marquee engine: the state machine behind one scrolling row.
//!
//! ```text
//! Idle ──────────────────────────────┐
//! Running ⇄ Paused                   ├──> Destroyed
//! ───────────────────────────────────┘
//! ```
//!
//! The engine is mutated only by clock ticks ([`MarqueeEngine::advance`] /
//! [`MarqueeEngine::apply`]) and pointer transitions ([`MarqueeEngine::pause`] /
//! [`MarqueeEngine::resume`]), always from a single caller. Renderers read a
//! [`MarqueeFrame`], which only ever carries a normalized offset.

use serde::Serialize;
use tokio::time::Instant;
use tracing::debug;

use crate::clock::{AutoplayClock, Tick};
use crate::config::MarqueeConfig;
use crate::item::{Direction, DisplayItem};
use crate::sequence::{build_sequence, Sequence};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    /// No items: nothing rendered, no timer
    Idle,
    /// Autoplay active
    Running,
    /// Autoplay suspended, offset frozen
    Paused,
    /// Torn down; terminal
    Destroyed,
}

/// What a renderer needs to position the strip
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarqueeFrame {
    /// Offset in `[0, extent)`, or 0 when the strip is empty
    pub normalized_offset: f64,
    /// Length of the whole strip
    pub extent: f64,
    pub direction: Direction,
    pub running: bool,
    pub state: EngineState,
}

#[derive(Debug, Clone)]
pub struct MarqueeEngine {
    sequence: Sequence,
    direction: Direction,
    step: f64,
    item_extent: f64,
    pause_on_hover: bool,
    clock: AutoplayClock,
    /// Always kept in `[0, extent)`
    offset: f64,
    ticks: u64,
    state: EngineState,
}

impl MarqueeEngine {
    /// Build the strip for `items` and start autoplay.
    ///
    /// An empty list leaves the engine idle with no timer scheduled.
    pub fn new(items: &[DisplayItem], config: &MarqueeConfig, now: Instant) -> Self {
        let sequence = build_sequence(items, config.effective_visible_count(), config.auto_fill);
        let mut clock = AutoplayClock::new();

        let state = if sequence.is_empty() {
            debug!("Marquee has no items, staying idle");
            EngineState::Idle
        } else {
            clock.start(config.interval(), now);
            debug!(
                "Marquee started: {} items ({}x{}), direction={}",
                sequence.len(),
                sequence.repetitions(),
                sequence.source_len(),
                config.direction
            );
            EngineState::Running
        };

        Self {
            sequence,
            direction: config.direction,
            step: config.effective_step(),
            item_extent: config.effective_item_extent(),
            pause_on_hover: config.pause_on_hover,
            clock,
            offset: 0.0,
            ticks: 0,
            state,
        }
    }

    /// Apply every tick due at `now`. Returns the number of ticks applied.
    pub fn advance(&mut self, now: Instant) -> u64 {
        if self.state != EngineState::Running {
            return 0;
        }
        match self.clock.poll(now) {
            Some(tick) if self.apply(tick) => tick.count,
            _ => 0,
        }
    }

    /// Apply a tick taken from this engine's clock.
    ///
    /// Ticks from a previous clock generation, or arriving while the engine
    /// is not running, are ignored.
    pub fn apply(&mut self, tick: Tick) -> bool {
        if self.state != EngineState::Running || !self.clock.is_current(tick.generation) {
            return false;
        }

        let extent = self.extent();
        let travel = (self.step * tick.count as f64) % extent;
        self.offset = normalize(self.offset + self.direction.sign() * travel, extent);
        self.ticks = self.ticks.saturating_add(tick.count);
        true
    }

    /// Freeze the strip in place. No-op unless running.
    pub fn pause(&mut self) {
        if self.state == EngineState::Running {
            self.clock.pause();
            self.state = EngineState::Paused;
            debug!("Marquee paused at offset {:.2}", self.offset);
        }
    }

    /// Continue from the frozen offset; the next tick is a full interval
    /// after `now`. No-op unless paused.
    pub fn resume(&mut self, now: Instant) {
        if self.state == EngineState::Paused {
            self.clock.resume(now);
            self.state = EngineState::Running;
            debug!("Marquee resumed at offset {:.2}", self.offset);
        }
    }

    /// Stop the clock and drop the strip. Nothing can change the engine
    /// afterwards.
    pub fn destroy(&mut self) {
        if self.state == EngineState::Destroyed {
            return;
        }
        self.clock.stop();
        self.sequence = Sequence::default();
        self.offset = 0.0;
        self.state = EngineState::Destroyed;
        debug!("Marquee destroyed");
    }

    pub fn frame(&self) -> MarqueeFrame {
        MarqueeFrame {
            normalized_offset: self.normalized_offset(),
            extent: self.extent(),
            direction: self.direction,
            running: self.is_running(),
            state: self.state,
        }
    }

    #[inline]
    pub fn normalized_offset(&self) -> f64 {
        self.offset
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    #[inline]
    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Length of the whole strip
    pub fn extent(&self) -> f64 {
        self.sequence.extent(self.item_extent)
    }

    pub fn item_extent(&self) -> f64 {
        self.item_extent
    }

    pub fn pauses_on_hover(&self) -> bool {
        self.pause_on_hover
    }

    /// When the next tick is due, if the clock is running
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            EngineState::Running => self.clock.next_deadline(),
            _ => None,
        }
    }

    /// Ticks applied since creation
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Signed total distance travelled, before wrapping
    pub fn displacement(&self) -> f64 {
        self.direction.sign() * self.step * self.ticks as f64
    }
}

/// Wrap `value` into `[0, extent)`. Empty strips have no extent and pin the
/// offset to zero.
fn normalize(value: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        return 0.0;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round a tiny negative up to `extent` itself
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}
