//! Pointer controller: turns enter/leave on a row into pause/resume.
//!
//! A leave is held back for one debounce window. If the pointer re-enters
//! inside that window (flicker across card borders) the pending resume is
//! dropped and the row never restarts its interval.

use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

use crate::engine::{EngineState, MarqueeEngine};

/// One animation frame at 60 fps
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(16);

#[derive(Debug, Clone)]
pub struct HoverController {
    debounce: Duration,
    hovered: bool,
    pending_resume: Option<Instant>,
}

impl Default for HoverController {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl HoverController {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            hovered: false,
            pending_resume: None,
        }
    }

    /// Pointer entered the row's outer region
    pub fn pointer_enter(&mut self, engine: &mut MarqueeEngine) {
        if !engine.pauses_on_hover() || self.hovered {
            return;
        }
        self.hovered = true;

        if self.pending_resume.take().is_some() {
            trace!("Pointer re-entered within debounce, resume cancelled");
            return;
        }
        engine.pause();
    }

    /// Pointer left the row's outer region
    pub fn pointer_leave(&mut self, engine: &mut MarqueeEngine, now: Instant) {
        if engine.state() == EngineState::Destroyed {
            self.reset();
            return;
        }
        if !engine.pauses_on_hover() || !self.hovered {
            return;
        }
        self.hovered = false;

        if self.debounce.is_zero() {
            engine.resume(now);
        } else {
            self.pending_resume = Some(now + self.debounce);
        }
    }

    /// Commit a pending resume once its debounce window has passed.
    ///
    /// The clock restarts from the end of the window, not from `now`, so a
    /// late poll does not stretch the first interval.
    pub fn poll(&mut self, engine: &mut MarqueeEngine, now: Instant) -> bool {
        match self.pending_resume {
            Some(due) if now >= due => {
                self.pending_resume = None;
                engine.resume(due);
                true
            }
            _ => false,
        }
    }

    /// Forget the pointer and any pending resume
    pub fn reset(&mut self) {
        self.hovered = false;
        self.pending_resume = None;
    }

    /// When the pending resume becomes due, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending_resume
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn has_pending_resume(&self) -> bool {
        self.pending_resume.is_some()
    }
}
