//! Autoplay clock driving marquee ticks at a fixed cadence.
//!
//! The clock never reads the wall clock itself: every call takes the
//! current instant from the caller. Under a paused tokio runtime this makes
//! the whole marquee deterministic, and plain unit tests can simply add
//! durations to a fixed start instant.
//!
//! Pausing discards the time already accrued toward the next tick. Resuming
//! schedules a full interval from the resume instant.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

/// Tick cadence used when the caller does not supply a valid one
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(3000);

/// Resolve a caller-supplied interval in milliseconds.
///
/// Explicit positive values always win. Zero or negative values are a
/// configuration error and fall back to [`DEFAULT_INTERVAL`] rather than
/// scheduling a busy loop.
pub fn resolve_interval(interval_ms: Option<i64>) -> Duration {
    match interval_ms {
        Some(ms) if ms > 0 => Duration::from_millis(ms as u64),
        Some(ms) => {
            warn!(
                "Invalid marquee interval {}ms, using default {}ms",
                ms,
                DEFAULT_INTERVAL.as_millis()
            );
            DEFAULT_INTERVAL
        }
        None => DEFAULT_INTERVAL,
    }
}

/// Identifies one start of the clock. Ticks carrying an older generation
/// than the clock's current one are stale and must be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

/// Interval boundaries crossed since the previous poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: Generation,
    /// Number of whole intervals elapsed (at least one)
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Stopped,
    Running { next_due: Instant },
    Paused,
}

/// Single logical timer owned by one marquee engine.
#[derive(Debug, Clone)]
pub struct AutoplayClock {
    interval: Duration,
    phase: Phase,
    generation: Generation,
}

impl Default for AutoplayClock {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoplayClock {
    /// A stopped clock. Nothing is scheduled until [`start`](Self::start).
    pub fn new() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            phase: Phase::Stopped,
            generation: Generation::default(),
        }
    }

    /// Start ticking every `interval`, first tick due at `now + interval`.
    ///
    /// Restarting a running clock begins a new generation, so ticks taken
    /// from the previous run are rejected by [`is_current`](Self::is_current).
    pub fn start(&mut self, interval: Duration, now: Instant) -> Generation {
        self.interval = if interval.is_zero() {
            warn!(
                "Zero marquee interval, using default {}ms",
                DEFAULT_INTERVAL.as_millis()
            );
            DEFAULT_INTERVAL
        } else {
            interval
        };
        self.generation = Generation(self.generation.0 + 1);
        self.phase = Phase::Running {
            next_due: now + self.interval,
        };
        debug!(
            "Autoplay clock started: interval={}ms generation={}",
            self.interval.as_millis(),
            self.generation.0
        );
        self.generation
    }

    /// Suspend ticking. Time accrued toward the next tick is dropped.
    /// No-op unless running.
    pub fn pause(&mut self) {
        if let Phase::Running { .. } = self.phase {
            self.phase = Phase::Paused;
        }
    }

    /// Resume ticking with a full interval from `now`. No-op unless paused.
    pub fn resume(&mut self, now: Instant) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Running {
                next_due: now + self.interval,
            };
        }
    }

    /// Release the timer. Any tick produced before this call is stale
    /// afterwards, and `poll` returns nothing until the next `start`.
    pub fn stop(&mut self) {
        if self.phase != Phase::Stopped {
            debug!("Autoplay clock stopped: generation={}", self.generation.0);
        }
        self.phase = Phase::Stopped;
        self.generation = Generation(self.generation.0 + 1);
    }

    /// Collect the ticks due at `now`.
    ///
    /// Several elapsed intervals are folded into one [`Tick`] with a count,
    /// and the next deadline stays on the original cadence.
    pub fn poll(&mut self, now: Instant) -> Option<Tick> {
        let Phase::Running { next_due } = self.phase else {
            return None;
        };
        if now < next_due {
            return None;
        }

        let step = self.interval.as_nanos();
        let late = now.duration_since(next_due).as_nanos();
        let count = 1 + late / step;
        let advance = u64::try_from(step.saturating_mul(count)).unwrap_or(u64::MAX);

        self.phase = Phase::Running {
            next_due: next_due + Duration::from_nanos(advance),
        };

        Some(Tick {
            generation: self.generation,
            count: u64::try_from(count).unwrap_or(u64::MAX),
        })
    }

    /// Instant of the next scheduled tick, if running
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Running { next_due } => Some(next_due),
            _ => None,
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Whether a tick from `generation` may still be applied
    #[inline]
    pub fn is_current(&self, generation: Generation) -> bool {
        self.phase != Phase::Stopped && generation == self.generation
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.phase == Phase::Stopped
    }
}
