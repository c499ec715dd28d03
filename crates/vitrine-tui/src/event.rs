use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use tokio::time::Instant;

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// The pointer moved to a cell
    PointerMoved { column: u16, row: u16 },
    /// The terminal lost focus; the pointer is no longer over any row
    PointerLeft,
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms.max(1)),
        }
    }

    /// How long to wait for input: the tick rate, shortened so a marquee
    /// deadline is never overslept
    pub fn timeout(&self, now: Instant, deadline: Option<Instant>) -> Duration {
        match deadline {
            Some(deadline) => deadline.saturating_duration_since(now).min(self.tick_rate),
            None => self.tick_rate,
        }
    }

    /// Poll for the next event, waking by `deadline` at the latest
    pub fn next(&self, deadline: Option<Instant>) -> Result<Option<AppEvent>> {
        let timeout = self.timeout(Instant::now(), deadline);
        if event::poll(timeout)? {
            Ok(map_event(event::read()?))
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

fn map_event(event: Event) -> Option<AppEvent> {
    match event {
        // Only handle key press events, ignore release events
        // (crossterm 0.27+ sends release events on some systems)
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Mouse(mouse) => pointer_event(mouse),
        Event::FocusLost => Some(AppEvent::PointerLeft),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

/// Any mouse activity tells us where the pointer is
fn pointer_event(mouse: MouseEvent) -> Option<AppEvent> {
    match mouse.kind {
        MouseEventKind::Moved
        | MouseEventKind::Drag(_)
        | MouseEventKind::Down(_)
        | MouseEventKind::Up(_) => Some(AppEvent::PointerMoved {
            column: mouse.column,
            row: mouse.row,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton};

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 12,
            row: 7,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_timeout_respects_deadline() {
        let handler = EventHandler::new(250);
        let now = Instant::now();

        assert_eq!(handler.timeout(now, None), Duration::from_millis(250));
        assert_eq!(
            handler.timeout(now, Some(now + Duration::from_millis(40))),
            Duration::from_millis(40)
        );
        assert_eq!(
            handler.timeout(now, Some(now + Duration::from_secs(3))),
            Duration::from_millis(250)
        );
        // Overdue deadlines poll without waiting
        assert_eq!(handler.timeout(now + Duration::from_secs(1), Some(now)), Duration::ZERO);
    }

    #[test]
    fn test_mouse_motion_becomes_pointer_event() {
        match pointer_event(mouse(MouseEventKind::Moved)) {
            Some(AppEvent::PointerMoved { column, row }) => assert_eq!((column, row), (12, 7)),
            other => panic!("unexpected {:?}", other),
        }
        assert!(pointer_event(mouse(MouseEventKind::Down(MouseButton::Left))).is_some());
        assert!(pointer_event(mouse(MouseEventKind::ScrollDown)).is_none());
    }

    #[test]
    fn test_focus_lost_becomes_pointer_left() {
        assert!(matches!(map_event(Event::FocusLost), Some(AppEvent::PointerLeft)));
        assert!(map_event(Event::FocusGained).is_none());
        assert!(matches!(map_event(Event::Resize(80, 24)), Some(AppEvent::Resize(80, 24))));
    }
}
