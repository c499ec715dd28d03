use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use vitrine_core::{DisplayItem, MarqueeEngine};

use super::card::{card_lines, draw_clipped};
use crate::theme::Theme;

/// One scrolling strip of cards.
///
/// Stateless: everything it draws comes from the engine's frame and
/// sequence. Card `i` sits at `i * extent + offset`, wrapped around the
/// strip, so the loop has no seam.
pub struct MarqueeRowWidget<'a> {
    engine: &'a MarqueeEngine,
    theme: &'a Theme,
    card_width: u16,
    card_height: u16,
    is_missing: &'a dyn Fn(&DisplayItem) -> bool,
}

impl<'a> MarqueeRowWidget<'a> {
    pub fn new(
        engine: &'a MarqueeEngine,
        theme: &'a Theme,
        card_width: u16,
        card_height: u16,
        is_missing: &'a dyn Fn(&DisplayItem) -> bool,
    ) -> Self {
        Self {
            engine,
            theme,
            card_width,
            card_height,
            is_missing,
        }
    }

    /// Left column of every card copy that overlaps `[0, width)`
    pub fn card_positions(&self, width: u16) -> Vec<(usize, i32)> {
        let frame = self.engine.frame();
        let strip = frame.extent.round() as i32;
        let pitch = self.engine.item_extent().round() as i32;
        if strip <= 0 || pitch <= 0 {
            return Vec::new();
        }

        let shift = frame.normalized_offset.floor() as i32;
        let width = i32::from(width);
        let card = i32::from(self.card_width);
        let mut positions = Vec::new();

        for index in 0..self.engine.sequence().len() {
            let base = index as i32 * pitch + shift;
            for copy in [-1, 0, 1] {
                let x = base + copy * strip;
                if x + card > 0 && x < width {
                    positions.push((index, x));
                }
            }
        }
        positions.sort_by_key(|&(_, x)| x);
        positions
    }
}

impl Widget for MarqueeRowWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.theme.bg));

        let highlighted = !self.engine.is_running();
        let top = area.y + area.height.saturating_sub(self.card_height) / 2;

        for (index, x) in self.card_positions(area.width) {
            let Some(item) = self.engine.sequence().get(index) else {
                continue;
            };
            let lines = card_lines(
                item,
                (self.is_missing)(item),
                self.card_width,
                self.card_height.min(area.height),
                self.theme,
                highlighted,
            );
            draw_clipped(buf, &lines, i32::from(area.x) + x, top, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::Instant;
    use vitrine_core::{Direction, MarqueeConfig};

    fn items() -> Vec<DisplayItem> {
        (1..=4)
            .map(|i| DisplayItem::new(format!("/t{}.jpg", i), format!("Alt {}", i)).with_title(format!("Card {}", i)))
            .collect()
    }

    fn engine(direction: Direction, now: Instant) -> MarqueeEngine {
        let config = MarqueeConfig {
            direction,
            speed_ms: Some(100),
            step: 3.0,
            item_extent: 12.0,
            visible_count: 3,
            ..Default::default()
        };
        MarqueeEngine::new(&items(), &config, now)
    }

    fn never_missing(_: &DisplayItem) -> bool {
        false
    }

    #[test]
    fn test_positions_follow_offset() {
        let t0 = Instant::now();
        let mut forward = engine(Direction::Forward, t0);
        let theme = Theme::default();

        let before = MarqueeRowWidget::new(&forward, &theme, 10, 5, &never_missing).card_positions(30);
        assert_eq!(before.first(), Some(&(0, 0)));

        forward.advance(t0 + Duration::from_millis(100));
        let after = MarqueeRowWidget::new(&forward, &theme, 10, 5, &never_missing).card_positions(30);
        assert!(after.iter().any(|&(i, x)| i == 0 && x == 3));
    }

    #[test]
    fn test_reverse_moves_left_and_wraps() {
        let t0 = Instant::now();
        let mut reverse = engine(Direction::Reverse, t0);
        let theme = Theme::default();
        reverse.advance(t0 + Duration::from_millis(100));

        let positions = MarqueeRowWidget::new(&reverse, &theme, 10, 5, &never_missing).card_positions(30);
        // Card 0 slid 3 columns left and is partly off screen
        assert!(positions.contains(&(0, -3)));
        // The strip (8 cards * 12 = 96 columns) wraps, so the left edge is always covered
        assert!(positions.iter().any(|&(_, x)| x <= 0));
    }

    #[test]
    fn test_render_fills_row_without_gaps() {
        let t0 = Instant::now();
        let mut forward = engine(Direction::Forward, t0);
        forward.advance(t0 + Duration::from_millis(700));
        let theme = Theme::default();

        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        MarqueeRowWidget::new(&forward, &theme, 10, 5, &never_missing).render(area, &mut buf);

        // Every pitch of 12 columns starts a card frame somewhere on the top line
        let top: String = (0..40).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(top.matches('╭').count() >= 3, "top line: {}", top);
    }

    #[test]
    fn test_idle_engine_draws_nothing() {
        let t0 = Instant::now();
        let idle = MarqueeEngine::new(&[], &MarqueeConfig::default(), t0);
        let theme = Theme::default();
        let widget = MarqueeRowWidget::new(&idle, &theme, 10, 5, &never_missing);
        assert!(widget.card_positions(80).is_empty());
    }
}
