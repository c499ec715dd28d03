//! Thumbnail card drawn as a framed text block.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use vitrine_core::DisplayItem;

use crate::theme::Theme;

/// Label of the placeholder drawn in place of a broken image
pub const FALLBACK_LABEL: &str = "Exemple de tromperie";

/// Truncate or pad `text` to exactly `width` display columns
pub fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;

    if text.width() <= width {
        out.push_str(text);
        used = text.width();
    } else if width > 0 {
        for c in text.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width - 1 {
                break;
            }
            out.push(c);
            used += w;
        }
        out.push('…');
        used += 1;
    }

    out.extend(std::iter::repeat(' ').take(width.saturating_sub(used)));
    out
}

/// Greedy word wrap into at most `max_lines` lines of `width` columns
fn wrap(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if candidate.width() <= width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            last.push_str(" …");
        }
    }
    lines
}

/// Lines of a card, each exactly `width` columns wide and `height` lines
/// tall. Cards narrower than 4 columns or shorter than 3 lines are blank.
pub fn card_lines(
    item: &DisplayItem,
    fallback: bool,
    width: u16,
    height: u16,
    theme: &Theme,
    highlighted: bool,
) -> Vec<Line<'static>> {
    let width = usize::from(width);
    let height = usize::from(height);
    let blank = Style::default().bg(theme.bg);
    if width < 4 || height < 3 {
        return (0..height).map(|_| Line::styled(" ".repeat(width), blank)).collect();
    }

    let inner = width - 2;
    let frame_style = Style::default()
        .fg(if highlighted { theme.highlight } else { theme.border })
        .bg(theme.bg);
    let framed = |content: String, style: Style| {
        Line::from(vec![
            Span::styled("│", frame_style),
            Span::styled(fit(&content, inner), style),
            Span::styled("│", frame_style),
        ])
    };

    let mut body: Vec<Line<'static>> = Vec::new();
    if fallback {
        body.push(framed(
            format!(" {}", FALLBACK_LABEL),
            Style::default().fg(theme.fallback_fg).bg(theme.fallback_bg),
        ));
    } else {
        body.push(framed(
            format!(" ▣ {}", item.alt_text()),
            Style::default().fg(theme.muted).bg(theme.bg),
        ));
    }
    body.push(framed(
        format!(" {}", item.label()),
        Style::default()
            .fg(theme.fg)
            .bg(theme.bg)
            .add_modifier(Modifier::BOLD),
    ));

    let remaining = height.saturating_sub(2 + body.len());
    if let Some(description) = item.description() {
        for line in wrap(description, inner.saturating_sub(1), remaining) {
            body.push(framed(
                format!(" {}", line),
                Style::default().fg(theme.muted).bg(theme.bg),
            ));
        }
    }

    let mut lines = Vec::with_capacity(height);
    lines.push(Line::styled(format!("╭{}╮", "─".repeat(inner)), frame_style));
    for line in body.into_iter().take(height - 2) {
        lines.push(line);
    }
    while lines.len() < height - 1 {
        lines.push(framed(String::new(), blank));
    }
    lines.push(Line::styled(format!("╰{}╯", "─".repeat(inner)), frame_style));
    lines
}

/// Draw `lines` with their top-left corner at column `x` (possibly off
/// screen), clipped to `clip`.
pub fn draw_clipped(buf: &mut Buffer, lines: &[Line<'_>], x: i32, y: u16, clip: Rect) {
    let left = i32::from(clip.x);
    let right = i32::from(clip.right());

    for (dy, line) in lines.iter().enumerate() {
        let row = y.saturating_add(dy as u16);
        if row < clip.y || row >= clip.bottom() {
            continue;
        }
        let mut col = x;
        for span in &line.spans {
            let style = line.style.patch(span.style);
            for c in span.content.chars() {
                let w = c.width().unwrap_or(0) as i32;
                if w == 0 {
                    continue;
                }
                if col >= left && col + w <= right {
                    if let Some(cell) = buf.cell_mut((col as u16, row)) {
                        cell.set_char(c).set_style(style);
                    }
                }
                col += w;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> DisplayItem {
        DisplayItem::new("/missing.jpg", "Test thumbnail 1")
            .with_title("Test 1")
            .with_description("Miniature négative mais contenu positif")
    }

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("Échec", 5), "Échec");
        assert_eq!(fit("", 0), "");
    }

    #[test]
    fn test_card_dimensions() {
        let theme = Theme::default();
        let lines = card_lines(&item(), false, 20, 6, &theme, false);
        assert_eq!(lines.len(), 6);
        for line in &lines {
            assert_eq!(text(line).width(), 20);
        }
        assert!(text(&lines[0]).starts_with('╭'));
        assert!(text(&lines[5]).starts_with('╰'));
        assert!(text(&lines[2]).contains("Test 1"));
    }

    #[test]
    fn test_fallback_card_shows_placeholder() {
        let theme = Theme::default();
        let lines = card_lines(&item(), true, 26, 6, &theme, false);
        assert!(text(&lines[1]).contains(FALLBACK_LABEL));
    }

    #[test]
    fn test_tiny_card_is_blank() {
        let theme = Theme::default();
        let lines = card_lines(&item(), false, 3, 2, &theme, false);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| text(l).trim().is_empty()));
    }

    #[test]
    fn test_draw_clipped_cuts_off_screen_columns() {
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        let lines = vec![Line::from("abcdef")];

        draw_clipped(&mut buf, &lines, -3, 0, area);
        assert_eq!(buf[(0, 0)].symbol(), "d");
        assert_eq!(buf[(2, 0)].symbol(), "f");
        assert_eq!(buf[(3, 0)].symbol(), " ");

        draw_clipped(&mut buf, &lines, 7, 0, area);
        assert_eq!(buf[(7, 0)].symbol(), "a");
        assert_eq!(buf[(9, 0)].symbol(), "c");
    }
}
