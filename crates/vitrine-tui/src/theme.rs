use ratatui::style::Color;

/// Colors of the showcase: a black page with white text and grey chrome
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    /// Secondary text (descriptions, alt text)
    pub muted: Color,
    /// Navigation bar bottom border and card frames
    pub border: Color,
    /// Active navigation pill
    pub active_bg: Color,
    pub active_fg: Color,
    /// Card frame while its row is hovered
    pub highlight: Color,
    /// Placeholder shown when a thumbnail cannot be loaded
    pub fallback_bg: Color,
    pub fallback_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            muted: Color::Rgb(0xd1, 0xd5, 0xdb),
            border: Color::Rgb(0x37, 0x41, 0x51),
            active_bg: Color::Rgb(0x1f, 0x29, 0x37),
            active_fg: Color::Rgb(0xe5, 0xe7, 0xeb),
            highlight: Color::Rgb(0x9c, 0xa3, 0xaf),
            fallback_bg: Color::Rgb(0x33, 0x33, 0x33),
            fallback_fg: Color::Rgb(0x99, 0x99, 0x99),
        }
    }
}
