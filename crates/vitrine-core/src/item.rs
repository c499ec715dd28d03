//! Display items and scroll direction shared by the marquee and the grid.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single thumbnail shown in a marquee row or the static grid.
///
/// Items are immutable once built. Their identity inside a marquee is
/// positional (see [`crate::Sequence::key`]), never by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayItem {
    #[serde(alias = "src")]
    source: String,
    #[serde(alias = "alt")]
    alt_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl DisplayItem {
    pub fn new(source: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            alt_text: alt_text.into(),
            title: None,
            description: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Image location (path or URI)
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn alt_text(&self) -> &str {
        &self.alt_text
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Caption to show on a card: the title, or the alt text when untitled
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.alt_text)
    }
}

/// Scroll direction of a marquee row.
///
/// Fixed for the lifetime of an engine; changing it means building a new
/// engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Offset grows each tick (strip moves right)
    #[default]
    #[serde(rename = "right", alias = "forward")]
    Forward,
    /// Offset shrinks each tick (strip moves left)
    #[serde(rename = "left", alias = "reverse")]
    Reverse,
}

impl Direction {
    /// Sign applied to the per-tick step
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Reverse => -1.0,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => f.write_str("right"),
            Direction::Reverse => f.write_str("left"),
        }
    }
}
