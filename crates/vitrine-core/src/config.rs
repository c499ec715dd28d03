use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::clock::resolve_interval;
use crate::grid::GridColumns;
use crate::item::Direction;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub marquee: MarqueeConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log files)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Site catalog to load instead of the built-in one
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            catalog_path: None,
        }
    }
}

/// Upper bound on `visible_count`; larger values are capped
pub const MAX_VISIBLE_COUNT: usize = 1024;

/// Options recognized by a marquee row.
///
/// Distances are abstract units; the defaults describe a 256-unit card with
/// 20 units of margin on each side, scrolling at 20 units per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarqueeConfig {
    /// Scroll direction ("right" or "left")
    #[serde(default)]
    pub direction: Direction,
    /// Tick interval in milliseconds. Missing, zero or negative values use
    /// the 3000ms default.
    #[serde(default)]
    pub speed_ms: Option<i64>,
    /// Distance travelled per tick
    #[serde(default = "default_step")]
    pub step: f64,
    /// Distance occupied by one item, margins included
    #[serde(default = "default_item_extent")]
    pub item_extent: f64,
    /// Items visible at once; auto-fill covers twice this many
    #[serde(default = "default_visible_count")]
    pub visible_count: usize,
    /// Repeat the item list so a loop never exposes a gap
    #[serde(default = "default_true")]
    pub auto_fill: bool,
    /// Pause while the pointer is over the row
    #[serde(default = "default_true")]
    pub pause_on_hover: bool,
    /// Delay before a pointer leave resumes scrolling (one frame)
    #[serde(default = "default_hover_debounce")]
    pub hover_debounce_ms: u64,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            speed_ms: None,
            step: default_step(),
            item_extent: default_item_extent(),
            visible_count: default_visible_count(),
            auto_fill: default_true(),
            pause_on_hover: default_true(),
            hover_debounce_ms: default_hover_debounce(),
        }
    }
}

impl MarqueeConfig {
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Clock interval after falling back from invalid values
    pub fn interval(&self) -> Duration {
        resolve_interval(self.speed_ms)
    }

    /// Per-tick distance, falling back to the default when not a positive
    /// finite number
    pub fn effective_step(&self) -> f64 {
        positive_or(self.step, default_step())
    }

    /// Per-item distance, falling back to the default when not a positive
    /// finite number
    pub fn effective_item_extent(&self) -> f64 {
        positive_or(self.item_extent, default_item_extent())
    }

    /// Visible count, capped at [`MAX_VISIBLE_COUNT`]
    pub fn effective_visible_count(&self) -> usize {
        self.visible_count.min(MAX_VISIBLE_COUNT)
    }

    pub fn hover_debounce(&self) -> Duration {
        Duration::from_millis(self.hover_debounce_ms)
    }

    /// Distance per second implied by step and interval
    pub fn velocity(&self) -> f64 {
        self.effective_step() / self.interval().as_secs_f64()
    }

    /// Same velocity at a different tick cadence.
    ///
    /// Renderers that redraw every frame use this to get small, frequent
    /// steps instead of one large step every few seconds.
    pub fn with_cadence(&self, interval: Duration) -> Self {
        let velocity = self.velocity();
        let interval_ms = interval.as_millis().max(1) as i64;
        Self {
            speed_ms: Some(interval_ms),
            step: velocity * (interval_ms as f64 / 1000.0),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Redraw cadence for marquee rows; the configured velocity is kept.
    /// 0 keeps the raw marquee interval.
    #[serde(default = "default_frame_ms")]
    pub marquee_frame_ms: u64,
    /// Card width in terminal cells
    #[serde(default = "default_card_width")]
    pub card_width: u16,
    /// Card height in terminal rows
    #[serde(default = "default_card_height")]
    pub card_height: u16,
    /// Gap between cards in terminal cells
    #[serde(default = "default_card_gap")]
    pub card_gap: u16,
    /// Column counts for the thumbnail grid
    #[serde(default)]
    pub grid: GridColumns,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            marquee_frame_ms: default_frame_ms(),
            card_width: default_card_width(),
            card_height: default_card_height(),
            card_gap: default_card_gap(),
            grid: GridColumns::default(),
        }
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vitrine")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_step() -> f64 {
    60.0 // 20 units/s at the 3000ms default
}

fn default_item_extent() -> f64 {
    296.0
}

fn default_visible_count() -> usize {
    6
}

fn default_hover_debounce() -> u64 {
    16
}

fn default_tick_rate() -> u64 {
    250
}

fn default_frame_ms() -> u64 {
    50
}

fn default_card_width() -> u16 {
    26
}

fn default_card_height() -> u16 {
    6
}

fn default_card_gap() -> u16 {
    2
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default location or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, returning defaults if it is absent
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to the default location
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/vitrine/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("vitrine")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Log file used while the terminal UI owns the screen
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("vitrine.log")
    }

    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.general.catalog_path.as_deref().map(expand_tilde)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::DEFAULT_INTERVAL;

    #[test]
    fn test_default_config() {
        let config = MarqueeConfig::default();
        assert_eq!(config.direction, Direction::Forward);
        assert_eq!(config.interval(), DEFAULT_INTERVAL);
        assert!(config.auto_fill);
        assert!(config.pause_on_hover);
        assert_eq!(config.hover_debounce(), Duration::from_millis(16));
        assert!((config.velocity() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [marquee]
            direction = "left"
            speed_ms = 1500
            auto_fill = false
            "#,
        )
        .unwrap();

        assert_eq!(config.marquee.direction, Direction::Reverse);
        assert_eq!(config.marquee.interval(), Duration::from_millis(1500));
        assert!(!config.marquee.auto_fill);
        assert!(config.marquee.pause_on_hover);
        assert_eq!(config.ui.card_width, 26);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_invalid_speed_falls_back() {
        let config = AppConfig::from_toml_str("[marquee]\nspeed_ms = -200\nstep = 0.0\n").unwrap();
        assert_eq!(config.marquee.interval(), DEFAULT_INTERVAL);
        assert_eq!(config.marquee.effective_step(), 60.0);

        let config = MarqueeConfig {
            item_extent: f64::NAN,
            ..Default::default()
        };
        assert_eq!(config.effective_item_extent(), 296.0);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let err = AppConfig::from_toml_str("[marquee]\nauto_fill = \"yes\"\n").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_visible_count_is_capped() {
        let config = AppConfig::from_toml_str(&format!("[marquee]\nvisible_count = {}\n", i64::MAX)).unwrap();
        assert_eq!(config.marquee.effective_visible_count(), MAX_VISIBLE_COUNT);
        assert_eq!(MarqueeConfig::default().effective_visible_count(), 6);
    }

    #[test]
    fn test_with_cadence_keeps_velocity() {
        let config = MarqueeConfig::default();
        let fast = config.with_cadence(Duration::from_millis(50));
        assert_eq!(fast.interval(), Duration::from_millis(50));
        assert!((fast.step - 1.0).abs() < 1e-9);
        assert!((fast.velocity() - config.velocity()).abs() < 1e-9);
        assert_eq!(fast.direction, config.direction);
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = AppConfig::default();
        config.marquee.speed_ms = Some(1200);
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = AppConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed.marquee, config.marquee);
    }
}
