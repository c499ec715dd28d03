//! Column breakpoints for the static thumbnail grid.

use serde::{Deserialize, Serialize};

/// Column counts per width class. Fields left out of a config file keep
/// their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridColumns {
    pub mobile: u16,
    pub tablet: u16,
    pub desktop: u16,
    pub large: u16,
}

impl Default for GridColumns {
    fn default() -> Self {
        Self {
            mobile: 1,
            tablet: 2,
            desktop: 3,
            large: 4,
        }
    }
}

impl GridColumns {
    /// Width in terminal cells below which the tablet layout applies
    pub const TABLET_MIN: u16 = 60;
    pub const DESKTOP_MIN: u16 = 100;
    pub const LARGE_MIN: u16 = 140;

    /// Column count for a viewport `width` cells wide (never zero)
    pub fn columns_for(&self, width: u16) -> u16 {
        let columns = if width < Self::TABLET_MIN {
            self.mobile
        } else if width < Self::DESKTOP_MIN {
            self.tablet
        } else if width < Self::LARGE_MIN {
            self.desktop
        } else {
            self.large
        };
        columns.max(1)
    }
}
