pub mod carousel;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod hover;
pub mod item;
pub mod runtime;
pub mod sequence;
pub mod site;

pub use carousel::{Carousel, CarouselRow};
pub use clock::{AutoplayClock, Generation, Tick, DEFAULT_INTERVAL};
pub use config::{AppConfig, MarqueeConfig, UiConfig};
pub use engine::{EngineState, MarqueeEngine, MarqueeFrame};
pub use error::{Error, Result};
pub use grid::GridColumns;
pub use hover::HoverController;
pub use item::{Direction, DisplayItem};
pub use runtime::{CarouselEvent, CarouselService, PointerCommand};
pub use sequence::{build_sequence, Sequence};
pub use site::{NavigationItem, SiteCatalog};
