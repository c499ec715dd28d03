mod service;

pub use service::{CarouselEvent, CarouselService, PointerCommand};
