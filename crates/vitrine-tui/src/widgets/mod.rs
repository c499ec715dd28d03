mod action_page;
mod card;
mod home_page;
mod marquee_row;
mod nav_bar;
mod status_bar;

pub use action_page::{grid_cells, ActionPageWidget};
pub use card::{card_lines, draw_clipped, fit, FALLBACK_LABEL};
pub use home_page::HomePageWidget;
pub use marquee_row::MarqueeRowWidget;
pub use nav_bar::NavBarWidget;
pub use status_bar::StatusBarWidget;
