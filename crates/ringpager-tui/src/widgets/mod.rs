mod status_bar;
mod strip;

pub use status_bar::StatusBarWidget;
pub use strip::PagerStripWidget;
