pub mod app;
pub mod event;
pub mod input;
pub mod page;
pub mod swipe;
pub mod theme;
pub mod viewport;
pub mod widgets;

pub use app::App;
pub use page::DemoPage;
pub use theme::Theme;
pub use viewport::StripViewport;
