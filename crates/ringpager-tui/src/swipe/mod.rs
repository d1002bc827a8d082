//! Swipe animation for the terminal strip
//!
//! ## L4 Atomic Layer
//! - `easing` - curves applied to swipe progress
//! - `timing` - progress and interpolation over an explicit clock
//! - `config` - helpers over the swipe settings from ringpager-core
//!
//! ## L3 Molecular Layer
//! - `gesture` - drives the strip and emits viewport events

// L4 Atomic Layer
pub mod config;
pub mod easing;
pub mod timing;

// L3 Molecular Layer
pub mod gesture;

pub use config::{SwipeConfig, SwipeConfigExt};
pub use easing::{EasingType, EasingTypeExt};
pub use gesture::SwipeGesture;
