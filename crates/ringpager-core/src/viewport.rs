use std::path::PathBuf;

use crate::content::Extent;
use crate::slot::SlotPosition;

/// Scroll state reported by the host viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollState {
    #[default]
    Idle,
    Dragging,
    Settling,
}

impl std::fmt::Display for ScrollState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScrollState::Idle => write!(f, "idle"),
            ScrollState::Dragging => write!(f, "dragging"),
            ScrollState::Settling => write!(f, "settling"),
        }
    }
}

/// Callbacks a host viewport delivers to the pager
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    /// A physical slot became the selected one
    SelectionChanged(SlotPosition),
    /// Drag progress; informational only
    ScrollProgress {
        slot: SlotPosition,
        fraction: f32,
        pixels: i32,
    },
    ScrollStateChanged(ScrollState),
}

/// The horizontally scrolling container that shows the three slots.
///
/// Provided by the host toolkit.
pub trait Viewport {
    /// Slot the viewport is currently resting on
    fn current_slot(&self) -> SlotPosition;

    /// Move to `slot`. With `animate == false` the move must be an instant
    /// jump that does not start a new scroll gesture.
    fn jump_to_slot(&mut self, slot: SlotPosition, animate: bool);

    /// Size used for prefetched snapshots
    fn viewport_size(&self) -> Extent;

    /// Directory for transient snapshot files
    fn cache_dir(&self) -> PathBuf;
}
