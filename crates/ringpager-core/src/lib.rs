pub mod config;
pub mod content;
pub mod controller;
pub mod error;
pub mod index;
pub mod slot;
pub mod snapshot;
pub mod viewport;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{AppConfig, EasingType, PagerConfig, SwipeConfig};
pub use content::{Displayable, Extent};
pub use controller::{PageChangeListener, PageWindowController, SlotView};
pub use error::{Error, Result};
pub use index::Direction;
pub use slot::{SlotChild, SlotPosition, SLOT_COUNT};
pub use snapshot::{Snapshot, SnapshotCache, SnapshotMode};
pub use viewport::{ScrollState, Viewport, ViewportEvent};
pub use window::{SlotWindow, WindowStrategy};
