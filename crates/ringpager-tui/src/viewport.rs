use std::path::PathBuf;

use ringpager_core::{Extent, SlotPosition, Viewport};

/// Horizontal strip of three page-wide slots.
///
/// `scroll` is measured in pages from the left edge of the prev slot, so
/// 0.0 shows prev, 1.0 shows center and 2.0 shows next. The resting slot only
/// changes when a swipe finishes or the pager jumps.
#[derive(Debug, Clone)]
pub struct StripViewport {
    scroll: f64,
    resting: SlotPosition,
    /// Halfblock pixels: one per column, two per row
    size: Extent,
    cache_dir: PathBuf,
}

impl StripViewport {
    pub fn new(size: Extent, cache_dir: PathBuf) -> Self {
        Self {
            scroll: SlotPosition::Center.index() as f64,
            resting: SlotPosition::Center,
            size,
            cache_dir,
        }
    }

    /// Size in pixels for a terminal area of `columns` x `rows` cells
    pub fn extent_for_cells(columns: u16, rows: u16) -> Extent {
        Extent::new(columns as u32, rows as u32 * 2)
    }

    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    pub fn set_scroll(&mut self, scroll: f64) {
        self.scroll = scroll.clamp(0.0, (ringpager_core::SLOT_COUNT - 1) as f64);
    }

    /// Slot covering more than half of the strip
    pub fn selected_slot(&self) -> SlotPosition {
        SlotPosition::try_from(self.scroll.round() as usize).unwrap_or(SlotPosition::Center)
    }

    /// Finish a swipe on `slot`
    pub fn settle_on(&mut self, slot: SlotPosition) {
        self.resting = slot;
        self.scroll = slot.index() as f64;
    }

    pub fn resize(&mut self, size: Extent) {
        self.size = size;
    }

    /// Left edge of `slot` relative to the strip, for a strip `width` wide
    pub fn slot_offset(&self, slot: SlotPosition, width: u32) -> i32 {
        ((slot.index() as f64 - self.scroll) * width as f64).round() as i32
    }
}

impl Viewport for StripViewport {
    fn current_slot(&self) -> SlotPosition {
        self.resting
    }

    fn jump_to_slot(&mut self, slot: SlotPosition, animate: bool) {
        if animate {
            tracing::debug!("Animated jumps are not supported, jumping to {}", slot);
        }
        self.settle_on(slot);
    }

    fn viewport_size(&self) -> Extent {
        self.size
    }

    fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone()
    }
}
