//! The page window controller.
//!
//! Receives selection and scroll-state callbacks from the host viewport,
//! keeps the logical position, and rebuilds the slot window when a gesture
//! settles. All mutation happens through `&mut self` on the event thread.

use std::rc::Rc;

use crate::config::PagerConfig;
use crate::content::Displayable;
use crate::error::Error;
use crate::index::{wrap, Direction};
use crate::slot::{Slot, SlotChild, SlotPosition, Slots, SLOT_COUNT};
use crate::snapshot::{Snapshot, SnapshotCache, SnapshotMode};
use crate::viewport::{ScrollState, Viewport, ViewportEvent};
use crate::window::{SlotWindow, WindowStrategy};

/// Receives the new logical position after every page change
pub type PageChangeListener = Box<dyn FnMut(usize)>;

/// What a slot currently displays
#[derive(Debug)]
pub enum SlotView<'a, C> {
    Content(&'a C),
    Dummy(&'a Snapshot),
    /// Nothing mounted: before any content is set, for an empty sequence, or
    /// when no dummy could be captured. Hosts draw their own placeholder.
    Empty,
}

pub struct PageWindowController<C, V> {
    viewport: V,
    source: Rc<[C]>,
    slots: Slots,
    window: Box<dyn SlotWindow>,
    snapshots: SnapshotCache,
    listener: Option<PageChangeListener>,
    start_at_middle: bool,
    /// Logical position
    current: usize,
    direction: Direction,
    /// Last physical slot reported by the viewport
    last_slot: SlotPosition,
    state: ScrollState,
    /// Position or content changed since the last rebuild
    stale: bool,
}

impl<C: Displayable, V: Viewport> PageWindowController<C, V> {
    /// Controller with no content yet; every slot reports [`SlotView::Empty`]
    /// until [`set_content`](Self::set_content) populates the window.
    pub fn new(viewport: V, config: &PagerConfig) -> Self {
        let snapshots = SnapshotCache::new(
            config.snapshot_mode,
            &viewport.cache_dir(),
            config.snapshot_quality,
        );

        Self {
            viewport,
            source: Rc::from(Vec::new()),
            slots: Slots::new(),
            window: config.strategy.build(config.max_rotation_steps),
            snapshots,
            listener: None,
            start_at_middle: config.start_at_middle,
            current: 0,
            direction: Direction::None,
            last_slot: SlotPosition::Center,
            state: ScrollState::Idle,
            stale: false,
        }
    }

    pub fn with_content(viewport: V, config: &PagerConfig, items: Rc<[C]>) -> Self {
        let mut controller = Self::new(viewport, config);
        controller.set_content(items);
        controller
    }

    // ===================================================
    // Adapter contract
    // ===================================================

    /// Always 3
    pub fn slot_count(&self) -> usize {
        SLOT_COUNT
    }

    pub fn slot(&self, position: SlotPosition) -> &Slot {
        self.slots.get(position)
    }

    /// Content or dummy shown in `position`
    pub fn displayable_for_slot(&self, position: SlotPosition) -> SlotView<'_, C> {
        match self.slots.get(position).child() {
            Some(SlotChild::Page(page)) => self
                .source
                .get(*page)
                .map_or(SlotView::Empty, SlotView::Content),
            Some(SlotChild::Dummy(snapshot)) => SlotView::Dummy(snapshot),
            None => SlotView::Empty,
        }
    }

    /// Whether `view` is the container for `position`
    pub fn is_view_from_object(&self, position: SlotPosition, view: &Slot) -> bool {
        std::ptr::eq(self.slots.get(position), view)
    }

    // ===================================================
    // Application surface
    // ===================================================

    /// Replace the content sequence and rebuild the window immediately.
    pub fn set_content(&mut self, items: Rc<[C]>) {
        self.source = items;
        let len = self.source.len();
        self.current = if self.start_at_middle { len / 2 } else { 0 };
        self.direction = Direction::None;
        self.snapshots.discard_prefetched();

        let source = &self.source;
        let snapshots = &self.snapshots;
        let mut resolve = |page: usize| resolve_page(snapshots, source, page);
        match self.window.populate(&mut self.slots, self.current, len, &mut resolve) {
            Ok(()) => tracing::debug!("Populated {} pages around {}", len, self.current),
            Err(Error::EmptySequence) => {
                self.slots.clear();
                tracing::debug!("Content sequence is empty");
            }
            Err(e) => tracing::warn!("Failed to populate window: {}", e),
        }

        self.stale = false;
        self.recenter();
    }

    /// Jump straight to `page` (mod len), notify, and rebuild.
    pub fn set_current_position(&mut self, page: usize) {
        let Ok(target) = wrap(page, 0, self.source.len()) else {
            return;
        };
        if target == self.current {
            return;
        }

        self.direction = Direction::None;
        self.current = target;
        self.stale = true;
        self.notify();
        self.settle();
    }

    pub fn set_page_change_listener<F>(&mut self, listener: F)
    where
        F: FnMut(usize) + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_page_change_listener(&mut self) {
        self.listener = None;
    }

    pub fn current_position(&self) -> usize {
        self.current
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn content(&self) -> &Rc<[C]> {
        &self.source
    }

    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    pub fn strategy(&self) -> WindowStrategy {
        self.window.strategy()
    }

    pub fn snapshot_mode(&self) -> SnapshotMode {
        self.snapshots.mode()
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    // ===================================================
    // Viewport callbacks
    // ===================================================

    pub fn handle_event(&mut self, event: ViewportEvent) {
        match event {
            ViewportEvent::SelectionChanged(slot) => self.on_selection_changed(slot),
            ViewportEvent::ScrollProgress {
                slot,
                fraction,
                pixels,
            } => self.on_scroll_progress(slot, fraction, pixels),
            ViewportEvent::ScrollStateChanged(state) => self.on_scroll_state_changed(state),
        }
    }

    /// A physical slot was selected; move the logical position by the slot
    /// delta and notify.
    pub fn on_selection_changed(&mut self, slot: SlotPosition) {
        let delta = slot.index() as isize - self.last_slot.index() as isize;
        self.last_slot = slot;
        if delta == 0 {
            return;
        }

        match wrap(self.current, delta, self.source.len()) {
            Ok(next) => {
                self.direction = Direction::from_delta(delta);
                self.current = next;
                self.stale = true;
                tracing::debug!("Selected {} slot, moving {} to {}", slot, self.direction, next);
                self.notify();
            }
            Err(e) => tracing::debug!("Ignoring selection of {} slot: {}", slot, e),
        }
    }

    pub fn on_scroll_progress(&mut self, slot: SlotPosition, fraction: f32, pixels: i32) {
        tracing::trace!("Scroll progress {} {:.2} ({}px)", slot, fraction, pixels);
    }

    pub fn on_scroll_state_changed(&mut self, state: ScrollState) {
        let previous = std::mem::replace(&mut self.state, state);
        match state {
            // Every drag-start re-arms the gesture, even one that interrupts a settle
            ScrollState::Dragging if previous != ScrollState::Dragging => {
                self.prefetch_neighbors()
            }
            ScrollState::Idle => self.settle(),
            _ => {}
        }
    }

    // ===================================================
    // Internals
    // ===================================================

    fn prefetch_neighbors(&mut self) {
        if self.snapshots.mode() != SnapshotMode::Prefetch {
            return;
        }
        let len = self.source.len();
        let (Ok(prev), Ok(next)) = (wrap(self.current, -1, len), wrap(self.current, 1, len))
        else {
            return;
        };

        let extent = self.viewport.viewport_size();
        let source = &self.source;
        let neighbors = [
            (SlotPosition::Prev, prev, &source[prev]),
            (SlotPosition::Next, next, &source[next]),
        ];
        self.snapshots.prefetch(&neighbors, extent);
    }

    /// Rebuild the window around the current position and recenter.
    ///
    /// Repeated idle reports with nothing changed are ignored, so a host
    /// that echoes our own recentering back as an idle event does not
    /// trigger another rebuild.
    fn settle(&mut self) {
        if !self.stale && self.viewport.current_slot() == SlotPosition::Center {
            tracing::trace!("Already settled at {}", self.current);
            return;
        }

        let len = self.source.len();
        if len > 0 {
            let source = &self.source;
            let snapshots = &self.snapshots;
            let mut resolve = |page: usize| resolve_page(snapshots, source, page);
            if let Err(e) = self.window.settle(&mut self.slots, self.current, len, &mut resolve) {
                tracing::warn!("Failed to settle window: {}", e);
            }
            tracing::debug!("Settled at {}: {:?}", self.current, self.slots.markers());
        }

        self.snapshots.discard_prefetched();
        self.stale = false;
        self.recenter();
    }

    /// Put the viewport back on the center slot without animation
    fn recenter(&mut self) {
        if self.viewport.current_slot() != SlotPosition::Center {
            self.viewport.jump_to_slot(SlotPosition::Center, false);
        }
        self.last_slot = SlotPosition::Center;
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener(self.current);
        }
    }
}

fn resolve_page<C: Displayable>(
    snapshots: &SnapshotCache,
    source: &[C],
    page: usize,
) -> crate::Result<Snapshot> {
    let item = source.get(page).ok_or(Error::SnapshotUnavailable(page))?;
    snapshots.resolve(page, item)
}

impl<C, V: std::fmt::Debug> std::fmt::Debug for PageWindowController<C, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageWindowController")
            .field("viewport", &self.viewport)
            .field("len", &self.source.len())
            .field("current", &self.current)
            .field("direction", &self.direction)
            .field("state", &self.state)
            .field("window", &self.window)
            .field("markers", &self.slots.markers())
            .finish()
    }
}
