//! L3 Molecular Layer: swipe gesture driver
//!
//! Animates the strip between slots and reports what a touch pager would:
//! drag start, scroll progress, the selected slot once the strip passes the
//! half-way point, settling and idle.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ringpager_core::{Direction, ScrollState, SlotPosition, Viewport, ViewportEvent, SLOT_COUNT};

use super::config::{SwipeConfig, SwipeConfigExt};
use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete_at, lerp, progress_at, scaled_duration};
use crate::viewport::StripViewport;

const LAST_SLOT: f64 = (SLOT_COUNT - 1) as f64;

#[derive(Debug, Clone)]
struct ActiveSwipe {
    start: Instant,
    /// Strip scroll at the start, in pages
    from: f64,
    /// Target scroll, always a whole slot
    to: f64,
    duration: Duration,
    easing: EasingType,
}

/// Keyboard-driven swipe over a [`StripViewport`].
///
/// `swipe()` starts or redirects a gesture; `update()` advances it each frame
/// and returns the events to hand to the pager. A swipe in the direction the
/// strip is already heading is queued and started by `resume()` once the
/// pager has recentered.
#[derive(Debug, Clone)]
pub struct SwipeGesture {
    animation: Option<ActiveSwipe>,
    config: SwipeConfig,
    state: ScrollState,
    /// Last slot reported as selected
    selected: SlotPosition,
    queued: VecDeque<Direction>,
}

impl Default for SwipeGesture {
    fn default() -> Self {
        Self::new(SwipeConfig::default())
    }
}

impl SwipeGesture {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            animation: None,
            config,
            state: ScrollState::Idle,
            selected: SlotPosition::Center,
            queued: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Animation running or swipes waiting; the caller should tick at frame rate
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || !self.queued.is_empty()
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn queued(&self) -> usize {
        self.queued.len()
    }

    /// Swipe toward `direction`.
    ///
    /// While a swipe is animating, the opposite direction redirects it
    /// (grabbing the strip again) and the same direction is queued.
    pub fn swipe(
        &mut self,
        direction: Direction,
        viewport: &StripViewport,
        now: Instant,
    ) -> Vec<ViewportEvent> {
        if direction == Direction::None {
            return Vec::new();
        }

        let Some(anim) = self.animation.as_ref() else {
            return self.begin(direction, viewport, now);
        };

        let to = anim.to + direction.step() as f64;
        if !(0.0..=LAST_SLOT).contains(&to) {
            self.queued.push_back(direction);
            tracing::trace!("Queued {} swipe ({} waiting)", direction, self.queued.len());
            return Vec::new();
        }

        let from = viewport.scroll();
        self.animation = Some(ActiveSwipe {
            start: now,
            from,
            to,
            duration: scaled_duration(self.config.animation_duration(), to - from),
            easing: self.config.easing,
        });
        self.grab()
    }

    /// Advance the running swipe to `now`
    pub fn update(&mut self, viewport: &mut StripViewport, now: Instant) -> Vec<ViewportEvent> {
        let Some(anim) = self.animation.clone() else {
            return Vec::new();
        };
        let mut events = Vec::new();

        let t = progress_at(anim.start, now, anim.duration);
        viewport.set_scroll(lerp(anim.from, anim.to, anim.easing.apply(t)));

        let scroll = viewport.scroll();
        let base = scroll.floor().min(LAST_SLOT);
        let fraction = scroll - base;
        events.push(ViewportEvent::ScrollProgress {
            slot: SlotPosition::try_from(base as usize).unwrap_or(SlotPosition::Center),
            fraction: fraction as f32,
            pixels: (fraction * viewport_width(viewport)).round() as i32,
        });

        let selected = viewport.selected_slot();
        if selected != self.selected {
            self.selected = selected;
            events.push(ViewportEvent::SelectionChanged(selected));
            self.release(&mut events);
        }

        if is_complete_at(anim.start, now, anim.duration) {
            let target = SlotPosition::try_from(anim.to.round() as usize)
                .unwrap_or(SlotPosition::Center);
            viewport.settle_on(target);
            self.animation = None;
            self.release(&mut events);
            self.state = ScrollState::Idle;
            events.push(ViewportEvent::ScrollStateChanged(ScrollState::Idle));
        }

        events
    }

    /// Start the next queued swipe once the previous one has finished
    pub fn resume(&mut self, viewport: &StripViewport, now: Instant) -> Vec<ViewportEvent> {
        if self.animation.is_some() {
            return Vec::new();
        }
        match self.queued.pop_front() {
            Some(direction) => self.begin(direction, viewport, now),
            None => Vec::new(),
        }
    }

    /// Drop the running swipe and anything queued
    pub fn cancel(&mut self) {
        self.animation = None;
        self.queued.clear();
        self.state = ScrollState::Idle;
    }

    fn begin(
        &mut self,
        direction: Direction,
        viewport: &StripViewport,
        now: Instant,
    ) -> Vec<ViewportEvent> {
        let from = viewport.scroll();
        let to = (viewport.current_slot().index() as f64 + direction.step() as f64)
            .clamp(0.0, LAST_SLOT);
        if (to - from).abs() < f64::EPSILON {
            return Vec::new();
        }

        self.selected = viewport.selected_slot();
        self.animation = Some(ActiveSwipe {
            start: now,
            from,
            to,
            duration: scaled_duration(self.config.animation_duration(), to - from),
            easing: self.config.easing,
        });
        self.grab()
    }

    fn grab(&mut self) -> Vec<ViewportEvent> {
        self.state = ScrollState::Dragging;
        vec![ViewportEvent::ScrollStateChanged(ScrollState::Dragging)]
    }

    /// The finger lifts: dragging turns into settling
    fn release(&mut self, events: &mut Vec<ViewportEvent>) {
        if self.state == ScrollState::Dragging {
            self.state = ScrollState::Settling;
            events.push(ViewportEvent::ScrollStateChanged(ScrollState::Settling));
        }
    }
}

fn viewport_width(viewport: &StripViewport) -> f64 {
    viewport.viewport_size().width as f64
}
