use crate::error::{Error, Result};
use crate::index::{shortest_delta, wrap, Direction};
use crate::slot::{SlotPosition, Slots};

use super::{expected_page, place, rebuild, Resolve, SlotWindow, WindowStrategy};

/// Live-rotation window.
///
/// On settle the mounted children are shifted one slot at a time toward the
/// new center, each step refilling only the end that was vacated. The slot
/// markers are checked after every step; a fling that skipped several pages
/// takes several steps. Steps are capped, and running out of them falls back
/// to a full rebuild.
#[derive(Debug, Clone, Copy)]
pub struct RotatingWindow {
    max_steps: usize,
}

impl Default for RotatingWindow {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_STEPS)
    }
}

impl RotatingWindow {
    pub const DEFAULT_MAX_STEPS: usize = 8;

    pub fn new(max_steps: usize) -> Self {
        Self {
            max_steps: max_steps.max(1),
        }
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    fn is_consistent(slots: &Slots, center: usize, len: usize) -> Result<bool> {
        for position in SlotPosition::ALL {
            if slots.get(position).marker() != Some(expected_page(position, center, len)?) {
                return Ok(false);
            }
        }
        Ok(slots.get(SlotPosition::Center).mounted_page() == Some(center))
    }

    /// Shift every child one slot against `direction`. The child that falls
    /// off the leading end is put into the vacated trailing end.
    ///
    /// Returns the trailing end.
    fn rotate(slots: &mut Slots, direction: Direction) -> Result<Option<SlotPosition>> {
        use SlotPosition::{Center, Next, Prev};

        let (leading, trailing, moves) = match direction {
            Direction::Right => (Prev, Next, [(Center, Prev), (Next, Center)]),
            Direction::Left => (Next, Prev, [(Center, Next), (Prev, Center)]),
            Direction::None => return Ok(None),
        };

        let fallen = slots.detach(leading);
        for (from, to) in moves {
            slots.move_child(from, to)?;
        }
        if let Some(child) = fallen {
            slots.attach(trailing, child)?;
        }
        Ok(Some(trailing))
    }

    /// One rotation toward `direction`, then refill the trailing end unless
    /// the child that fell off already depicts the right page.
    fn step(
        slots: &mut Slots,
        window_center: usize,
        direction: Direction,
        len: usize,
        resolve: &mut Resolve<'_>,
    ) -> Result<usize> {
        let window_center = wrap(window_center, direction.step(), len)?;
        if let Some(trailing) = Self::rotate(slots, direction)? {
            let page = expected_page(trailing, window_center, len)?;
            if slots.get(trailing).marker() != Some(page) {
                slots.detach(trailing);
                place(slots, trailing, page, window_center, resolve);
            }
        }
        Ok(window_center)
    }

    /// Fix the window in place once the center marker is right: the real
    /// center page goes to the center slot, wrong or empty outer slots are
    /// refilled.
    fn repair(
        slots: &mut Slots,
        center: usize,
        len: usize,
        resolve: &mut Resolve<'_>,
    ) -> Result<()> {
        if slots.get(SlotPosition::Center).mounted_page() != Some(center) {
            slots.detach(SlotPosition::Center);
            match slots.parent_of(center) {
                Some(holder) => slots.move_child(holder, SlotPosition::Center)?,
                None => place(slots, SlotPosition::Center, center, center, resolve),
            }
        }

        for position in [SlotPosition::Prev, SlotPosition::Next] {
            let page = expected_page(position, center, len)?;
            if slots.get(position).marker() != Some(page) {
                slots.detach(position);
                place(slots, position, page, center, resolve);
            }
        }
        Ok(())
    }
}

impl SlotWindow for RotatingWindow {
    fn strategy(&self) -> WindowStrategy {
        WindowStrategy::Rotating
    }

    fn settle(
        &self,
        slots: &mut Slots,
        center: usize,
        len: usize,
        resolve: &mut Resolve<'_>,
    ) -> Result<()> {
        let mut steps = 0;
        loop {
            if Self::is_consistent(slots, center, len)? {
                return Ok(());
            }

            let marker = slots.get(SlotPosition::Center).marker();
            let delta = match marker {
                Some(marker) => shortest_delta(marker, center, len)?,
                None => 0,
            };
            if delta == 0 {
                return Self::repair(slots, center, len, resolve);
            }

            if steps == self.max_steps {
                break;
            }
            let window_center = marker.unwrap_or(center);
            Self::step(slots, window_center, Direction::from_delta(delta), len, resolve)?;
            steps += 1;
            tracing::trace!("Rotation step {}: {:?}", steps, slots.markers());
        }

        tracing::warn!("{}, rebuilding", Error::InconsistentWindow(self.max_steps));
        rebuild(slots, center, len, resolve)
    }
}
