//! Strategies for filling the three slots around a logical center.
//!
//! - `indexed` - rebuild every slot from the content sequence on each settle
//! - `rotating` - shift the mounted children along the swipe and only refill
//!   what fell off, verified by per-slot markers

mod indexed;
mod rotating;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::index::wrap;
use crate::slot::{SlotChild, SlotPosition, Slots};
use crate::snapshot::Snapshot;

pub use indexed::IndexedWindow;
pub use rotating::RotatingWindow;

/// Produces a dummy for a page that cannot be mounted directly
pub type Resolve<'a> = dyn FnMut(usize) -> Result<Snapshot> + 'a;

/// Slot-filling strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowStrategy {
    #[default]
    Indexed,
    Rotating,
}

impl WindowStrategy {
    pub fn build(self, max_rotation_steps: usize) -> Box<dyn SlotWindow> {
        match self {
            WindowStrategy::Indexed => Box::new(IndexedWindow),
            WindowStrategy::Rotating => Box::new(RotatingWindow::new(max_rotation_steps)),
        }
    }
}

impl std::fmt::Display for WindowStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowStrategy::Indexed => write!(f, "indexed"),
            WindowStrategy::Rotating => write!(f, "rotating"),
        }
    }
}

/// Keeps the slots showing `center - 1`, `center`, `center + 1` (mod `len`).
pub trait SlotWindow: std::fmt::Debug {
    fn strategy(&self) -> WindowStrategy;

    /// Clear every slot and refill in order prev, center, next.
    fn populate(
        &self,
        slots: &mut Slots,
        center: usize,
        len: usize,
        resolve: &mut Resolve<'_>,
    ) -> Result<()> {
        rebuild(slots, center, len, resolve)
    }

    /// Bring the slots in line with `center` after a gesture settles.
    fn settle(
        &self,
        slots: &mut Slots,
        center: usize,
        len: usize,
        resolve: &mut Resolve<'_>,
    ) -> Result<()>;
}

/// Page a slot should show for `center`
pub(crate) fn expected_page(position: SlotPosition, center: usize, len: usize) -> Result<usize> {
    wrap(center, position.offset(), len)
}

pub(crate) fn rebuild(
    slots: &mut Slots,
    center: usize,
    len: usize,
    resolve: &mut Resolve<'_>,
) -> Result<()> {
    // Detach everything first so no page keeps a stale parent
    slots.clear();
    for position in SlotPosition::ALL {
        let page = expected_page(position, center, len)?;
        place(slots, position, page, center, resolve);
    }
    Ok(())
}

/// Attach `page` to the empty slot `position`, or a dummy of it when the
/// real page is taken.
///
/// The center slot has first claim on the center page, so an outer slot that
/// aliases it gets a dummy even while the center is still empty. A failed
/// capture leaves the slot empty.
pub(crate) fn place(
    slots: &mut Slots,
    position: SlotPosition,
    page: usize,
    center: usize,
    resolve: &mut Resolve<'_>,
) {
    let claimed = position != SlotPosition::Center && page == center;
    let child = if claimed || slots.parent_of(page).is_some() {
        match resolve(page) {
            Ok(snapshot) => SlotChild::Dummy(snapshot),
            Err(e) => {
                tracing::warn!("Leaving {} slot empty: {}", position, e);
                return;
            }
        }
    } else {
        SlotChild::Page(page)
    };

    if let Err(e) = slots.attach(position, child) {
        tracing::warn!("Failed to fill {} slot: {}", position, e);
    }
}
