use crate::error::Result;
use crate::slot::Slots;

use super::{rebuild, Resolve, SlotWindow, WindowStrategy};

/// Content-array-backed window: every settle rebuilds from the sequence
#[derive(Debug, Default, Clone, Copy)]
pub struct IndexedWindow;

impl SlotWindow for IndexedWindow {
    fn strategy(&self) -> WindowStrategy {
        WindowStrategy::Indexed
    }

    fn settle(
        &self,
        slots: &mut Slots,
        center: usize,
        len: usize,
        resolve: &mut Resolve<'_>,
    ) -> Result<()> {
        rebuild(slots, center, len, resolve)
    }
}
