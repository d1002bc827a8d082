//! The three physical slots and the mount bookkeeping between them.
//!
//! A page can be mounted in at most one slot at a time. Every mutation goes
//! through [`Slots::attach`], [`Slots::detach`] or [`Slots::move_child`], which
//! refuse to create a second parent for a page.

use crate::error::{Error, Result};
use crate::snapshot::Snapshot;

/// Number of physical slots in the window
pub const SLOT_COUNT: usize = 3;

/// One of the three fixed physical containers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotPosition {
    Prev,
    Center,
    Next,
}

impl SlotPosition {
    pub const ALL: [SlotPosition; SLOT_COUNT] =
        [SlotPosition::Prev, SlotPosition::Center, SlotPosition::Next];

    /// Physical index (0, 1 or 2)
    pub fn index(self) -> usize {
        match self {
            SlotPosition::Prev => 0,
            SlotPosition::Center => 1,
            SlotPosition::Next => 2,
        }
    }

    /// Logical offset from the center page (-1, 0 or +1)
    pub fn offset(self) -> isize {
        self.index() as isize - 1
    }
}

impl TryFrom<usize> for SlotPosition {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        SlotPosition::ALL
            .get(index)
            .copied()
            .ok_or(Error::InvalidSlot(index))
    }
}

impl std::fmt::Display for SlotPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotPosition::Prev => write!(f, "prev"),
            SlotPosition::Center => write!(f, "center"),
            SlotPosition::Next => write!(f, "next"),
        }
    }
}

/// What a slot can hold
#[derive(Debug, Clone)]
pub enum SlotChild {
    /// The real page at this sequence index
    Page(usize),
    /// A captured stand-in for a page mounted elsewhere
    Dummy(Snapshot),
}

impl SlotChild {
    /// Logical page this child depicts
    pub fn page(&self) -> usize {
        match self {
            SlotChild::Page(page) => *page,
            SlotChild::Dummy(snapshot) => snapshot.page(),
        }
    }

    pub fn is_dummy(&self) -> bool {
        matches!(self, SlotChild::Dummy(_))
    }
}

/// A single physical container
#[derive(Debug, Default)]
pub struct Slot {
    child: Option<SlotChild>,
}

impl Slot {
    pub fn child(&self) -> Option<&SlotChild> {
        self.child.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.child.is_none()
    }

    /// Consistency marker: the logical page shown here, real or not
    pub fn marker(&self) -> Option<usize> {
        self.child.as_ref().map(SlotChild::page)
    }

    /// Sequence index of the real page mounted here, if any
    pub fn mounted_page(&self) -> Option<usize> {
        match self.child {
            Some(SlotChild::Page(page)) => Some(page),
            _ => None,
        }
    }
}

/// Fixed array of slots, allocated once and reused
#[derive(Debug, Default)]
pub struct Slots {
    slots: [Slot; SLOT_COUNT],
}

impl Slots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, position: SlotPosition) -> &Slot {
        &self.slots[position.index()]
    }

    /// The slot currently parenting `page`, if any
    pub fn parent_of(&self, page: usize) -> Option<SlotPosition> {
        SlotPosition::ALL
            .into_iter()
            .find(|pos| self.get(*pos).mounted_page() == Some(page))
    }

    /// Attach a child to an empty slot.
    ///
    /// Fails if the slot is occupied or if the child is a page that already
    /// has a parent.
    pub fn attach(&mut self, position: SlotPosition, child: SlotChild) -> Result<()> {
        if !self.get(position).is_empty() {
            return Err(Error::SlotOccupied(position));
        }
        if let SlotChild::Page(page) = child {
            if let Some(slot) = self.parent_of(page) {
                return Err(Error::AlreadyMounted { page, slot });
            }
        }
        self.slots[position.index()].child = Some(child);
        Ok(())
    }

    pub fn detach(&mut self, position: SlotPosition) -> Option<SlotChild> {
        self.slots[position.index()].child.take()
    }

    /// Detach every child
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.child = None;
        }
    }

    /// Transfer the child of `from` into the empty slot `to`.
    ///
    /// The child is detached before it is attached, so a page never has two
    /// parents. Moving out of an empty slot does nothing.
    pub fn move_child(&mut self, from: SlotPosition, to: SlotPosition) -> Result<()> {
        if from == to {
            return Ok(());
        }
        if !self.get(to).is_empty() {
            return Err(Error::SlotOccupied(to));
        }
        if let Some(child) = self.detach(from) {
            self.attach(to, child)?;
        }
        Ok(())
    }

    /// Markers of all three slots, in physical order
    pub fn markers(&self) -> [Option<usize>; SLOT_COUNT] {
        [
            self.slots[0].marker(),
            self.slots[1].marker(),
            self.slots[2].marker(),
        ]
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotPosition, &Slot)> {
        SlotPosition::ALL.into_iter().zip(self.slots.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy(page: usize) -> SlotChild {
        SlotChild::Dummy(Snapshot::new(page, image::RgbaImage::new(1, 1)))
    }

    #[test]
    fn test_slot_position_try_from() {
        assert_eq!(SlotPosition::try_from(0).unwrap(), SlotPosition::Prev);
        assert_eq!(SlotPosition::try_from(2).unwrap(), SlotPosition::Next);
        assert!(matches!(SlotPosition::try_from(3), Err(Error::InvalidSlot(3))));
        assert_eq!(SlotPosition::Next.offset(), 1);
    }

    #[test]
    fn test_attach_refuses_second_parent() {
        let mut slots = Slots::new();
        slots.attach(SlotPosition::Prev, SlotChild::Page(4)).unwrap();

        let err = slots.attach(SlotPosition::Next, SlotChild::Page(4)).unwrap_err();
        assert!(matches!(
            err,
            Error::AlreadyMounted { page: 4, slot: SlotPosition::Prev }
        ));
        assert!(slots.get(SlotPosition::Next).is_empty());
    }

    #[test]
    fn test_attach_refuses_occupied_slot() {
        let mut slots = Slots::new();
        slots.attach(SlotPosition::Center, dummy(1)).unwrap();
        assert!(matches!(
            slots.attach(SlotPosition::Center, SlotChild::Page(2)),
            Err(Error::SlotOccupied(SlotPosition::Center))
        ));
    }

    #[test]
    fn test_dummies_may_alias_a_mounted_page() {
        let mut slots = Slots::new();
        slots.attach(SlotPosition::Center, SlotChild::Page(0)).unwrap();
        slots.attach(SlotPosition::Prev, dummy(0)).unwrap();
        slots.attach(SlotPosition::Next, dummy(0)).unwrap();
        assert_eq!(slots.markers(), [Some(0), Some(0), Some(0)]);
        assert_eq!(slots.parent_of(0), Some(SlotPosition::Center));
    }

    #[test]
    fn test_move_child() {
        let mut slots = Slots::new();
        slots.attach(SlotPosition::Next, SlotChild::Page(7)).unwrap();
        slots.move_child(SlotPosition::Next, SlotPosition::Center).unwrap();

        assert!(slots.get(SlotPosition::Next).is_empty());
        assert_eq!(slots.parent_of(7), Some(SlotPosition::Center));

        slots.attach(SlotPosition::Prev, SlotChild::Page(6)).unwrap();
        assert!(slots.move_child(SlotPosition::Prev, SlotPosition::Center).is_err());
        assert_eq!(slots.parent_of(6), Some(SlotPosition::Prev));
    }

    #[test]
    fn test_clear() {
        let mut slots = Slots::new();
        slots.attach(SlotPosition::Prev, SlotChild::Page(1)).unwrap();
        slots.attach(SlotPosition::Center, dummy(1)).unwrap();
        slots.clear();
        assert_eq!(slots.markers(), [None, None, None]);
        assert_eq!(slots.parent_of(1), None);
    }
}
