use thiserror::Error;

use crate::slot::SlotPosition;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Content sequence is empty")]
    EmptySequence,

    #[error("Snapshot unavailable for page {0}: no realized surface")]
    SnapshotUnavailable(usize),

    #[error("Failed to persist snapshot for slot {slot}: {source}")]
    SnapshotPersistFailure {
        slot: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Window still inconsistent after {0} rotation steps")]
    InconsistentWindow(usize),

    #[error("Invalid slot index: {0}")]
    InvalidSlot(usize),

    #[error("Slot {0:?} already holds a child")]
    SlotOccupied(SlotPosition),

    #[error("Page {page} is already mounted in slot {slot:?}")]
    AlreadyMounted { page: usize, slot: SlotPosition },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
