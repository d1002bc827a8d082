//! Static stand-ins ("dummies") for pages that are mounted in another slot.
//!
//! Two capture modes:
//! - on demand: rasterize the page when a rebuild needs a dummy
//! - prefetch: on drag-start, rasterize both neighbors at viewport size and
//!   persist them to per-slot files so a rebuild can reuse them even if the
//!   live page was reclaimed mid-gesture

mod disk;

use std::path::{Path, PathBuf};

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::content::{Displayable, Extent};
use crate::error::{Error, Result};
use crate::slot::{SlotPosition, SLOT_COUNT};

pub use disk::SnapshotDiskCache;

/// Captured pixels of a page.
///
/// Owns its pixel data. `page` is only a marker of what it depicts, never a
/// handle back to the page.
#[derive(Debug, Clone)]
pub struct Snapshot {
    page: usize,
    image: RgbaImage,
}

impl Snapshot {
    pub fn new(page: usize, image: RgbaImage) -> Self {
        Self { page, image }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

/// When dummies are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotMode {
    /// Capture during the rebuild that needs the dummy
    #[default]
    OnDemand,
    /// Capture neighbors on drag-start and persist them per slot
    Prefetch,
}

impl std::fmt::Display for SnapshotMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotMode::OnDemand => write!(f, "on_demand"),
            SnapshotMode::Prefetch => write!(f, "prefetch"),
        }
    }
}

/// A prefetched capture waiting on disk
#[derive(Debug, Clone)]
struct PrefetchEntry {
    page: usize,
    path: PathBuf,
}

pub struct SnapshotCache {
    mode: SnapshotMode,
    /// Only present in prefetch mode
    disk: Option<SnapshotDiskCache>,
    /// Prefetched captures keyed by physical slot
    prefetched: [Option<PrefetchEntry>; SLOT_COUNT],
}

impl SnapshotCache {
    /// Create a cache; `cache_dir` is only touched in prefetch mode.
    pub fn new(mode: SnapshotMode, cache_dir: &Path, quality: u8) -> Self {
        let disk = match mode {
            SnapshotMode::OnDemand => None,
            SnapshotMode::Prefetch => match SnapshotDiskCache::new(cache_dir, quality) {
                Ok(disk) => Some(disk),
                Err(e) => {
                    tracing::warn!(
                        "Snapshot cache directory unavailable, prefetch disabled: {}",
                        e
                    );
                    None
                }
            },
        };

        Self {
            mode,
            disk,
            prefetched: Default::default(),
        }
    }

    pub fn on_demand() -> Self {
        Self {
            mode: SnapshotMode::OnDemand,
            disk: None,
            prefetched: Default::default(),
        }
    }

    pub fn mode(&self) -> SnapshotMode {
        self.mode
    }

    /// Rasterize `item` at its laid-out size
    pub fn capture<C: Displayable + ?Sized>(&self, page: usize, item: &C) -> Result<Snapshot> {
        item.rasterize(None)
            .filter(|img| img.width() > 0 && img.height() > 0)
            .map(|img| Snapshot::new(page, img))
            .ok_or(Error::SnapshotUnavailable(page))
    }

    /// Capture `neighbors` at viewport size and persist each to its slot file.
    ///
    /// Failures are logged and skip only the affected slot.
    pub fn prefetch<C: Displayable + ?Sized>(
        &mut self,
        neighbors: &[(SlotPosition, usize, &C)],
        extent: Extent,
    ) {
        if self.mode != SnapshotMode::Prefetch {
            return;
        }
        tracing::debug!("Started generating dummies");

        for (slot, page, item) in neighbors {
            self.prefetched[slot.index()] = None;
            match self.prefetch_one(*slot, *page, *item, extent) {
                Ok(entry) => self.prefetched[slot.index()] = Some(entry),
                Err(e) => tracing::warn!("Skipping dummy for {} slot: {}", slot, e),
            }
        }

        tracing::debug!("Generated dummies");
    }

    fn prefetch_one<C: Displayable + ?Sized>(
        &self,
        slot: SlotPosition,
        page: usize,
        item: &C,
        extent: Extent,
    ) -> Result<PrefetchEntry> {
        let disk = self.disk.as_ref().ok_or(Error::SnapshotPersistFailure {
            slot: slot.index(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no snapshot cache directory",
            ),
        })?;

        if extent.is_empty() {
            return Err(Error::SnapshotUnavailable(page));
        }
        let image = item
            .rasterize(Some(extent))
            .ok_or(Error::SnapshotUnavailable(page))?;
        let path = disk.save(slot.index(), &image)?;

        Ok(PrefetchEntry { page, path })
    }

    /// Whether a prefetched capture exists for `page`
    pub fn has_prefetched(&self, page: usize) -> bool {
        self.prefetched.iter().flatten().any(|e| e.page == page)
    }

    /// Produce a dummy for `page`, preferring a prefetched capture.
    pub fn resolve<C: Displayable + ?Sized>(&self, page: usize, item: &C) -> Result<Snapshot> {
        if let Some(disk) = self.disk.as_ref() {
            let entry = self.prefetched.iter().flatten().find(|e| e.page == page);
            if let Some(image) = entry.and_then(|e| disk.load(&e.path)) {
                return Ok(Snapshot::new(page, image));
            }
        }
        self.capture(page, item)
    }

    /// Forget prefetched captures once a rebuild has consumed them
    pub fn discard_prefetched(&mut self) {
        self.prefetched = Default::default();
    }
}

impl Drop for SnapshotCache {
    fn drop(&mut self) {
        if let Some(ref disk) = self.disk {
            disk.remove_all();
        }
    }
}

impl std::fmt::Debug for SnapshotCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotCache")
            .field("mode", &self.mode)
            .field("prefetched", &self.prefetched)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePage;

    #[test]
    fn test_capture_requires_realized_surface() {
        let cache = SnapshotCache::on_demand();

        let realized = FakePage::realized(3);
        let snapshot = cache.capture(3, &realized).unwrap();
        assert_eq!(snapshot.page(), 3);
        assert_eq!(snapshot.image().dimensions(), FakePage::LAID_OUT);

        let unrealized = FakePage::unrealized(4);
        assert!(matches!(
            cache.capture(4, &unrealized),
            Err(Error::SnapshotUnavailable(4))
        ));
    }

    #[test]
    fn test_prefetch_is_noop_on_demand() {
        let mut cache = SnapshotCache::on_demand();
        let page = FakePage::realized(1);
        cache.prefetch(&[(SlotPosition::Prev, 1, &page)], Extent::new(10, 10));
        assert!(!cache.has_prefetched(1));
    }

    #[test]
    fn test_prefetch_persists_at_viewport_size() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = SnapshotCache::new(SnapshotMode::Prefetch, dir.path(), 50);

        // Unrealized pages can still be laid out at an explicit size
        let prev = FakePage::unrealized(4);
        let next = FakePage::realized(1);
        cache.prefetch(
            &[(SlotPosition::Prev, 4, &prev), (SlotPosition::Next, 1, &next)],
            Extent::new(12, 6),
        );
        assert!(cache.has_prefetched(4));
        assert!(cache.has_prefetched(1));

        // Resolved from disk, so the size is the viewport's
        let snapshot = cache.resolve(1, &next).unwrap();
        assert_eq!(snapshot.image().dimensions(), (12, 6));

        cache.discard_prefetched();
        assert!(!cache.has_prefetched(1));
        let snapshot = cache.resolve(1, &next).unwrap();
        assert_eq!(snapshot.image().dimensions(), FakePage::LAID_OUT);
    }

    #[test]
    fn test_uncreatable_cache_dir_disables_prefetch() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let mut cache = SnapshotCache::new(SnapshotMode::Prefetch, &blocker, 50);
        assert_eq!(cache.mode(), SnapshotMode::Prefetch);

        let page = FakePage::realized(2);
        cache.prefetch(&[(SlotPosition::Next, 2, &page)], Extent::new(8, 8));
        assert!(!cache.has_prefetched(2));

        // Dummies still come from a live capture
        let snapshot = cache.resolve(2, &page).unwrap();
        assert_eq!(snapshot.image().dimensions(), FakePage::LAID_OUT);
    }

    #[test]
    fn test_prefetch_skips_slot_on_empty_viewport() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = SnapshotCache::new(SnapshotMode::Prefetch, dir.path(), 50);
        let page = FakePage::realized(2);
        cache.prefetch(&[(SlotPosition::Next, 2, &page)], Extent::new(0, 0));
        assert!(!cache.has_prefetched(2));
    }

    #[test]
    fn test_drop_removes_slot_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = {
            let mut cache = SnapshotCache::new(SnapshotMode::Prefetch, dir.path(), 50);
            let page = FakePage::realized(0);
            cache.prefetch(&[(SlotPosition::Prev, 0, &page)], Extent::new(4, 4));
            let path = cache.prefetched[0].as_ref().unwrap().path.clone();
            assert!(path.starts_with(dir.path().join("snapshots")));
            assert!(path.exists());
            path
        };
        assert!(!path.exists());
    }
}
