use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageError, RgbaImage};
use tempfile::TempDir;

use crate::error::{Error, Result};

/// Transient on-disk store for pre-fetched snapshots, one file per slot.
///
/// Each instance writes into its own directory under `<cache_dir>/snapshots`,
/// removed again when the instance is dropped.
#[derive(Debug)]
pub struct SnapshotDiskCache {
    dir: TempDir,
    /// JPEG quality (1-100)
    quality: u8,
}

impl SnapshotDiskCache {
    pub fn new(cache_dir: &Path, quality: u8) -> std::io::Result<Self> {
        let snapshots = cache_dir.join("snapshots");
        std::fs::create_dir_all(&snapshots)?;
        let dir = tempfile::Builder::new()
            .prefix(&format!("ringpager-{}-", std::process::id()))
            .tempdir_in(&snapshots)?;
        Ok(Self {
            dir,
            quality: quality.clamp(1, 100),
        })
    }

    /// Directory holding this instance's slot files
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// File for a slot; unique per slot within this instance
    pub fn slot_path(&self, slot: usize) -> PathBuf {
        self.dir.path().join(format!("slot-{}.jpg", slot))
    }

    /// Encode `image` as JPEG into the slot's file
    pub fn save(&self, slot: usize, image: &RgbaImage) -> Result<PathBuf> {
        let path = self.slot_path(slot);
        let persist = |source: std::io::Error| Error::SnapshotPersistFailure { slot, source };

        let file = File::create(&path).map_err(persist)?;
        let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), self.quality);
        // JPEG has no alpha channel
        let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
        rgb.write_with_encoder(encoder).map_err(|e| match e {
            ImageError::IoError(source) => persist(source),
            other => persist(std::io::Error::other(other)),
        })?;

        Ok(path)
    }

    /// Decode a previously saved snapshot
    pub fn load(&self, path: &Path) -> Option<RgbaImage> {
        match image::open(path) {
            Ok(img) => Some(img.to_rgba8()),
            Err(e) => {
                tracing::warn!("Failed to reload snapshot {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Remove every slot file this instance wrote
    pub fn remove_all(&self) {
        for slot in 0..crate::slot::SLOT_COUNT {
            let path = self.slot_path(slot);
            if path.exists() {
                if let Err(e) = std::fs::remove_file(&path) {
                    tracing::debug!("Failed to remove {}: {}", path.display(), e);
                }
            }
        }
    }
}
