//! Test doubles shared by the unit tests.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::{Rgba, RgbaImage};

use crate::content::{Displayable, Extent};
use crate::slot::SlotPosition;
use crate::viewport::Viewport;

/// Page whose surface is either realized (laid out) or not
#[derive(Debug)]
pub struct FakePage {
    id: usize,
    realized: bool,
}

impl FakePage {
    pub const LAID_OUT: (u32, u32) = (16, 9);

    pub fn realized(id: usize) -> Self {
        Self { id, realized: true }
    }

    pub fn unrealized(id: usize) -> Self {
        Self { id, realized: false }
    }

    pub fn id(&self) -> usize {
        self.id
    }
}

impl Displayable for FakePage {
    fn rasterize(&self, extent: Option<Extent>) -> Option<RgbaImage> {
        let (width, height) = match extent {
            Some(extent) => (extent.width, extent.height),
            None if self.realized => Self::LAID_OUT,
            None => return None,
        };
        Some(RgbaImage::from_pixel(
            width,
            height,
            Rgba([(self.id * 40 % 256) as u8, 90, 160, 255]),
        ))
    }
}

pub fn pages(len: usize) -> Rc<[FakePage]> {
    (0..len).map(FakePage::realized).collect()
}

pub fn unrealized_pages(len: usize) -> Rc<[FakePage]> {
    (0..len).map(FakePage::unrealized).collect()
}

/// Viewport that records every jump
#[derive(Debug)]
pub struct RecordingViewport {
    pub current: SlotPosition,
    pub jumps: Vec<(SlotPosition, bool)>,
    cache_dir: PathBuf,
}

impl RecordingViewport {
    pub const SIZE: (u32, u32) = (24, 12);

    pub fn with_cache_dir(dir: &Path) -> Self {
        Self {
            cache_dir: dir.to_path_buf(),
            ..Default::default()
        }
    }
}

impl Default for RecordingViewport {
    fn default() -> Self {
        Self {
            current: SlotPosition::Center,
            jumps: Vec::new(),
            cache_dir: std::env::temp_dir().join("ringpager-tests"),
        }
    }
}

impl Viewport for RecordingViewport {
    fn current_slot(&self) -> SlotPosition {
        self.current
    }

    fn jump_to_slot(&mut self, slot: SlotPosition, animate: bool) {
        self.current = slot;
        self.jumps.push((slot, animate));
    }

    fn viewport_size(&self) -> Extent {
        Extent::new(Self::SIZE.0, Self::SIZE.1)
    }

    fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone()
    }
}
