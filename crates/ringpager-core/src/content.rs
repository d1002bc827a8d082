use image::RgbaImage;

/// Pixel dimensions of a viewport or capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A page that can be shown in a slot.
///
/// Implemented by application content. The pager never mutates pages; it
/// only asks them to rasterize their current appearance when a stand-in is
/// needed.
pub trait Displayable {
    /// Render the current appearance.
    ///
    /// With `extent`, lay out at that size first; without it, use the size
    /// the page was last laid out at. Returns `None` when the page has no
    /// realized drawing surface yet.
    fn rasterize(&self, extent: Option<Extent>) -> Option<RgbaImage>;
}

impl<T: Displayable + ?Sized> Displayable for std::rc::Rc<T> {
    fn rasterize(&self, extent: Option<Extent>) -> Option<RgbaImage> {
        (**self).rasterize(extent)
    }
}
