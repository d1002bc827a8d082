use std::cell::Cell;
use std::rc::Rc;

use image::{Rgba, RgbaImage};
use ringpager_core::{Displayable, Extent};

/// A colored demo card.
///
/// Stays unrealized until it is first laid out, either by being drawn or by
/// an explicit `layout()`. Until then it cannot be captured at its own size.
#[derive(Debug, Clone)]
pub struct DemoPage {
    id: usize,
    title: String,
    color: [u8; 3],
    laid_out: Cell<Option<Extent>>,
}

impl DemoPage {
    pub fn new(id: usize, total: usize) -> Self {
        let hue = id as f64 / total.max(1) as f64 * 360.0;
        Self {
            id,
            title: format!("Page {}", id + 1),
            color: hue_to_rgb(hue),
            laid_out: Cell::new(None),
        }
    }

    /// `count` pages with evenly spread colors
    pub fn deck(count: usize) -> Rc<[DemoPage]> {
        (0..count).map(|id| DemoPage::new(id, count)).collect()
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn color(&self) -> [u8; 3] {
        self.color
    }

    pub fn is_realized(&self) -> bool {
        self.laid_out.get().is_some_and(|e| !e.is_empty())
    }

    pub fn layout(&self, extent: Extent) {
        self.laid_out.set(Some(extent));
    }

    fn paint(&self, extent: Extent) -> RgbaImage {
        let [r, g, b] = self.color;
        let stripe = 6 + (self.id as u32 % 3) * 2;
        RgbaImage::from_fn(extent.width, extent.height, |x, y| {
            let border = x == 0 || y == 0 || x + 1 == extent.width || y + 1 == extent.height;
            if border {
                return Rgba([r / 3, g / 3, b / 3, 255]);
            }
            // Darken toward the bottom, lighten every other diagonal band
            let shade = 1.0 - 0.35 * y as f64 / extent.height as f64;
            let band = if ((x + y) / stripe) % 2 == 0 { 1.0 } else { 1.15 };
            let k = |c: u8| (c as f64 * shade * band).min(255.0) as u8;
            Rgba([k(r), k(g), k(b), 255])
        })
    }
}

impl Displayable for DemoPage {
    fn rasterize(&self, extent: Option<Extent>) -> Option<RgbaImage> {
        let extent = match extent {
            Some(extent) => {
                self.layout(extent);
                extent
            }
            None => self.laid_out.get()?,
        };
        if extent.is_empty() {
            return None;
        }
        Some(self.paint(extent))
    }
}

/// HSV with fixed saturation and value
fn hue_to_rgb(hue: f64) -> [u8; 3] {
    let (s, v) = (0.55, 0.85);
    let c = v * s;
    let h = (hue % 360.0) / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    let to_u8 = |f: f64| ((f + m) * 255.0).round() as u8;
    [to_u8(r), to_u8(g), to_u8(b)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrealized_until_laid_out() {
        let page = DemoPage::new(0, 3);
        assert!(!page.is_realized());
        assert!(page.rasterize(None).is_none());

        let image = page.rasterize(Some(Extent::new(12, 8))).unwrap();
        assert_eq!(image.dimensions(), (12, 8));
        assert!(page.is_realized());

        // Later captures reuse the laid-out size
        assert_eq!(page.rasterize(None).unwrap().dimensions(), (12, 8));
    }

    #[test]
    fn test_empty_extent_yields_nothing() {
        let page = DemoPage::new(1, 3);
        assert!(page.rasterize(Some(Extent::new(0, 10))).is_none());
        assert!(!page.is_realized());
    }

    #[test]
    fn test_deck_colors_differ() {
        let deck = DemoPage::deck(4);
        assert_eq!(deck.len(), 4);
        assert_eq!(deck[2].title(), "Page 3");
        assert_ne!(deck[0].color(), deck[2].color());
    }

    #[test]
    fn test_hue_primaries() {
        let red = hue_to_rgb(0.0);
        assert!(red[0] > red[1] && red[0] > red[2]);
        let blue = hue_to_rgb(240.0);
        assert!(blue[2] > blue[0] && blue[2] > blue[1]);
    }
}
