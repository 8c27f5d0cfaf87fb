//! Page composition
//!
//! Turns one or two rasterized pages into the single bitmap handed to
//! the display surface, together with its placement in the viewport.

use crate::constants::*;
use crate::types::{PageImage, Viewport};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

/// The pages visible in one render pass
#[derive(Debug, Clone)]
pub enum Spread {
    Single(PageImage),
    Dual(PageImage, PageImage),
}

impl Spread {
    pub fn first_page(&self) -> usize {
        match self {
            Spread::Single(page) | Spread::Dual(page, _) => page.page_index,
        }
    }

    pub fn last_page(&self) -> usize {
        match self {
            Spread::Single(page) | Spread::Dual(_, page) => page.page_index,
        }
    }
}

/// How a frame was produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameKind {
    /// Regular view of the current page(s)
    Steady,
    /// Intermediate frame of a page flip
    Flip { progress: f32, scale_x: f32 },
}

/// Bitmap plus placement for one render pass
#[derive(Debug, Clone)]
pub struct ComposedFrame {
    pub image: RgbaImage,
    /// Top-left corner inside the viewport; negative when the image overflows
    pub offset_x: i32,
    pub offset_y: i32,
    /// Size of the scrollable region the display surface should expose
    pub scroll_region: (u32, u32),
    pub first_page: usize,
    pub last_page: usize,
    pub kind: FrameKind,
}

impl ComposedFrame {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn is_flip(&self) -> bool {
        matches!(self.kind, FrameKind::Flip { .. })
    }

    /// Top-left corner of the image inside the scroll region.
    ///
    /// A steady frame's region grows to hold an oversized image, so it starts
    /// at the region edge. A flip frame's region is the viewport, so it keeps
    /// its centring offset and is clipped on both sides.
    pub fn placement(&self) -> (i32, i32) {
        match self.kind {
            FrameKind::Steady => (self.offset_x.max(0), self.offset_y.max(0)),
            FrameKind::Flip { .. } => (self.offset_x, self.offset_y),
        }
    }
}

/// Places single pages and side-by-side spreads on a canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCompositor {
    gap: u32,
    background: Rgba<u8>,
}

impl LayoutCompositor {
    pub fn new(gap: u32, background: [u8; 3]) -> Self {
        let [r, g, b] = background;
        Self {
            gap,
            background: Rgba([r, g, b, u8::MAX]),
        }
    }

    /// Steady-state frame: the spread centered in the viewport
    pub fn compose(&self, spread: Spread, viewport: Viewport) -> ComposedFrame {
        let first_page = spread.first_page();
        let last_page = spread.last_page();
        let image = self.combine(spread);
        let (offset_x, offset_y) = center_offset(viewport, image.width(), image.height());

        ComposedFrame {
            scroll_region: (
                viewport.width.max(image.width()),
                viewport.height.max(image.height()),
            ),
            image,
            offset_x,
            offset_y,
            first_page,
            last_page,
            kind: FrameKind::Steady,
        }
    }

    /// Flip frame: the spread squashed horizontally by `scale_x` and re-centered
    pub fn compose_flip(
        &self,
        spread: Spread,
        viewport: Viewport,
        progress: f32,
        scale_x: f32,
    ) -> ComposedFrame {
        let first_page = spread.first_page();
        let last_page = spread.last_page();
        let image = squash_horizontal(&self.combine(spread), scale_x);
        let (offset_x, offset_y) = center_offset(viewport, image.width(), image.height());

        ComposedFrame {
            image,
            offset_x,
            offset_y,
            scroll_region: (viewport.width, viewport.height),
            first_page,
            last_page,
            kind: FrameKind::Flip { progress, scale_x },
        }
    }

    /// Merge a spread into one image; a single page passes through unchanged
    pub fn combine(&self, spread: Spread) -> RgbaImage {
        match spread {
            Spread::Single(page) => page.image,
            Spread::Dual(left, right) => {
                let width = left.width() + self.gap + right.width();
                let height = left.height().max(right.height());
                let mut canvas = RgbaImage::from_pixel(width, height, self.background);

                imageops::replace(&mut canvas, &left.image, 0, 0);
                let right_x = i64::from(left.width() + self.gap);
                imageops::replace(&mut canvas, &right.image, right_x, 0);

                canvas
            }
        }
    }
}

impl Default for LayoutCompositor {
    fn default() -> Self {
        Self::new(DEFAULT_PADDING, DEFAULT_BACKGROUND)
    }
}

/// Offset that centers an image in the viewport, using floor division
pub fn center_offset(viewport: Viewport, width: u32, height: u32) -> (i32, i32) {
    let x = (i64::from(viewport.width) - i64::from(width)).div_euclid(2);
    let y = (i64::from(viewport.height) - i64::from(height)).div_euclid(2);
    (saturate_i32(x), saturate_i32(y))
}

fn saturate_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Resample to `round(width * scale_x)` columns (at least one) with a Lanczos filter
pub fn squash_horizontal(image: &RgbaImage, scale_x: f32) -> RgbaImage {
    let new_width = ((image.width() as f32 * scale_x).round() as u32).max(1);
    if new_width == image.width() {
        return image.clone();
    }
    imageops::resize(image, new_width, image.height(), FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_offset_floors_negative() {
        // (100 - 105) / 2 floors to -3
        assert_eq!(center_offset(Viewport::new(100, 100), 105, 100), (-3, 0));
        assert_eq!(center_offset(Viewport::new(100, 100), 51, 50), (24, 25));
    }

    #[test]
    fn test_squash_rounds_width() {
        let image = RgbaImage::new(10, 4);
        assert_eq!(squash_horizontal(&image, 0.25).dimensions(), (3, 4));
        assert_eq!(squash_horizontal(&image, 0.01).dimensions(), (1, 4));
        assert_eq!(squash_horizontal(&image, 1.0).dimensions(), (10, 4));
    }
}
