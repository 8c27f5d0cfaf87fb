//! Render scale resolution
//!
//! Fit mode derives the scale from the viewport, manual mode uses the
//! stored zoom factor. Either way the result is clamped to
//! `[MIN_SCALE, MAX_RENDER_SCALE]`.

use crate::constants::*;
use crate::types::{PageSize, Viewport};

/// Computes the effective render scale for one page slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleResolver {
    padding: u32,
}

impl ScaleResolver {
    pub fn new(padding: u32) -> Self {
        Self { padding }
    }

    /// Resolve the scale for a page.
    ///
    /// # Arguments
    /// * `viewport` - Display area in pixels
    /// * `page` - Page size in points
    /// * `fit_mode` - Fit the page into the viewport instead of using `manual_zoom`
    /// * `manual_zoom` - Zoom factor used when `fit_mode` is off
    /// * `dual_slot` - The page is one half of a two-page spread
    pub fn resolve(
        &self,
        viewport: Viewport,
        page: PageSize,
        fit_mode: bool,
        manual_zoom: f32,
        dual_slot: bool,
    ) -> f32 {
        let scale = if fit_mode {
            let (available_width, available_height) = self.available_area(viewport, dual_slot);
            let fit_width = available_width as f32 / page.width;
            let fit_height = available_height as f32 / page.height;
            fit_width.min(fit_height)
        } else {
            manual_zoom
        };

        clamp_render_scale(scale)
    }

    /// Area left for one page after padding, halved horizontally for a spread slot
    pub fn available_area(&self, viewport: Viewport, dual_slot: bool) -> (u32, u32) {
        let width = viewport.width.saturating_sub(self.padding * 2).max(1);
        let height = viewport.height.saturating_sub(self.padding * 2).max(1);
        let width = if dual_slot { (width / 2).max(1) } else { width };
        (width, height)
    }
}

impl Default for ScaleResolver {
    fn default() -> Self {
        Self::new(DEFAULT_PADDING)
    }
}

/// Clamp to the render range; NaN (degenerate page sizes) maps to the minimum
pub fn clamp_render_scale(scale: f32) -> f32 {
    if scale.is_nan() {
        return MIN_SCALE;
    }
    scale.clamp(MIN_SCALE, MAX_RENDER_SCALE)
}

/// Manual zoom factor, kept within `[MIN_SCALE, MAX_MANUAL_ZOOM]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom(f32);

impl Zoom {
    pub fn new(factor: f32) -> Self {
        Self(clamp_manual_zoom(factor))
    }

    pub fn factor(self) -> f32 {
        self.0
    }

    pub fn zoom_in(self, step: f32) -> Self {
        Self::new(self.0 * step)
    }

    pub fn zoom_out(self, step: f32) -> Self {
        Self::new(self.0 / step)
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(DEFAULT_ZOOM)
    }
}

fn clamp_manual_zoom(factor: f32) -> f32 {
    if factor.is_nan() {
        return DEFAULT_ZOOM;
    }
    factor.clamp(MIN_SCALE, MAX_MANUAL_ZOOM)
}
