//! Interface to the PDF rasterizing backend
//!
//! The viewer never parses PDF content itself. A [`Rasterizer`] opens
//! documents, and each [`RasterDocument`] renders its pages to pixel
//! buffers. Closing a document is dropping it.

use crate::types::{PageSize, PixelBuffer, Result};
use std::path::Path;

pub trait Rasterizer {
    /// Open a document; fails with `ViewerError::DocumentOpen`
    fn open(&self, path: &Path) -> Result<Box<dyn RasterDocument>>;
}

pub trait RasterDocument {
    fn page_count(&self) -> usize;

    /// Size of the page at scale 1.0, in points
    fn page_size(&self, index: usize) -> Result<PageSize>;

    /// Render the page at `scale`; fails with `ViewerError::Render`
    fn render_page(&self, index: usize, scale: f32) -> Result<PixelBuffer>;
}
