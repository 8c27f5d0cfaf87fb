use image::RgbaImage;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Failed to open {}: {reason}", .path.display())]
    DocumentOpen { path: PathBuf, reason: String },
    #[error("Failed to render page {}: {reason}", .page + 1)]
    Render { page: usize, reason: String },
    #[error(
        "Pixel buffer for page {} has {actual} bytes, expected {expected}",
        .page + 1
    )]
    InvalidBuffer {
        page: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ViewerError {
    pub fn open(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ViewerError::DocumentOpen {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn render(page: usize, reason: impl ToString) -> Self {
        ViewerError::Render {
            page,
            reason: reason.to_string(),
        }
    }

    /// True for failures that belong to a single page render rather than the document
    pub fn is_render_failure(&self) -> bool {
        matches!(
            self,
            ViewerError::Render { .. } | ViewerError::InvalidBuffer { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;

/// Display area available to the viewer, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Both dimensions are floored at 1 so scale math never divides by zero
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 800)
    }
}

/// Page dimensions in PDF points at scale 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Sample layout of a rasterized buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb,
    Rgba,
}

impl PixelFormat {
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

/// Raw output of the rasterizer for one page
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub samples: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, format: PixelFormat, samples: Vec<u8>) -> Self {
        Self {
            width,
            height,
            format,
            samples,
        }
    }

    /// Convert into an RGBA image, checking the sample count against the dimensions
    pub fn into_rgba(self, page: usize) -> Result<RgbaImage> {
        let expected = self.width as usize * self.height as usize * self.format.channels();
        if self.samples.len() != expected {
            return Err(ViewerError::InvalidBuffer {
                page,
                expected,
                actual: self.samples.len(),
            });
        }

        let rgba = match self.format {
            PixelFormat::Rgba => self.samples,
            PixelFormat::Rgb => self
                .samples
                .chunks_exact(3)
                .flat_map(|px| [px[0], px[1], px[2], u8::MAX])
                .collect(),
        };

        RgbaImage::from_raw(self.width, self.height, rgba).ok_or(ViewerError::InvalidBuffer {
            page,
            expected,
            actual: 0,
        })
    }
}

/// One rasterized page at one scale
#[derive(Debug, Clone)]
pub struct PageImage {
    pub page_index: usize,
    pub scale: f32,
    pub image: RgbaImage,
}

impl PageImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Direction of a page flip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipDirection {
    Forward,
    Backward,
}

impl FlipDirection {
    /// Forward for positive deltas, backward otherwise
    pub fn from_delta(delta: isize) -> Self {
        if delta > 0 {
            FlipDirection::Forward
        } else {
            FlipDirection::Backward
        }
    }
}
