//! PDFium-backed rasterizer

use crate::rasterizer::{RasterDocument, Rasterizer};
use crate::types::*;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};

/// Initialize Pdfium, trying a vendored library first, then falling back to system.
///
/// The vendored directory is `vendor_dir` if given, else the one the build
/// script downloaded into, else `vendor/pdfium/lib` under the working directory.
pub fn init_pdfium(vendor_dir: Option<&Path>) -> std::result::Result<Pdfium, PdfiumError> {
    let vendor_path = vendor_dir
        .map(Path::to_path_buf)
        .or_else(|| option_env!("PDFIUM_VENDOR_DIR").map(PathBuf::from))
        .filter(|p| p.exists())
        .or_else(|| {
            std::env::current_dir().ok().and_then(|mut p| {
                p.push("vendor/pdfium/lib");
                if p.exists() { Some(p) } else { None }
            })
        });

    if let Some(vendor_path) = vendor_path {
        if let Ok(binding) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&vendor_path))
        {
            return Ok(Pdfium::new(binding));
        }
        log::debug!(
            "No usable Pdfium library in {}, trying system library",
            vendor_path.display()
        );
    }

    Pdfium::bind_to_system_library().map(Pdfium::new)
}

/// Opens documents through a process-wide Pdfium binding
pub struct PdfiumRasterizer {
    pdfium: &'static Pdfium,
}

impl PdfiumRasterizer {
    /// Bind Pdfium. The binding lives for the rest of the process so that
    /// open documents can borrow it.
    pub fn new(vendor_dir: Option<&Path>) -> std::result::Result<Self, PdfiumError> {
        let pdfium = init_pdfium(vendor_dir)?;
        Ok(Self {
            pdfium: Box::leak(Box::new(pdfium)),
        })
    }
}

impl Rasterizer for PdfiumRasterizer {
    fn open(&self, path: &Path) -> Result<Box<dyn RasterDocument>> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| ViewerError::open(path, e))?;
        let page_count = document.pages().len() as usize;

        Ok(Box::new(PdfiumDocument {
            path: path.to_path_buf(),
            document,
            page_count,
        }))
    }
}

struct PdfiumDocument {
    path: PathBuf,
    document: PdfDocument<'static>,
    page_count: usize,
}

fn pdfium_page_index(index: usize) -> Result<u16> {
    u16::try_from(index).map_err(|_| ViewerError::render(index, "page index out of range"))
}

impl RasterDocument for PdfiumDocument {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_size(&self, index: usize) -> Result<PageSize> {
        let page = self
            .document
            .pages()
            .get(pdfium_page_index(index)?)
            .map_err(|e| ViewerError::render(index, e))?;
        Ok(PageSize::new(page.width().value, page.height().value))
    }

    fn render_page(&self, index: usize, scale: f32) -> Result<PixelBuffer> {
        let page = self
            .document
            .pages()
            .get(pdfium_page_index(index)?)
            .map_err(|e| ViewerError::render(index, e))?;
        let config = PdfRenderConfig::new().scale_page_by_factor(scale);

        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| ViewerError::render(index, e))?;
        let width = bitmap.width() as u32;
        let height = bitmap.height() as u32;

        Ok(PixelBuffer::new(
            width,
            height,
            PixelFormat::Rgba,
            bitmap.as_rgba_bytes().to_vec(),
        ))
    }
}

impl Drop for PdfiumDocument {
    fn drop(&mut self) {
        log::debug!("Releasing Pdfium document {}", self.path.display());
    }
}
