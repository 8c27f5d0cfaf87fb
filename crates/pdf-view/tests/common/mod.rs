#![allow(dead_code)]

use pdf_view::*;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Page size used by `FakeDoc::uniform` (points)
pub const PAGE_WIDTH: f32 = 100.0;
pub const PAGE_HEIGHT: f32 = 200.0;

/// Colour a fake page is filled with, so frames can be traced back to pages
pub fn page_color(index: usize) -> [u8; 4] {
    [index as u8, 100, 200, 255]
}

#[derive(Clone, Default)]
pub struct FakeDoc {
    pub sizes: Vec<PageSize>,
    /// Pages that fail to render; shared so tests can break pages mid-session
    pub failing: Rc<RefCell<HashSet<usize>>>,
}

impl FakeDoc {
    pub fn uniform(page_count: usize) -> Self {
        Self {
            sizes: vec![PageSize::new(PAGE_WIDTH, PAGE_HEIGHT); page_count],
            failing: Rc::default(),
        }
    }

    pub fn with_sizes(sizes: Vec<PageSize>) -> Self {
        Self {
            sizes,
            failing: Rc::default(),
        }
    }
}

/// In-memory rasterizer serving registered paths
#[derive(Default)]
pub struct FakeRasterizer {
    docs: HashMap<PathBuf, FakeDoc>,
    pub opened: Rc<Cell<usize>>,
    pub released: Rc<Cell<usize>>,
    pub renders: Rc<RefCell<Vec<(usize, f32)>>>,
}

impl FakeRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_doc(mut self, path: impl Into<PathBuf>, doc: FakeDoc) -> Self {
        self.docs.insert(path.into(), doc);
        self
    }
}

impl Rasterizer for FakeRasterizer {
    fn open(&self, path: &Path) -> Result<Box<dyn RasterDocument>> {
        let doc = self
            .docs
            .get(path)
            .cloned()
            .ok_or_else(|| ViewerError::open(path, "not a PDF document"))?;
        self.opened.set(self.opened.get() + 1);

        Ok(Box::new(FakeOpenDoc {
            doc,
            released: Rc::clone(&self.released),
            renders: Rc::clone(&self.renders),
        }))
    }
}

struct FakeOpenDoc {
    doc: FakeDoc,
    released: Rc<Cell<usize>>,
    renders: Rc<RefCell<Vec<(usize, f32)>>>,
}

impl RasterDocument for FakeOpenDoc {
    fn page_count(&self) -> usize {
        self.doc.sizes.len()
    }

    fn page_size(&self, index: usize) -> Result<PageSize> {
        self.doc
            .sizes
            .get(index)
            .copied()
            .ok_or_else(|| ViewerError::render(index, "no such page"))
    }

    fn render_page(&self, index: usize, scale: f32) -> Result<PixelBuffer> {
        if self.doc.failing.borrow().contains(&index) {
            return Err(ViewerError::render(index, "corrupt content stream"));
        }
        let size = self.page_size(index)?;
        self.renders.borrow_mut().push((index, scale));

        let width = ((size.width * scale).round() as u32).max(1);
        let height = ((size.height * scale).round() as u32).max(1);
        let [r, g, b, _] = page_color(index);
        let samples = [r, g, b].repeat(width as usize * height as usize);
        Ok(PixelBuffer::new(width, height, PixelFormat::Rgb, samples))
    }
}

impl Drop for FakeOpenDoc {
    fn drop(&mut self) {
        self.released.set(self.released.get() + 1);
    }
}

/// Controller over a fake rasterizer with a 1024x768 viewport
pub fn controller_with(rasterizer: FakeRasterizer) -> ViewportController {
    let mut controller = ViewportController::new(Box::new(rasterizer), ViewerOptions::default());
    controller
        .set_viewport(1024, 768)
        .expect("resizing without a document cannot fail");
    controller
}

/// Controller with `page_count` uniform pages opened from "book.pdf"
pub fn open_book(page_count: usize) -> ViewportController {
    let mut controller =
        controller_with(FakeRasterizer::new().with_doc("book.pdf", FakeDoc::uniform(page_count)));
    controller.open_document("book.pdf").expect("fake document opens");
    controller
}

/// Tick until the running flip finishes, returning the number of ticks taken
pub fn finish_flip(controller: &mut ViewportController) -> usize {
    let mut ticks = 0;
    while controller.is_flipping() {
        controller.tick().expect("flip frame renders");
        ticks += 1;
        assert!(ticks < 100, "flip never finished");
    }
    ticks
}

/// Page shown at the left edge of the current frame
pub fn shown_page(controller: &ViewportController) -> usize {
    let frame = controller.frame().expect("a frame is presented");
    frame.image.get_pixel(0, 0).0[0] as usize
}
