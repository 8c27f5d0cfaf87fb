//! Viewport coordination
//!
//! [`ViewportController`] owns the open document and the view state and
//! is the only thing allowed to change them. Every request runs to
//! completion on the caller's thread; page flips advance one step per
//! [`ViewportController::tick`] call.

use crate::animation::{FlipAnimator, FlipState, FlipTick};
use crate::compose::{ComposedFrame, LayoutCompositor, Spread};
use crate::options::ViewerOptions;
use crate::rasterizer::{RasterDocument, Rasterizer};
use crate::scale::{ScaleResolver, Zoom};
use crate::types::*;
use std::path::{Path, PathBuf};

/// Window title when nothing is open
pub const EMPTY_TITLE: &str = "PDF Viewer";

/// Page indicator when there is nothing to show
pub const EMPTY_INDICATOR: &str = "—/—";

/// What the user is looking at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub page_index: usize,
    pub zoom: Zoom,
    pub fit_mode: bool,
    pub dual_page: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            page_index: 0,
            zoom: Zoom::default(),
            fit_mode: true,
            dual_page: false,
        }
    }
}

struct OpenDocument {
    path: PathBuf,
    pages: Box<dyn RasterDocument>,
    page_count: usize,
}

pub struct ViewportController {
    rasterizer: Box<dyn Rasterizer>,
    document: Option<OpenDocument>,
    view: ViewState,
    viewport: Viewport,
    options: ViewerOptions,
    resolver: ScaleResolver,
    compositor: LayoutCompositor,
    flip: FlipAnimator,
    frame: Option<ComposedFrame>,
    frame_generation: u64,
    indicator: String,
}

impl ViewportController {
    pub fn new(rasterizer: Box<dyn Rasterizer>, options: ViewerOptions) -> Self {
        Self {
            rasterizer,
            document: None,
            view: ViewState::default(),
            viewport: Viewport::default(),
            resolver: ScaleResolver::new(options.padding),
            compositor: LayoutCompositor::new(options.padding, options.background),
            flip: FlipAnimator::new(options.flip_step, options.min_flip_scale),
            options,
            frame: None,
            frame_generation: 0,
            indicator: EMPTY_INDICATOR.to_string(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    pub fn document_path(&self) -> Option<&Path> {
        self.document.as_ref().map(|doc| doc.path.as_path())
    }

    pub fn page_count(&self) -> usize {
        self.document.as_ref().map_or(0, |doc| doc.page_count)
    }

    /// The most recent frame, left untouched when a render fails
    pub fn frame(&self) -> Option<&ComposedFrame> {
        self.frame.as_ref()
    }

    /// Increases every time `frame` changes
    pub fn frame_generation(&self) -> u64 {
        self.frame_generation
    }

    pub fn flip_state(&self) -> FlipState {
        self.flip.state()
    }

    pub fn is_flipping(&self) -> bool {
        self.flip.is_running()
    }

    /// Page indicator such as `"3/10"` or `"3-4/10"`
    pub fn status(&self) -> &str {
        &self.indicator
    }

    pub fn title(&self) -> String {
        match &self.document {
            None => EMPTY_TITLE.to_string(),
            Some(doc) => {
                let name = doc
                    .path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "Untitled".to_string());
                format!("{} — Page {}", name, self.indicator)
            }
        }
    }

    fn has_pages(&self) -> bool {
        self.page_count() > 0
    }

    // =========================================================================
    // Document lifecycle
    // =========================================================================

    /// Open `path`, replacing the current document.
    ///
    /// The new document is acquired before the old one is dropped, so a
    /// failed open leaves the viewer exactly as it was.
    pub fn open_document(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let pages = match self.rasterizer.open(path) {
            Ok(pages) => pages,
            Err(e) => {
                log::warn!("Could not open {}: {}", path.display(), e);
                return Err(e);
            }
        };
        let page_count = pages.page_count();

        self.flip.reset();
        if let Some(previous) = self.document.replace(OpenDocument {
            path: path.to_path_buf(),
            pages,
            page_count,
        }) {
            log::info!("Closed {}", previous.path.display());
        }
        log::info!("Opened {} ({} pages)", path.display(), page_count);

        self.view = ViewState::default();
        self.clear_frame();
        self.render()
    }

    pub fn close_document(&mut self) {
        if let Some(previous) = self.document.take() {
            log::info!("Closed {}", previous.path.display());
        }
        self.flip.reset();
        self.view = ViewState::default();
        self.clear_frame();
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Step size for prev/next in the current mode
    pub fn page_step(&self) -> usize {
        if self.view.dual_page { 2 } else { 1 }
    }

    pub fn next_page(&mut self) -> bool {
        self.navigate(self.page_step() as isize)
    }

    pub fn previous_page(&mut self) -> bool {
        self.navigate(-(self.page_step() as isize))
    }

    /// Start an animated move by `delta` pages. Returns true if a flip started.
    pub fn navigate(&mut self, delta: isize) -> bool {
        if !self.has_pages() {
            return false;
        }
        if self.flip.is_running() {
            log::warn!("Dropping navigation request while a flip is running");
            return false;
        }

        let current = self.view.page_index;
        let target = self.align(self.clamp_index((current as isize).saturating_add(delta)));
        self.flip
            .start(current, target, FlipDirection::from_delta(delta))
    }

    /// Instant move to `index`, clamped (and pair-aligned in dual mode)
    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        if !self.has_pages() {
            return Ok(());
        }
        if self.flip.is_running() {
            log::warn!("Dropping jump to page {} while a flip is running", index + 1);
            return Ok(());
        }

        let index = isize::try_from(index).unwrap_or(isize::MAX);
        let index = self.align(self.clamp_index(index));
        self.update_view(|view| view.page_index = index)
    }

    fn clamp_index(&self, index: isize) -> usize {
        let last = self.page_count().saturating_sub(1);
        index.clamp(0, last as isize) as usize
    }

    /// Round down to the even pair start when dual-page mode is on
    fn align(&self, index: usize) -> usize {
        if self.view.dual_page {
            index - index % 2
        } else {
            index
        }
    }

    /// Advance a running flip by one step.
    ///
    /// Returns `Ok(None)` when no flip is running. A render failure abandons
    /// the flip on the source page. Mid-flip the last frame stays in place;
    /// when the landing render fails the source page is shown again.
    pub fn tick(&mut self) -> Result<Option<FlipTick>> {
        let Some(tick) = self.flip.tick() else {
            return Ok(None);
        };

        match tick {
            FlipTick::Frame {
                render_index,
                progress,
                scale_x,
            } => {
                let frame = self.build_spread(render_index).map(|spread| {
                    self.compositor
                        .compose_flip(spread, self.viewport, progress, scale_x)
                });
                match frame {
                    Ok(frame) => self.present(frame),
                    Err(e) => {
                        log::warn!("Abandoning flip: {}", e);
                        self.flip.reset();
                        return Err(e);
                    }
                }
            }
            FlipTick::Finished { target } => {
                if let Err(e) = self.update_view(|view| view.page_index = target) {
                    log::warn!("Flip to page {} failed: {}", target + 1, e);
                    // The last squashed frame may already show the target
                    if let Err(restore) = self.render() {
                        log::warn!(
                            "Could not restore page {}: {}",
                            self.view.page_index + 1,
                            restore
                        );
                    }
                    return Err(e);
                }
            }
        }

        Ok(Some(tick))
    }

    // =========================================================================
    // Zoom and modes
    // =========================================================================

    pub fn zoom_in(&mut self) -> Result<()> {
        self.set_manual_zoom(self.view.zoom.zoom_in(self.options.zoom_step))
    }

    pub fn zoom_out(&mut self) -> Result<()> {
        self.set_manual_zoom(self.view.zoom.zoom_out(self.options.zoom_step))
    }

    fn set_manual_zoom(&mut self, zoom: Zoom) -> Result<()> {
        if !self.has_pages() {
            return Ok(());
        }
        log::debug!("Zoom set to {:.2}", zoom.factor());
        self.update_view(|view| {
            view.fit_mode = false;
            view.zoom = zoom;
        })
    }

    pub fn toggle_fit_mode(&mut self) -> Result<()> {
        if !self.has_pages() {
            return Ok(());
        }
        let fit_mode = !self.view.fit_mode;
        log::info!("Fit to window: {}", fit_mode);
        self.update_view(|view| view.fit_mode = fit_mode)
    }

    pub fn toggle_dual_page_mode(&mut self) -> Result<()> {
        if !self.has_pages() {
            return Ok(());
        }
        let dual_page = !self.view.dual_page;
        log::info!("Dual page mode: {}", dual_page);
        self.update_view(|view| view.dual_page = dual_page)
    }

    /// Record a new display size; fit mode re-renders to follow it
    pub fn set_viewport(&mut self, width: u32, height: u32) -> Result<()> {
        let viewport = Viewport::new(width, height);
        if viewport == self.viewport {
            return Ok(());
        }
        self.viewport = viewport;

        if self.view.fit_mode && self.has_pages() && !self.flip.is_running() {
            self.render()
        } else {
            Ok(())
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Steady-state render of the current page or spread.
    ///
    /// On failure the previous frame and indicator stay as they were.
    pub fn render(&mut self) -> Result<()> {
        if !self.has_pages() {
            self.clear_frame();
            return Ok(());
        }

        let spread = self.build_spread(self.view.page_index)?;
        let frame = self.compositor.compose(spread, self.viewport);
        self.indicator = page_indicator(
            self.view.page_index,
            self.page_count(),
            self.view.dual_page,
        );
        self.present(frame);
        Ok(())
    }

    /// Apply a view change and render it; a failed render rolls the change back
    fn update_view(&mut self, change: impl FnOnce(&mut ViewState)) -> Result<()> {
        let previous = self.view;
        change(&mut self.view);
        if let Err(e) = self.render() {
            self.view = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Rasterize the page at `start` and, in dual mode, its right-hand neighbour
    fn build_spread(&self, start: usize) -> Result<Spread> {
        let Some(doc) = &self.document else {
            return Err(ViewerError::render(start, "no document is open"));
        };

        let dual = self.view.dual_page && start + 1 < doc.page_count;
        let left = self.rasterize(doc.pages.as_ref(), start, dual)?;
        if dual {
            let right = self.rasterize(doc.pages.as_ref(), start + 1, dual)?;
            Ok(Spread::Dual(left, right))
        } else {
            Ok(Spread::Single(left))
        }
    }

    fn rasterize(
        &self,
        pages: &dyn RasterDocument,
        index: usize,
        dual_slot: bool,
    ) -> Result<PageImage> {
        let size = pages.page_size(index)?;
        let scale = self.resolver.resolve(
            self.viewport,
            size,
            self.view.fit_mode,
            self.view.zoom.factor(),
            dual_slot,
        );
        log::debug!("Rendering page {} at scale {:.3}", index + 1, scale);

        let image = pages.render_page(index, scale)?.into_rgba(index)?;
        Ok(PageImage {
            page_index: index,
            scale,
            image,
        })
    }

    fn present(&mut self, frame: ComposedFrame) {
        self.frame = Some(frame);
        self.frame_generation += 1;
    }

    fn clear_frame(&mut self) {
        if self.frame.take().is_some() {
            self.frame_generation += 1;
        }
        self.indicator = EMPTY_INDICATOR.to_string();
    }
}

/// Human-readable page indicator, 1-based
pub fn page_indicator(page_index: usize, page_count: usize, dual_page: bool) -> String {
    if page_count == 0 {
        return EMPTY_INDICATOR.to_string();
    }

    let first = page_index + 1;
    if dual_page && page_index + 1 < page_count {
        let last = (page_index + 2).min(page_count);
        format!("{}-{}/{}", first, last, page_count)
    } else {
        format!("{}/{}", first, page_count)
    }
}
