use anyhow::anyhow;
use eframe::egui;
use pdf_view::pdfium::PdfiumRasterizer;
use pdf_view::{TickClock, ViewerError, ViewerOptions, ViewportController};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::logger::AppLogger;
use crate::shortcuts;
use crate::views::{ViewerAction, show_canvas, show_toolbar, viewport_pixels};

pub struct PdfViewApp {
    controller: ViewportController,
    clock: TickClock,

    // Texture mirror of the controller's current frame
    texture: Option<egui::TextureHandle>,
    texture_generation: u64,

    title: String,
    notice: Option<String>,
    logger: AppLogger,
    show_log: bool,
}

impl PdfViewApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        logger: AppLogger,
        options: ViewerOptions,
        initial_file: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        let rasterizer =
            PdfiumRasterizer::new(None).map_err(|e| anyhow!("Failed to load Pdfium: {e}"))?;
        let clock = TickClock::new(options.tick_interval());
        let controller = ViewportController::new(Box::new(rasterizer), options);

        let mut app = Self {
            controller,
            clock,
            texture: None,
            texture_generation: 0,
            title: String::new(),
            notice: None,
            logger,
            show_log: false,
        };
        if let Some(path) = initial_file {
            app.open(&path);
        }
        Ok(app)
    }

    fn open(&mut self, path: &Path) {
        match self.controller.open_document(path) {
            Ok(()) => self.notice = None,
            Err(e) => self.report(e),
        }
    }

    fn pick_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_title("Open PDF")
            .add_filter("PDF files", &["pdf"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            self.open(&path);
        }
    }

    /// Show a failed request in the status bar; the view keeps its last frame
    fn report(&mut self, error: ViewerError) {
        if error.is_render_failure() {
            log::error!("{}", error);
        } else {
            log::warn!("{}", error);
        }
        self.notice = Some(error.to_string());
    }

    fn apply(&mut self, action: ViewerAction) {
        let result = match action {
            ViewerAction::Open => {
                self.pick_file();
                Ok(())
            }
            ViewerAction::PreviousPage => {
                if self.controller.previous_page() {
                    self.clock.restart();
                }
                Ok(())
            }
            ViewerAction::NextPage => {
                if self.controller.next_page() {
                    self.clock.restart();
                }
                Ok(())
            }
            ViewerAction::JumpTo(index) => self.controller.jump_to(index),
            ViewerAction::ZoomIn => self.controller.zoom_in(),
            ViewerAction::ZoomOut => self.controller.zoom_out(),
            ViewerAction::ToggleFit => self.controller.toggle_fit_mode(),
            ViewerAction::ToggleDual => self.controller.toggle_dual_page_mode(),
            ViewerAction::ToggleLog => {
                self.show_log = !self.show_log;
                Ok(())
            }
        };
        match result {
            Err(e) => self.report(e),
            Ok(()) if !matches!(action, ViewerAction::Open | ViewerAction::ToggleLog) => {
                self.notice = None;
            }
            Ok(()) => {}
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .filter(|path| {
                    path.extension()
                        .and_then(|ext| ext.to_str())
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
                })
                .collect()
        });
        // Only the last dropped document stays open
        if let Some(path) = dropped.last() {
            self.open(path);
        }
    }

    fn advance_flip(&mut self) {
        if !self.controller.is_flipping() {
            return;
        }
        let now = Instant::now();
        if self.clock.is_due(now) {
            self.clock.mark(now);
            if let Err(e) = self.controller.tick() {
                self.report(e);
            }
        }
    }

    fn sync_texture(&mut self, ctx: &egui::Context) {
        let generation = self.controller.frame_generation();
        if generation == self.texture_generation {
            return;
        }
        self.texture_generation = generation;

        let Some(frame) = self.controller.frame() else {
            self.texture = None;
            return;
        };
        let size = [frame.width() as usize, frame.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, frame.image.as_raw());
        match &mut self.texture {
            Some(texture) => texture.set(color_image, egui::TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture(
                    "pdf_frame",
                    color_image,
                    egui::TextureOptions::LINEAR,
                ));
            }
        }
    }

    fn sync_title(&mut self, ctx: &egui::Context) {
        let title = self.controller.title();
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }
    }

    fn show_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            match &self.notice {
                Some(notice) => {
                    ui.colored_label(egui::Color32::from_rgb(0xe0, 0x6c, 0x6c), notice);
                }
                None => {
                    if let Some(message) = self.logger.latest_message() {
                        ui.label(message);
                    }
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if !self.controller.has_document() {
                    return;
                }
                let view = self.controller.view();
                if view.fit_mode {
                    ui.label("Fit");
                } else {
                    ui.label(format!("{:.0}%", view.zoom.factor() * 100.0));
                }
            });
        });
    }

    fn show_log_panel(&self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .stick_to_bottom(true)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for entry in self.logger.get_entries() {
                    let color = match entry.level {
                        log::Level::Error => egui::Color32::from_rgb(0xe0, 0x6c, 0x6c),
                        log::Level::Warn => egui::Color32::from_rgb(0xe5, 0xc0, 0x7b),
                        _ => egui::Color32::GRAY,
                    };
                    ui.colored_label(
                        color,
                        format!(
                            "{} {:<5} {}: {}",
                            entry.timestamp.format("%H:%M:%S"),
                            entry.level,
                            entry.target,
                            entry.message
                        ),
                    );
                }
            });
    }
}

impl eframe::App for PdfViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        for action in shortcuts::collect_actions(ctx) {
            self.apply(action);
        }
        self.advance_flip();

        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| show_toolbar(ui, &self.controller, self.show_log))
            .inner;
        if let Some(action) = toolbar_action {
            self.apply(action);
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.show_status_bar(ui));

        if self.show_log {
            egui::TopBottomPanel::bottom("log")
                .resizable(true)
                .default_height(160.0)
                .show(ctx, |ui| self.show_log_panel(ui));
        }

        let [r, g, b] = self.controller.options().background;
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(egui::Color32::from_rgb(r, g, b)))
            .show(ctx, |ui| {
                let (width, height) = viewport_pixels(ui);
                if let Err(e) = self.controller.set_viewport(width, height) {
                    self.report(e);
                }
                self.sync_texture(ui.ctx());
                show_canvas(ui, &self.controller, self.texture.as_ref());
            });

        self.sync_title(ctx);

        if self.controller.is_flipping() {
            ctx.request_repaint_after(self.clock.remaining(Instant::now()));
        }
    }
}
