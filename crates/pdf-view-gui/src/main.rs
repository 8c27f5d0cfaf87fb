#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use pdf_view::ViewerOptions;
use std::path::PathBuf;

mod app;
mod logger;
mod shortcuts;
mod views;

/// Environment variable naming a `ViewerOptions` JSON file
const OPTIONS_ENV: &str = "PDF_VIEW_OPTIONS";

fn load_options() -> ViewerOptions {
    let Some(path) = std::env::var_os(OPTIONS_ENV).map(PathBuf::from) else {
        return ViewerOptions::default();
    };
    match ViewerOptions::load(&path) {
        Ok(options) => {
            log::info!("Loaded viewer options from {}", path.display());
            options
        }
        Err(e) => {
            log::warn!("Ignoring {}: {}", path.display(), e);
            ViewerOptions::default()
        }
    }
}

fn main() -> eframe::Result<()> {
    let logger = logger::AppLogger::new(500);
    if let Err(e) = logger.clone().init() {
        eprintln!("Failed to install logger: {}", e);
    }

    let options = load_options();
    let initial_file = std::env::args_os().nth(1).map(PathBuf::from);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title(pdf_view::controller::EMPTY_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        "PDF Viewer",
        native_options,
        Box::new(move |cc| {
            let app = app::PdfViewApp::new(cc, logger, options, initial_file)?;
            Ok(Box::new(app))
        }),
    )
}
