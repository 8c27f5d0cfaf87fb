use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use pdf_view::pdfium::PdfiumRasterizer;
use pdf_view::{RasterDocument, Rasterizer, ViewerOptions, ViewportController};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pdfv", about = "Headless PDF viewer pipeline", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Viewer options JSON file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory containing the Pdfium library
    #[arg(long, global = true)]
    pdfium_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show page count and page sizes
    Info {
        /// Input PDF file
        input: PathBuf,
    },

    /// Render one view of a document to PNG
    Render {
        #[command(flatten)]
        view: ViewArgs,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Write every frame of a page flip to PNG files
    Flip {
        #[command(flatten)]
        view: ViewArgs,

        /// Flip towards the previous page instead of the next
        #[arg(long)]
        backward: bool,

        /// Output directory for frame_NN.png files
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Args)]
struct ViewArgs {
    /// Input PDF file
    input: PathBuf,

    /// Page to show (1-based)
    #[arg(short, long, default_value = "1")]
    page: usize,

    /// Show two pages side by side
    #[arg(long)]
    dual: bool,

    /// Zoom steps away from fit mode (positive zooms in, negative zooms out)
    #[arg(long, allow_negative_numbers = true)]
    zoom_steps: Option<i32>,

    /// Viewport width in pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value = "800")]
    height: u32,
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let config = ConfigBuilder::new()
        .add_filter_allow_str("pdf_view")
        .add_filter_allow_str("pdfv")
        .build();
    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)
        .context("Failed to initialize logging")
}

fn load_options(path: Option<&Path>) -> Result<ViewerOptions> {
    match path {
        Some(path) => ViewerOptions::load(path)
            .with_context(|| format!("Failed to load options from {}", path.display())),
        None => Ok(ViewerOptions::default()),
    }
}

fn rasterizer(pdfium_dir: Option<&Path>) -> Result<PdfiumRasterizer> {
    PdfiumRasterizer::new(pdfium_dir)
        .map_err(|e| anyhow::anyhow!("Failed to initialize Pdfium: {}", e))
}

/// Open the document and bring the controller into the requested view
fn open_view(
    view: &ViewArgs,
    options: ViewerOptions,
    pdfium_dir: Option<&Path>,
) -> Result<ViewportController> {
    let mut controller = ViewportController::new(Box::new(rasterizer(pdfium_dir)?), options);
    controller.set_viewport(view.width, view.height)?;
    controller.open_document(&view.input)?;

    if controller.page_count() == 0 {
        bail!("{} has no pages", view.input.display());
    }
    if view.dual {
        controller.toggle_dual_page_mode()?;
    }
    match view.zoom_steps {
        Some(steps) if steps >= 0 => {
            for _ in 0..steps {
                controller.zoom_in()?;
            }
        }
        Some(steps) => {
            for _ in 0..steps.unsigned_abs() {
                controller.zoom_out()?;
            }
        }
        None => {}
    }
    controller.jump_to(view.page.saturating_sub(1))?;

    Ok(controller)
}

fn save_frame(controller: &ViewportController, path: &Path) -> Result<()> {
    let frame = controller
        .frame()
        .context("Nothing was rendered for this view")?;
    frame
        .image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!(
        "Wrote {} ({}x{}, pages {}-{})",
        path.display(),
        frame.width(),
        frame.height(),
        frame.first_page + 1,
        frame.last_page + 1
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    let options = load_options(cli.config.as_deref())?;
    let pdfium_dir = cli.pdfium_dir.as_deref();

    match cli.command {
        Commands::Info { input } => {
            let document = rasterizer(pdfium_dir)?.open(&input)?;
            println!("{}", input.display());
            println!("  Pages: {}", document.page_count());
            for index in 0..document.page_count() {
                let size = document.page_size(index)?;
                println!(
                    "  Page {}: {:.1} x {:.1} pt",
                    index + 1,
                    size.width,
                    size.height
                );
            }
        }

        Commands::Render { view, output } => {
            let controller = open_view(&view, options, pdfium_dir)?;
            save_frame(&controller, &output)?;
            println!("{} → {}", controller.status(), output.display());
        }

        Commands::Flip {
            view,
            backward,
            output,
        } => {
            let mut controller = open_view(&view, options, pdfium_dir)?;
            std::fs::create_dir_all(&output)
                .with_context(|| format!("Failed to create {}", output.display()))?;

            let started = if backward {
                controller.previous_page()
            } else {
                controller.next_page()
            };
            if !started {
                bail!(
                    "Already at the {} page",
                    if backward { "first" } else { "last" }
                );
            }

            let mut frames = 0;
            save_frame(&controller, &output.join(format!("frame_{:02}.png", frames)))?;
            while controller.tick()?.is_some() {
                frames += 1;
                save_frame(&controller, &output.join(format!("frame_{:02}.png", frames)))?;
            }

            println!(
                "Flip to {} wrote {} frames → {}",
                controller.status(),
                frames + 1,
                output.display()
            );
        }
    }

    Ok(())
}
