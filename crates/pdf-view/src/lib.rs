pub mod animation;
pub mod compose;
pub mod constants;
pub mod controller;
mod options;
#[cfg(feature = "pdfium")]
pub mod pdfium;
pub mod rasterizer;
pub mod scale;
mod types;

pub use animation::{FlipAnimator, FlipState, FlipTick, FlipTransition, TickClock};
pub use compose::{ComposedFrame, FrameKind, LayoutCompositor, Spread};
pub use controller::{ViewState, ViewportController, page_indicator};
pub use options::*;
pub use rasterizer::{RasterDocument, Rasterizer};
pub use scale::{ScaleResolver, Zoom};
pub use types::*;
