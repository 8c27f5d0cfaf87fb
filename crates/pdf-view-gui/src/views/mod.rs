pub mod toolbar;
pub mod viewer;

pub use toolbar::show_toolbar;
pub use viewer::{show_canvas, viewport_pixels};

/// User requests coming from the toolbar or the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    Open,
    PreviousPage,
    NextPage,
    JumpTo(usize),
    ZoomIn,
    ZoomOut,
    ToggleFit,
    ToggleDual,
    ToggleLog,
}
