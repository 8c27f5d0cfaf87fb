//! Shared constants for the viewer pipeline
//!
//! Limits that are part of the viewing model live here. Tunable values
//! have a default here and an override in `ViewerOptions`.

// =============================================================================
// Zoom and Scale
// =============================================================================

/// Lower bound for both manual zoom and resolved render scale
pub const MIN_SCALE: f32 = 0.2;

/// Upper bound for the manually chosen zoom factor
pub const MAX_MANUAL_ZOOM: f32 = 6.0;

/// Upper bound for any resolved render scale (fit mode may exceed manual zoom)
pub const MAX_RENDER_SCALE: f32 = 8.0;

/// Zoom multiplier applied per zoom-in step (divided per zoom-out step)
pub const DEFAULT_ZOOM_STEP: f32 = 1.25;

/// Zoom factor of a freshly opened document
pub const DEFAULT_ZOOM: f32 = 1.0;

// =============================================================================
// Layout
// =============================================================================

/// Viewport padding and the gap between the pages of a spread (pixels)
pub const DEFAULT_PADDING: u32 = 12;

/// Fill colour behind and between composed pages
pub const DEFAULT_BACKGROUND: [u8; 3] = [0x11, 0x13, 0x17];

/// Fill drawn under a steady-state page by the display surface
pub const PAGE_BACKGROUND: [u8; 3] = [0xf7, 0xf7, 0xf7];

/// Offset of the drop shadow drawn behind a steady-state page (pixels)
pub const SHADOW_OFFSET: i32 = 8;

// =============================================================================
// Flip Animation
// =============================================================================

/// Progress added per animation tick
pub const DEFAULT_FLIP_STEP: f32 = 0.15;

/// Delay between animation ticks in milliseconds
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 30;

/// The flip never squashes a page narrower than this fraction of its width
pub const DEFAULT_MIN_FLIP_SCALE: f32 = 0.1;

/// Progress at which the flip swaps from the source page to the target
pub const FLIP_REVEAL_PROGRESS: f32 = 0.5;
