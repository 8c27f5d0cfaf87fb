use crate::constants::*;
use crate::types::*;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunable viewer behaviour
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewerOptions {
    /// Viewport padding and spread gap, in pixels
    pub padding: u32,

    // Flip animation
    pub flip_step: f32,
    pub tick_interval_ms: u64,
    pub min_flip_scale: f32,

    // Zoom
    pub zoom_step: f32,

    /// Compositor background as RGB
    pub background: [u8; 3],
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            flip_step: DEFAULT_FLIP_STEP,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            min_flip_scale: DEFAULT_MIN_FLIP_SCALE,
            zoom_step: DEFAULT_ZOOM_STEP,
            background: DEFAULT_BACKGROUND,
        }
    }
}

impl ViewerOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let options: Self = serde_json::from_slice(&bytes)?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !(self.flip_step > 0.0 && self.flip_step <= 1.0) {
            return Err(ViewerError::Config(format!(
                "Flip step must be in (0, 1], got {}",
                self.flip_step
            )));
        }

        if self.tick_interval_ms == 0 {
            return Err(ViewerError::Config(
                "Tick interval must be at least 1 ms".to_string(),
            ));
        }

        if !(self.min_flip_scale > 0.0 && self.min_flip_scale <= 1.0) {
            return Err(ViewerError::Config(format!(
                "Minimum flip scale must be in (0, 1], got {}",
                self.min_flip_scale
            )));
        }

        if !(self.zoom_step > 1.0 && self.zoom_step.is_finite()) {
            return Err(ViewerError::Config(format!(
                "Zoom step must be greater than 1, got {}",
                self.zoom_step
            )));
        }

        Ok(())
    }
}
