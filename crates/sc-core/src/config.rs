//! Sketch configuration: background, starting brush, limits, export name.
//!
//! Loaded from camelCase JSON handed over by the host page. Every field is
//! optional; anything missing takes the default below.

use crate::error::ConfigError;
use crate::model::{BrushConfig, Color, DEFAULT_SWATCHES, WidthRange};
use serde::{Deserialize, Serialize};

/// Largest buffer (in pixels) `initialize` will allocate by default.
pub const DEFAULT_MAX_PIXELS: u64 = 64 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SketchConfig {
    /// Fill used by initialize/clear and by the eraser. Default: **#ffffff**.
    pub background: Color,

    /// Brush in effect when the page loads. Default: `#111827`, width 6.
    pub brush: BrushConfig,

    /// Range brush widths are clamped into. Default: **1..=60**.
    pub width_range: WidthRange,

    /// Pixel ceiling for the backing buffer.
    pub max_pixels: u64,

    /// Suggested download name for exports. Default: `painting.png`.
    pub export_file_name: String,

    /// Quick colors, addressed by index.
    pub swatches: Vec<Color>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            brush: BrushConfig::default(),
            width_range: WidthRange::default(),
            max_pixels: DEFAULT_MAX_PIXELS,
            export_file_name: "painting.png".to_string(),
            swatches: DEFAULT_SWATCHES.to_vec(),
        }
    }
}

impl SketchConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let WidthRange { min, max } = self.width_range;
        if !self.width_range.is_valid() {
            return Err(ConfigError::InvalidWidthRange { min, max });
        }
        let width = self.brush.width;
        if !(width.is_finite() && (min..=max).contains(&width)) {
            return Err(ConfigError::InvalidBrushWidth { width, min, max });
        }
        if self.max_pixels == 0 {
            return Err(ConfigError::ZeroPixelCeiling);
        }
        Ok(())
    }
}
