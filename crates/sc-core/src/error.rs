//! Error types for surface allocation, export, and configuration.

use thiserror::Error;

/// The backing buffer could not be sized as requested.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceAllocationError {
    #[error(
        "surface dimensions must be positive and finite (got {width}x{height} at density {density})"
    )]
    InvalidDimensions { width: f32, height: f32, density: f32 },

    #[error("surface of {pixel_width}x{pixel_height} pixels exceeds the {limit} pixel ceiling")]
    TooLarge {
        pixel_width: u64,
        pixel_height: u64,
        limit: u64,
    },
}

/// Encoding the buffer into an image failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    #[error("unsupported image format {0:?}")]
    UnsupportedFormat(String),

    #[error("surface has not been initialized")]
    Uninitialized,

    #[error("image encoding failed: {0}")]
    Encode(String),
}

/// A `SketchConfig` could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("width range {min}..={max} must satisfy 0 < min <= max")]
    InvalidWidthRange { min: f32, max: f32 },

    #[error("brush width {width} lies outside {min}..={max}")]
    InvalidBrushWidth { width: f32, min: f32, max: f32 },

    #[error("pixel ceiling must be positive")]
    ZeroPixelCeiling,
}
