//! Drawing-surface capability.
//!
//! The stroke state machine only needs four primitives from a raster
//! backend: size the buffer, flood it with the background, draw one
//! round-capped segment, and encode the pixels. Anything implementing
//! [`DrawingSurface`] can sit behind the renderer: the in-memory raster in
//! `sc-render`, or a recording fake in tests.

use crate::error::{ExportError, SurfaceAllocationError};
use crate::model::{Color, Point};
use std::fmt;
use std::str::FromStr;

/// Validated buffer dimensions.
///
/// The pixel size is `floor(logical × density)` on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub logical_width: f32,
    pub logical_height: f32,
    pub density: f32,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

impl SurfaceSize {
    /// Validate the requested size against a pixel-count ceiling.
    pub fn new(
        logical_width: f32,
        logical_height: f32,
        density: f32,
        max_pixels: u64,
    ) -> Result<Self, SurfaceAllocationError> {
        let invalid = || SurfaceAllocationError::InvalidDimensions {
            width: logical_width,
            height: logical_height,
            density,
        };

        let all_positive = [logical_width, logical_height, density]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0);
        if !all_positive {
            return Err(invalid());
        }

        let pixel_width = (logical_width as f64 * density as f64).floor() as u64;
        let pixel_height = (logical_height as f64 * density as f64).floor() as u64;
        if pixel_width == 0 || pixel_height == 0 {
            return Err(invalid());
        }

        let too_large = pixel_width
            .checked_mul(pixel_height)
            .is_none_or(|count| count > max_pixels)
            || pixel_width > u32::MAX as u64
            || pixel_height > u32::MAX as u64;
        if too_large {
            return Err(SurfaceAllocationError::TooLarge {
                pixel_width,
                pixel_height,
                limit: max_pixels,
            });
        }

        Ok(Self {
            logical_width,
            logical_height,
            density,
            pixel_width: pixel_width as u32,
            pixel_height: pixel_height as u32,
        })
    }
}

// ─── Export formats ──────────────────────────────────────────────────────

/// Encoded image formats the surface can export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Bmp,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Bmp => "image/bmp",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Bmp => "bmp",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = ExportError;

    /// Accepts a bare name (`"png"`) or a MIME type (`"image/png"`),
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let name = lower.strip_prefix("image/").unwrap_or(&lower);
        match name {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "bmp" => Ok(Self::Bmp),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

// ─── Capability trait ────────────────────────────────────────────────────

/// Minimal raster backend driven by the stroke renderer.
///
/// All coordinates and widths are logical; implementors apply the density
/// scale themselves.
pub trait DrawingSurface {
    /// Size (or re-size) the backing buffer. Previous contents are undefined
    /// until the next [`fill_background`](Self::fill_background).
    fn allocate(&mut self, size: SurfaceSize);

    /// Current size, `None` before the first `allocate`.
    fn size(&self) -> Option<SurfaceSize>;

    /// Flood the whole buffer with `color`.
    fn fill_background(&mut self, color: Color);

    /// Draw a straight segment with round caps and joins. A zero-length
    /// segment renders as a dot of diameter `width`.
    fn draw_rounded_segment(&mut self, from: Point, to: Point, width: f32, color: Color);

    /// Encode the current pixels. Must not mutate the buffer.
    fn encode(&self, format: ImageFormat) -> Result<Vec<u8>, ExportError>;
}
