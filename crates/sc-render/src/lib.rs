//! Software raster backend for the stroke renderer.

pub mod encode;
pub mod raster;

pub use raster::{PixelRect, RasterSurface};
