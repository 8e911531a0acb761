//! In-memory RGBA raster surface.
//!
//! Strokes are rasterized as capsules: every pixel whose center lies within
//! half the brush width of the segment is painted, with one pixel of linear
//! coverage falloff at the edge for anti-aliasing. A capsule is exactly a
//! round-capped line, and consecutive capsules sharing an endpoint produce a
//! round join, so fast pointer movement never leaves gaps or spikes.

use crate::encode::encode_rgba;
use image::{Rgba, RgbaImage};
use kurbo::{Affine, Point as DevicePoint, Rect};
use sc_core::{Color, DrawingSurface, ExportError, ImageFormat, Point, SurfaceSize};

/// Axis-aligned rectangle in buffer pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &PixelRect) -> PixelRect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        PixelRect {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }
}

/// Software raster implementing [`DrawingSurface`].
pub struct RasterSurface {
    image: RgbaImage,
    size: Option<SurfaceSize>,
    /// Logical → pixel transform (uniform density scale).
    to_pixels: Affine,
    /// Pixels changed since the last `take_dirty`.
    dirty: Option<PixelRect>,
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterSurface {
    /// An unallocated surface. Call `allocate` (via the renderer's
    /// `initialize`) before drawing.
    pub fn new() -> Self {
        Self {
            image: RgbaImage::new(0, 0),
            size: None,
            to_pixels: Affine::IDENTITY,
            dirty: None,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Color of the buffer pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image
            .get_pixel_checked(x, y)
            .map(|Rgba([r, g, b, _])| Color::rgb(*r, *g, *b))
    }

    /// Color of the buffer pixel under a logical position.
    pub fn logical_pixel(&self, at: Point) -> Option<Color> {
        let p = self.to_device(at);
        if p.x < 0.0 || p.y < 0.0 {
            return None;
        }
        self.pixel(p.x.floor() as u32, p.y.floor() as u32)
    }

    /// `true` if every pixel has exactly `color`.
    pub fn is_uniform(&self, color: Color) -> bool {
        let expected = Rgba(color.to_rgba8());
        self.image.pixels().all(|px| *px == expected)
    }

    /// Return and reset the region changed since the previous call.
    pub fn take_dirty(&mut self) -> Option<PixelRect> {
        self.dirty.take()
    }

    /// Copy a region out as tightly packed RGBA rows. The rectangle is
    /// clipped to the buffer.
    pub fn region_rgba(&self, rect: PixelRect) -> Vec<u8> {
        let right = rect.right().min(self.image.width());
        let bottom = rect.bottom().min(self.image.height());
        let mut out = Vec::with_capacity(
            right.saturating_sub(rect.x) as usize * bottom.saturating_sub(rect.y) as usize * 4,
        );
        for y in rect.y..bottom {
            for x in rect.x..right {
                out.extend_from_slice(&self.image.get_pixel(x, y).0);
            }
        }
        out
    }

    fn to_device(&self, at: Point) -> DevicePoint {
        self.to_pixels * DevicePoint::new(at.x as f64, at.y as f64)
    }

    fn full_rect(&self) -> PixelRect {
        PixelRect {
            x: 0,
            y: 0,
            width: self.image.width(),
            height: self.image.height(),
        }
    }

    fn mark_dirty(&mut self, rect: PixelRect) {
        self.dirty = Some(match self.dirty {
            Some(prev) => prev.union(&rect),
            None => rect,
        });
    }
}

impl DrawingSurface for RasterSurface {
    fn allocate(&mut self, size: SurfaceSize) {
        if self.image.dimensions() != (size.pixel_width, size.pixel_height) {
            self.image = RgbaImage::new(size.pixel_width, size.pixel_height);
        }
        self.to_pixels = Affine::scale(size.density as f64);
        self.size = Some(size);
        self.dirty = Some(self.full_rect());
        log::debug!(
            "raster allocated {}x{} px ({}x{} logical @{}x)",
            size.pixel_width,
            size.pixel_height,
            size.logical_width,
            size.logical_height,
            size.density
        );
    }

    fn size(&self) -> Option<SurfaceSize> {
        self.size
    }

    fn fill_background(&mut self, color: Color) {
        let fill = Rgba(color.to_rgba8());
        for px in self.image.pixels_mut() {
            *px = fill;
        }
        if self.size.is_some() {
            self.mark_dirty(self.full_rect());
        }
    }

    fn draw_rounded_segment(&mut self, from: Point, to: Point, width: f32, color: Color) {
        let Some(size) = self.size else {
            return;
        };
        if !(width.is_finite() && width > 0.0) {
            return;
        }

        let a = self.to_device(from);
        let b = self.to_device(to);
        let radius = width as f64 * size.density as f64 / 2.0;

        // Capsule bounds plus one pixel for the anti-aliased rim.
        let bounds = Rect::from_points(a, b)
            .inflate(radius + 1.0, radius + 1.0)
            .intersect(Rect::new(
                0.0,
                0.0,
                self.image.width() as f64,
                self.image.height() as f64,
            ));
        let x0 = bounds.x0.floor().max(0.0) as u32;
        let y0 = bounds.y0.floor().max(0.0) as u32;
        let x1 = (bounds.x1.ceil() as u32).min(self.image.width());
        let y1 = (bounds.y1.ceil() as u32).min(self.image.height());
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let src = color.to_rgba8();
        for y in y0..y1 {
            for x in x0..x1 {
                let center = DevicePoint::new(x as f64 + 0.5, y as f64 + 0.5);
                let coverage = (radius + 0.5 - distance_to_segment(center, a, b)).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let px = self.image.get_pixel_mut(x, y);
                for c in 0..3 {
                    let blended = src[c] as f64 * coverage + px.0[c] as f64 * (1.0 - coverage);
                    px.0[c] = blended.round() as u8;
                }
                px.0[3] = 0xff;
            }
        }

        self.mark_dirty(PixelRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        });
    }

    fn encode(&self, format: ImageFormat) -> Result<Vec<u8>, ExportError> {
        if self.size.is_none() {
            return Err(ExportError::Uninitialized);
        }
        encode_rgba(&self.image, format)
    }
}

/// Euclidean distance from `p` to the segment `a..b`. Degenerates to the
/// point distance when `a == b`.
fn distance_to_segment(p: DevicePoint, a: DevicePoint, b: DevicePoint) -> f64 {
    let ab = b - a;
    let len_sq = ab.hypot2();
    if len_sq <= f64::EPSILON {
        return (p - a).hypot();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).hypot()
}
