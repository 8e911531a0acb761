//! Upload raster pixels to an HTML `<canvas>`.
//!
//! `putImageData` ignores the context transform and works in buffer pixels,
//! which is exactly the raster's coordinate space. Only the region touched
//! since the last upload is copied.

use sc_render::{PixelRect, RasterSurface};
use wasm_bindgen::{Clamped, JsValue};
use web_sys::{CanvasRenderingContext2d, ImageData};

/// Upload the dirty region, if any. Returns `true` if pixels were uploaded.
pub fn present_dirty(
    ctx: &CanvasRenderingContext2d,
    surface: &mut RasterSurface,
) -> Result<bool, JsValue> {
    match surface.take_dirty() {
        Some(rect) => {
            put_region(ctx, surface, rect)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Upload the whole buffer, e.g. after the page recreated the context.
pub fn repaint(ctx: &CanvasRenderingContext2d, surface: &mut RasterSurface) -> Result<(), JsValue> {
    surface.take_dirty();
    let (width, height) = surface.image().dimensions();
    if width == 0 || height == 0 {
        return Ok(());
    }
    put_region(
        ctx,
        surface,
        PixelRect {
            x: 0,
            y: 0,
            width,
            height,
        },
    )
}

fn put_region(
    ctx: &CanvasRenderingContext2d,
    surface: &RasterSurface,
    rect: PixelRect,
) -> Result<(), JsValue> {
    let bytes = surface.region_rgba(rect);
    let data = ImageData::new_with_u8_clamped_array_and_sh(Clamped(&bytes), rect.width, rect.height)?;
    ctx.put_image_data(&data, rect.x as f64, rect.y as f64)?;
    log::trace!(
        "presented {}x{} at ({}, {})",
        rect.width,
        rect.height,
        rect.x,
        rect.y
    );
    Ok(())
}
