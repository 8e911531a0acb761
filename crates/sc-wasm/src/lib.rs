//! WASM bridge for Scribble: exposes the drawing engine to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the `<canvas>`
//! and forwards DOM events; everything else happens here.

mod logger;
mod present;

use sc_core::{ImageFormat, SketchConfig};
use sc_editor::session::ActionOutcome;
use sc_editor::shortcuts::action_name;
use sc_editor::{InputEvent, PointerPhase, PointerSample, ShortcutMap, SketchSession, SurfaceOrigin};
use sc_render::RasterSurface;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

/// The main WASM-facing drawing controller.
///
/// Holds the session (renderer, raster and live brush). All interaction from
/// the page goes through this struct.
#[wasm_bindgen]
pub struct SketchCanvas {
    session: SketchSession<RasterSurface>,
}

#[wasm_bindgen]
impl SketchCanvas {
    /// Create a controller. `config_json` is an optional camelCase
    /// `SketchConfig`; missing fields take defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<SketchCanvas, JsValue> {
        console_error_panic_hook_setup();
        logger::init(log::LevelFilter::Warn);

        let config = match config_json.as_deref() {
            Some(json) => SketchConfig::from_json(json).map_err(to_js)?,
            None => SketchConfig::default(),
        };
        Ok(Self {
            session: SketchSession::new(RasterSurface::new(), config),
        })
    }

    /// Size the buffer to the canvas' layout box times `devicePixelRatio`,
    /// and set the element's backing size to match. Clears the drawing.
    pub fn initialize(&mut self, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
        let rect = canvas.get_bounding_client_rect();
        let density = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let size = self
            .session
            .initialize(rect.width() as f32, rect.height() as f32, density as f32)
            .map_err(to_js)?;
        canvas.set_width(size.pixel_width);
        canvas.set_height(size.pixel_height);
        Ok(())
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Returns `true` if the drawing changed.
    pub fn mouse_down(&mut self, canvas: &HtmlCanvasElement, event: &MouseEvent) -> bool {
        self.mouse(canvas, event, PointerPhase::Start)
    }

    pub fn mouse_move(&mut self, canvas: &HtmlCanvasElement, event: &MouseEvent) -> bool {
        self.mouse(canvas, event, PointerPhase::Move)
    }

    pub fn mouse_up(&mut self, canvas: &HtmlCanvasElement, event: &MouseEvent) -> bool {
        self.mouse(canvas, event, PointerPhase::End)
    }

    pub fn mouse_leave(&mut self, canvas: &HtmlCanvasElement, event: &MouseEvent) -> bool {
        self.mouse(canvas, event, PointerPhase::Leave)
    }

    pub fn touch_start(&mut self, canvas: &HtmlCanvasElement, event: &TouchEvent) -> bool {
        self.touch(canvas, event, PointerPhase::Start)
    }

    pub fn touch_move(&mut self, canvas: &HtmlCanvasElement, event: &TouchEvent) -> bool {
        self.touch(canvas, event, PointerPhase::Move)
    }

    pub fn touch_end(&mut self, canvas: &HtmlCanvasElement, event: &TouchEvent) -> bool {
        self.touch(canvas, event, PointerPhase::End)
    }

    pub fn touch_cancel(&mut self, canvas: &HtmlCanvasElement, event: &TouchEvent) -> bool {
        self.touch(canvas, event, PointerPhase::Cancel)
    }

    /// Whether a stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        self.session.renderer().is_drawing()
    }

    // ─── Presentation ────────────────────────────────────────────────────

    /// Copy pixels changed since the last call onto `ctx`.
    /// Returns `true` if anything was uploaded.
    pub fn present(&mut self, ctx: &CanvasRenderingContext2d) -> Result<bool, JsValue> {
        present::present_dirty(ctx, self.session.renderer_mut().surface_mut())
    }

    /// Upload the whole buffer regardless of what changed.
    pub fn repaint(&mut self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        present::repaint(ctx, self.session.renderer_mut().surface_mut())
    }

    pub fn clear(&mut self) {
        self.session.clear();
    }

    // ─── Export ──────────────────────────────────────────────────────────

    /// Encode the buffer as `"png"`, `"jpeg"` or `"bmp"` (MIME types accepted).
    pub fn export_image(&self, format: &str) -> Result<Vec<u8>, JsValue> {
        self.session.export_image(format).map_err(to_js)
    }

    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        self.session.export_png().map_err(to_js)
    }

    /// MIME type for `format`, for building the download data URL.
    pub fn export_mime_type(&self, format: &str) -> Result<String, JsValue> {
        let format: ImageFormat = format.parse().map_err(to_js)?;
        Ok(format.mime_type().to_string())
    }

    pub fn export_file_name(&self) -> String {
        self.session.export_file_name().to_string()
    }

    // ─── Brush ───────────────────────────────────────────────────────────

    /// Returns the width in effect after clamping.
    pub fn set_brush_width(&mut self, width: f32) -> f32 {
        self.session.set_brush_width(width)
    }

    pub fn brush_width(&self) -> f32 {
        self.session.brush().width
    }

    /// Returns `false` and keeps the old color if `hex` does not parse.
    pub fn set_brush_color(&mut self, hex: &str) -> bool {
        self.session.set_brush_color_hex(hex)
    }

    pub fn brush_color(&self) -> String {
        self.session.brush().color.to_hex()
    }

    pub fn set_eraser(&mut self, on: bool) {
        self.session.set_eraser(on);
    }

    pub fn toggle_eraser(&mut self) -> bool {
        self.session.toggle_eraser()
    }

    pub fn eraser(&self) -> bool {
        self.session.brush().eraser
    }

    pub fn pick_swatch(&mut self, index: usize) -> bool {
        self.session.pick_swatch(index)
    }

    /// Quick colors as a JSON array of hex strings.
    pub fn swatches_json(&self) -> String {
        serde_json::to_string(&self.session.config().swatches).unwrap_or_else(|_| "[]".into())
    }

    /// Current brush: `{"color":"#rrggbb","width":6.0,"eraser":false}`.
    pub fn brush_json(&self) -> String {
        serde_json::to_string(self.session.brush()).unwrap_or_else(|_| "{}".into())
    }

    // ─── Keyboard Shortcut API ───────────────────────────────────────────

    /// Handle a keyboard event. Returns a JSON string:
    /// `{"handled":bool,"action":"<action_name>","outcome":"<outcome>"}`
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        let Some(action) = ShortcutMap::resolve(key, ctrl, shift, alt, meta) else {
            return r#"{"handled":false,"action":"none","outcome":"none"}"#.to_string();
        };
        let outcome = self.session.apply(action);
        serde_json::json!({
            "handled": true,
            "action": action_name(action),
            "outcome": outcome_name(outcome),
        })
        .to_string()
    }

    /// Change console verbosity (`"off"`, `"error"` … `"trace"`).
    pub fn set_log_level(&self, level: &str) -> bool {
        match logger::parse_level(level) {
            Some(filter) => {
                log::set_max_level(filter);
                true
            }
            None => false,
        }
    }
}

// Non-exported helpers
impl SketchCanvas {
    fn mouse(&mut self, canvas: &HtmlCanvasElement, event: &MouseEvent, phase: PointerPhase) -> bool {
        event.prevent_default();
        let sample = PointerSample::mouse(event.client_x() as f32, event.client_y() as f32);
        self.dispatch(phase, &sample, origin_of(canvas))
    }

    fn touch(&mut self, canvas: &HtmlCanvasElement, event: &TouchEvent, phase: PointerPhase) -> bool {
        event.prevent_default();
        let list = event.touches();
        let points: Vec<(f32, f32)> = (0..list.length())
            .filter_map(|i| list.get(i))
            .map(|t| (t.client_x() as f32, t.client_y() as f32))
            .collect();
        self.dispatch(phase, &PointerSample::touch(&points), origin_of(canvas))
    }

    fn dispatch(&mut self, phase: PointerPhase, sample: &PointerSample, origin: SurfaceOrigin) -> bool {
        match InputEvent::normalize(phase, sample, origin) {
            Some(event) => self.session.handle(&event),
            None => false,
        }
    }
}

fn origin_of(canvas: &HtmlCanvasElement) -> SurfaceOrigin {
    let rect = canvas.get_bounding_client_rect();
    SurfaceOrigin {
        left: rect.left() as f32,
        top: rect.top() as f32,
    }
}

fn outcome_name(outcome: ActionOutcome) -> &'static str {
    match outcome {
        ActionOutcome::None => "none",
        ActionOutcome::BrushChanged => "brushChanged",
        ActionOutcome::SurfaceChanged => "surfaceChanged",
        ActionOutcome::SaveRequested => "saveRequested",
    }
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Scribble WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone validation (no canvas needed) ────────────────────────────

/// Validate a config document. Returns JSON: `{"ok":true}` or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_config(json: &str) -> String {
    match SketchConfig::from_json(json) {
        Ok(_) => r#"{"ok":true}"#.to_string(),
        Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }).to_string(),
    }
}
