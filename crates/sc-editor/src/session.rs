//! Sketch session: renderer + live brush + configuration.
//!
//! This is what a host holds on to. UI controls mutate the brush through
//! the setters here; pointer events go through [`SketchSession::handle`],
//! which hands the *current* brush to the renderer on every call.

use crate::input::InputEvent;
use crate::shortcuts::{BRUSH_STEP, ShortcutAction};
use crate::stroke::StrokeRenderer;
use sc_core::{
    BrushConfig, Color, DrawingSurface, ExportError, ImageFormat, SketchConfig,
    SurfaceAllocationError, SurfaceSize,
};

/// What the host has to do after a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Nothing visible changed.
    None,
    /// Brush settings changed; refresh the controls.
    BrushChanged,
    /// The surface changed; present it.
    SurfaceChanged,
    /// The host should export and offer a download.
    SaveRequested,
}

pub struct SketchSession<S: DrawingSurface> {
    renderer: StrokeRenderer<S>,
    brush: BrushConfig,
    config: SketchConfig,
}

impl<S: DrawingSurface> SketchSession<S> {
    pub fn new(surface: S, config: SketchConfig) -> Self {
        Self {
            renderer: StrokeRenderer::from_config(surface, &config),
            brush: config.brush,
            config,
        }
    }

    pub fn renderer(&self) -> &StrokeRenderer<S> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut StrokeRenderer<S> {
        &mut self.renderer
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn brush(&self) -> &BrushConfig {
        &self.brush
    }

    pub fn initialize(
        &mut self,
        logical_width: f32,
        logical_height: f32,
        pixel_density: f32,
    ) -> Result<SurfaceSize, SurfaceAllocationError> {
        self.renderer
            .initialize(logical_width, logical_height, pixel_density)
    }

    /// Feed one normalized event. Returns `true` if the surface changed.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        self.renderer.handle(event, &self.brush)
    }

    pub fn clear(&mut self) {
        self.renderer.clear();
    }

    // ─── Brush controls ──────────────────────────────────────────────────

    /// Set the width, clamped into the configured range. Returns the width
    /// now in effect.
    pub fn set_brush_width(&mut self, width: f32) -> f32 {
        self.brush.set_width(width, self.config.width_range)
    }

    /// Grow or shrink the brush by `delta`, clamped.
    pub fn nudge_brush_width(&mut self, delta: f32) -> f32 {
        self.set_brush_width(self.brush.width + delta)
    }

    /// Set the color from a CSS hex string. Unparsable input leaves the
    /// color unchanged and returns `false`.
    pub fn set_brush_color_hex(&mut self, hex: &str) -> bool {
        match Color::from_hex(hex) {
            Some(color) => {
                self.brush.color = color;
                true
            }
            None => {
                log::warn!("ignoring invalid brush color {hex:?}");
                false
            }
        }
    }

    pub fn set_eraser(&mut self, on: bool) {
        self.brush.eraser = on;
    }

    pub fn toggle_eraser(&mut self) -> bool {
        self.brush.toggle_eraser()
    }

    /// Select quick color `index`; also leaves eraser mode.
    pub fn pick_swatch(&mut self, index: usize) -> bool {
        match self.config.swatches.get(index) {
            Some(&color) => {
                self.brush.pick(color);
                true
            }
            None => false,
        }
    }

    // ─── Shortcuts ───────────────────────────────────────────────────────

    pub fn apply(&mut self, action: ShortcutAction) -> ActionOutcome {
        match action {
            ShortcutAction::ToggleEraser => {
                self.toggle_eraser();
                ActionOutcome::BrushChanged
            }
            ShortcutAction::BrushSmaller => {
                self.nudge_brush_width(-BRUSH_STEP);
                ActionOutcome::BrushChanged
            }
            ShortcutAction::BrushLarger => {
                self.nudge_brush_width(BRUSH_STEP);
                ActionOutcome::BrushChanged
            }
            ShortcutAction::PickSwatch(index) => {
                if self.pick_swatch(index) {
                    ActionOutcome::BrushChanged
                } else {
                    ActionOutcome::None
                }
            }
            ShortcutAction::ClearCanvas => {
                self.clear();
                ActionOutcome::SurfaceChanged
            }
            ShortcutAction::SaveImage => ActionOutcome::SaveRequested,
        }
    }

    // ─── Export ──────────────────────────────────────────────────────────

    pub fn export_image(&self, format: &str) -> Result<Vec<u8>, ExportError> {
        self.renderer.export_image(format)
    }

    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        self.renderer.export(ImageFormat::Png)
    }

    /// Suggested download name.
    pub fn export_file_name(&self) -> &str {
        &self.config.export_file_name
    }
}
