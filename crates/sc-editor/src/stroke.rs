//! Stroke renderer: pointer state machine over a drawing surface.
//!
//! ```text
//! Idle    --press-->               Drawing  [set last position]
//! Drawing --press-->               Drawing  [restart at new position]
//! Drawing --move-->                Drawing  [draw segment, update last position]
//! Drawing --release/leave/cancel-> Idle     [dot if the stroke never moved]
//! Idle    --move/release/...-->    Idle     [ignored]
//! ```
//!
//! The renderer owns its surface exclusively. Brush settings are passed into
//! each call rather than cached, so every segment is drawn with whatever the
//! controls say at that moment.

use crate::input::InputEvent;
use sc_core::{
    BrushConfig, Color, DrawingSurface, ExportError, ImageFormat, Point, SketchConfig,
    SurfaceAllocationError, SurfaceSize,
};

/// Pointer state. The last position only exists while drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerState {
    Idle,
    Drawing {
        last: Point,
        /// Whether at least one segment has been drawn in this stroke.
        moved: bool,
    },
}

pub struct StrokeRenderer<S: DrawingSurface> {
    surface: S,
    state: PointerState,
    background: Color,
    max_pixels: u64,
}

impl<S: DrawingSurface> StrokeRenderer<S> {
    pub fn new(surface: S, background: Color, max_pixels: u64) -> Self {
        Self {
            surface,
            state: PointerState::Idle,
            background,
            max_pixels,
        }
    }

    pub fn from_config(surface: S, config: &SketchConfig) -> Self {
        Self::new(surface, config.background, config.max_pixels)
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, PointerState::Drawing { .. })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for backends that need it (e.g. draining dirty regions).
    /// Callers must not draw through this.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn size(&self) -> Option<SurfaceSize> {
        self.surface.size()
    }

    /// Size the buffer to `logical × density` pixels and fill it with the
    /// background. Calling this again discards everything drawn so far.
    pub fn initialize(
        &mut self,
        logical_width: f32,
        logical_height: f32,
        pixel_density: f32,
    ) -> Result<SurfaceSize, SurfaceAllocationError> {
        let size = SurfaceSize::new(logical_width, logical_height, pixel_density, self.max_pixels)
            .inspect_err(|e| log::warn!("initialize rejected: {e}"))?;
        self.surface.allocate(size);
        self.surface.fill_background(self.background);
        log::debug!(
            "surface initialized: {logical_width}x{logical_height} @{pixel_density}x -> {}x{} px",
            size.pixel_width,
            size.pixel_height
        );
        Ok(size)
    }

    /// Enter `Drawing` at `at`. Draws nothing.
    pub fn begin_stroke(&mut self, at: Point) {
        let at = self.clamp(at);
        if self.is_drawing() {
            log::debug!("press while drawing, restarting stroke at ({}, {})", at.x, at.y);
        }
        self.state = PointerState::Drawing {
            last: at,
            moved: false,
        };
    }

    /// Draw a segment from the last position to `at`. No-op while idle.
    /// Returns `true` if the buffer changed.
    pub fn extend_stroke(&mut self, at: Point, brush: &BrushConfig) -> bool {
        let PointerState::Drawing { last, .. } = self.state else {
            return false;
        };
        let at = self.clamp(at);
        self.draw_segment(last, at, brush);
        self.state = PointerState::Drawing {
            last: at,
            moved: true,
        };
        true
    }

    /// Return to `Idle`. Safe to call while idle.
    ///
    /// A stroke that never moved (a tap or click) leaves a dot of the brush
    /// width at the press position. Returns `true` if the buffer changed.
    pub fn end_stroke(&mut self, brush: &BrushConfig) -> bool {
        let previous = std::mem::replace(&mut self.state, PointerState::Idle);
        match previous {
            PointerState::Drawing { last, moved: false } => {
                self.draw_segment(last, last, brush);
                true
            }
            _ => false,
        }
    }

    /// Reset the whole buffer to the background. Leaves the pointer state
    /// alone.
    pub fn clear(&mut self) {
        self.surface.fill_background(self.background);
        log::debug!("surface cleared");
    }

    /// Encode the buffer. `format` is a name (`"png"`) or MIME type.
    pub fn export_image(&self, format: &str) -> Result<Vec<u8>, ExportError> {
        self.export(format.parse()?)
    }

    pub fn export(&self, format: ImageFormat) -> Result<Vec<u8>, ExportError> {
        if self.surface.size().is_none() {
            return Err(ExportError::Uninitialized);
        }
        self.surface.encode(format)
    }

    /// Run one normalized event through the state machine.
    /// Returns `true` if the buffer changed.
    pub fn handle(&mut self, event: &InputEvent, brush: &BrushConfig) -> bool {
        match *event {
            InputEvent::Press { at } => {
                self.begin_stroke(at);
                false
            }
            InputEvent::Move { at } => self.extend_stroke(at, brush),
            InputEvent::Release | InputEvent::Leave | InputEvent::Cancel => self.end_stroke(brush),
        }
    }

    fn draw_segment(&mut self, from: Point, to: Point, brush: &BrushConfig) {
        let color = brush.effective_color(self.background);
        log::trace!(
            "segment ({}, {}) -> ({}, {}) w={} {color}",
            from.x,
            from.y,
            to.x,
            to.y,
            brush.width
        );
        self.surface.draw_rounded_segment(from, to, brush.width, color);
    }

    /// Keep endpoints inside the logical surface.
    fn clamp(&self, at: Point) -> Point {
        match self.surface.size() {
            Some(size) => at.clamp_to(size.logical_width, size.logical_height),
            None => at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Records draw calls instead of rasterizing.
    #[derive(Default)]
    struct RecordingSurface {
        size: Option<SurfaceSize>,
        fills: Vec<Color>,
        segments: Vec<(Point, Point, f32, Color)>,
    }

    impl DrawingSurface for RecordingSurface {
        fn allocate(&mut self, size: SurfaceSize) {
            self.size = Some(size);
        }

        fn size(&self) -> Option<SurfaceSize> {
            self.size
        }

        fn fill_background(&mut self, color: Color) {
            self.fills.push(color);
            self.segments.clear();
        }

        fn draw_rounded_segment(&mut self, from: Point, to: Point, width: f32, color: Color) {
            self.segments.push((from, to, width, color));
        }

        fn encode(&self, format: ImageFormat) -> Result<Vec<u8>, ExportError> {
            Ok(format.extension().as_bytes().to_vec())
        }
    }

    const INK: Color = Color::rgb(0x11, 0x18, 0x27);

    fn renderer() -> StrokeRenderer<RecordingSurface> {
        let mut r = StrokeRenderer::new(RecordingSurface::default(), Color::WHITE, u64::MAX);
        r.initialize(800.0, 600.0, 1.0).unwrap();
        r
    }

    fn brush(width: f32) -> BrushConfig {
        BrushConfig {
            color: INK,
            width,
            eraser: false,
        }
    }

    #[test]
    fn initialize_fills_background() {
        let r = renderer();
        assert_eq!(r.surface().fills, vec![Color::WHITE]);
        assert_eq!(r.state(), PointerState::Idle);
    }

    #[test]
    fn press_draws_nothing() {
        let mut r = renderer();
        r.begin_stroke(Point::new(10.0, 10.0));
        assert!(r.surface().segments.is_empty());
        assert_eq!(
            r.state(),
            PointerState::Drawing {
                last: Point::new(10.0, 10.0),
                moved: false
            }
        );
    }

    #[test]
    fn each_move_draws_from_last_position() {
        let mut r = renderer();
        let b = brush(6.0);
        r.begin_stroke(Point::new(0.0, 0.0));
        r.extend_stroke(Point::new(10.0, 0.0), &b);
        r.extend_stroke(Point::new(10.0, 10.0), &b);
        r.end_stroke(&b);

        assert_eq!(
            r.surface().segments,
            vec![
                (Point::new(0.0, 0.0), Point::new(10.0, 0.0), 6.0, INK),
                (Point::new(10.0, 0.0), Point::new(10.0, 10.0), 6.0, INK),
            ]
        );
        assert_eq!(r.state(), PointerState::Idle);
    }

    #[test]
    fn press_while_drawing_restarts_the_stroke() {
        let mut r = renderer();
        let b = brush(6.0);
        for event in [
            InputEvent::Press { at: Point::new(0.0, 0.0) },
            InputEvent::Move { at: Point::new(10.0, 0.0) },
            InputEvent::Press { at: Point::new(50.0, 50.0) },
            InputEvent::Move { at: Point::new(60.0, 50.0) },
            InputEvent::Release,
        ] {
            r.handle(&event, &b);
        }

        // No segment bridges the two strokes
        assert_eq!(
            r.surface().segments,
            vec![
                (Point::new(0.0, 0.0), Point::new(10.0, 0.0), 6.0, INK),
                (Point::new(50.0, 50.0), Point::new(60.0, 50.0), 6.0, INK),
            ]
        );
        assert_eq!(r.state(), PointerState::Idle);
    }

    #[test]
    fn double_press_then_release_dots_the_second_press() {
        let mut r = renderer();
        let b = brush(8.0);
        r.handle(&InputEvent::Press { at: Point::new(5.0, 5.0) }, &b);
        r.handle(&InputEvent::Press { at: Point::new(40.0, 20.0) }, &b);
        assert!(r.handle(&InputEvent::Release, &b));
        assert_eq!(
            r.surface().segments,
            vec![(Point::new(40.0, 20.0), Point::new(40.0, 20.0), 8.0, INK)]
        );
    }

    #[test]
    fn move_while_idle_is_ignored() {
        let mut r = renderer();
        assert!(!r.extend_stroke(Point::new(50.0, 50.0), &brush(6.0)));
        assert!(r.surface().segments.is_empty());
        assert_eq!(r.state(), PointerState::Idle);
    }

    #[test]
    fn tap_leaves_a_dot() {
        let mut r = renderer();
        r.begin_stroke(Point::new(5.0, 5.0));
        assert!(r.end_stroke(&brush(8.0)));
        assert_eq!(
            r.surface().segments,
            vec![(Point::new(5.0, 5.0), Point::new(5.0, 5.0), 8.0, INK)]
        );
    }

    #[test]
    fn end_while_idle_is_harmless() {
        let mut r = renderer();
        assert!(!r.end_stroke(&brush(6.0)));
        assert!(!r.end_stroke(&brush(6.0)));
        assert_eq!(r.state(), PointerState::Idle);
    }

    #[test]
    fn brush_changes_apply_mid_stroke() {
        let mut r = renderer();
        let mut b = brush(4.0);
        r.begin_stroke(Point::new(0.0, 0.0));
        r.extend_stroke(Point::new(5.0, 0.0), &b);
        b.width = 20.0;
        b.eraser = true;
        r.extend_stroke(Point::new(9.0, 0.0), &b);

        let segs = &r.surface().segments;
        assert_eq!((segs[0].2, segs[0].3), (4.0, INK));
        assert_eq!((segs[1].2, segs[1].3), (20.0, Color::WHITE));
    }

    #[test]
    fn positions_are_clamped_to_the_surface() {
        let mut r = renderer();
        r.begin_stroke(Point::new(-20.0, 300.0));
        r.extend_stroke(Point::new(900.0, 700.0), &brush(6.0));
        let (from, to, ..) = r.surface().segments[0];
        assert_eq!(from, Point::new(0.0, 300.0));
        assert_eq!(to, Point::new(800.0, 600.0));
    }

    #[test]
    fn clear_keeps_pointer_state() {
        let mut r = renderer();
        r.begin_stroke(Point::new(1.0, 1.0));
        r.clear();
        assert!(r.is_drawing());
        assert_eq!(r.surface().fills, vec![Color::WHITE, Color::WHITE]);
    }

    #[test]
    fn handle_dispatches_every_ending_event() {
        for end in [InputEvent::Release, InputEvent::Leave, InputEvent::Cancel] {
            let mut r = renderer();
            let b = brush(6.0);
            r.handle(&InputEvent::Press { at: Point::new(3.0, 3.0) }, &b);
            r.handle(&InputEvent::Move { at: Point::new(6.0, 3.0) }, &b);
            assert!(!r.handle(&end, &b), "{end:?} after a move draws no dot");
            assert_eq!(r.state(), PointerState::Idle);
            assert_eq!(r.surface().segments.len(), 1);
        }
    }

    #[test]
    fn export_parses_format() {
        let r = renderer();
        assert_eq!(r.export_image("image/png"), Ok(b"png".to_vec()));
        assert_eq!(
            r.export_image("tiff"),
            Err(ExportError::UnsupportedFormat("tiff".into()))
        );
    }

    #[test]
    fn export_before_initialize_fails() {
        let r = StrokeRenderer::new(RecordingSurface::default(), Color::WHITE, u64::MAX);
        assert_eq!(r.export_image("png"), Err(ExportError::Uninitialized));
    }

    #[test]
    fn initialize_rejects_bad_sizes() {
        let mut r = StrokeRenderer::new(RecordingSurface::default(), Color::WHITE, 1_000);
        assert!(matches!(
            r.initialize(0.0, 10.0, 1.0),
            Err(SurfaceAllocationError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            r.initialize(100.0, 100.0, 1.0),
            Err(SurfaceAllocationError::TooLarge { .. })
        ));
        assert!(r.size().is_none());
    }
}
