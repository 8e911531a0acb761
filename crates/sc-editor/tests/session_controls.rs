//! Integration tests: sketch session brush controls, shortcuts, and
//! device-normalized input feeding the raster.

use pretty_assertions::assert_eq;
use sc_core::{Color, DEFAULT_SWATCHES, Point, SketchConfig};
use sc_editor::session::ActionOutcome;
use sc_editor::{InputEvent, PointerPhase, ShortcutMap, SketchSession, SurfaceOrigin};
use sc_render::RasterSurface;

fn session() -> SketchSession<RasterSurface> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut s = SketchSession::new(RasterSurface::new(), SketchConfig::default());
    s.initialize(200.0, 100.0, 1.0).unwrap();
    s
}

fn pixel(s: &SketchSession<RasterSurface>, x: f32, y: f32) -> Color {
    s.renderer()
        .surface()
        .logical_pixel(Point::new(x, y))
        .unwrap()
}

#[test]
fn starts_with_configured_brush() {
    let s = session();
    assert_eq!(s.brush().color, DEFAULT_SWATCHES[0]);
    assert_eq!(s.brush().width, 6.0);
    assert!(!s.brush().eraser);
    assert_eq!(s.export_file_name(), "painting.png");
}

#[test]
fn width_control_clamps_into_range() {
    let mut s = session();
    assert_eq!(s.set_brush_width(0.0), 1.0);
    assert_eq!(s.set_brush_width(61.0), 60.0);
    assert_eq!(s.set_brush_width(24.0), 24.0);
    assert_eq!(s.nudge_brush_width(100.0), 60.0);
}

#[test]
fn invalid_color_is_rejected() {
    let mut s = session();
    assert!(s.set_brush_color_hex("#10b981"));
    assert!(!s.set_brush_color_hex("green"));
    assert_eq!(s.brush().color, Color::rgb(0x10, 0xb9, 0x81));
}

#[test]
fn swatch_pick_turns_eraser_off() {
    let mut s = session();
    s.set_eraser(true);
    assert!(s.pick_swatch(1));
    assert!(!s.brush().eraser);
    assert_eq!(s.brush().color, Color::rgb(0xef, 0x44, 0x44));
    assert!(!s.pick_swatch(99));
}

#[test]
fn shortcuts_drive_the_session() {
    let mut s = session();
    let resolve = |key: &str| ShortcutMap::resolve(key, false, false, false, false).unwrap();

    assert_eq!(s.apply(resolve("e")), ActionOutcome::BrushChanged);
    assert!(s.brush().eraser);
    assert_eq!(s.apply(resolve("]")), ActionOutcome::BrushChanged);
    assert_eq!(s.brush().width, 8.0);
    assert_eq!(s.apply(resolve("[")), ActionOutcome::BrushChanged);
    assert_eq!(s.brush().width, 6.0);
    assert_eq!(s.apply(resolve("3")), ActionOutcome::BrushChanged);
    assert!(!s.brush().eraser);

    let save = ShortcutMap::resolve("s", true, false, false, false).unwrap();
    assert_eq!(s.apply(save), ActionOutcome::SaveRequested);
}

#[test]
fn mouse_and_touch_strokes_render_the_same() {
    let origin = SurfaceOrigin {
        left: 40.0,
        top: 60.0,
    };

    let mut by_mouse = session();
    for ev in [
        InputEvent::from_mouse(PointerPhase::Start, 60.0, 110.0, origin),
        InputEvent::from_mouse(PointerPhase::Move, 140.0, 110.0, origin),
        InputEvent::from_mouse(PointerPhase::End, 140.0, 110.0, origin),
    ]
    .into_iter()
    .flatten()
    {
        by_mouse.handle(&ev);
    }

    let mut by_touch = session();
    for ev in [
        InputEvent::from_touches(PointerPhase::Start, &[(60.0, 110.0), (10.0, 10.0)], origin),
        InputEvent::from_touches(PointerPhase::Move, &[(140.0, 110.0)], origin),
        InputEvent::from_touches(PointerPhase::End, &[], origin),
    ]
    .into_iter()
    .flatten()
    {
        by_touch.handle(&ev);
    }

    assert_eq!(pixel(&by_mouse, 60.0, 50.0), DEFAULT_SWATCHES[0]);
    assert_eq!(
        by_mouse.renderer().surface().image(),
        by_touch.renderer().surface().image()
    );
}

#[test]
fn clear_shortcut_wipes_strokes() {
    let mut s = session();
    s.handle(&InputEvent::Press {
        at: Point::new(20.0, 20.0),
    });
    s.handle(&InputEvent::Release);
    assert_eq!(pixel(&s, 20.0, 20.0), DEFAULT_SWATCHES[0]);

    let clear = ShortcutMap::resolve("Delete", true, false, false, false).unwrap();
    assert_eq!(s.apply(clear), ActionOutcome::SurfaceChanged);
    assert!(s.renderer().surface().is_uniform(Color::WHITE));
}

#[test]
fn export_png_round_trips_pixels() {
    let mut s = session();
    s.set_brush_width(10.0);
    s.pick_swatch(5);
    s.handle(&InputEvent::Press {
        at: Point::new(100.0, 50.0),
    });
    s.handle(&InputEvent::Leave);

    let png = s.export_png().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(100, 50).0, [0x3b, 0x82, 0xf6, 0xff]);
    assert_eq!(decoded.get_pixel(0, 0).0, [0xff, 0xff, 0xff, 0xff]);
}
