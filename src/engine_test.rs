#![allow(clippy::float_cmp)]

use std::cell::Cell;

use image::RgbaImage;

use super::*;
use crate::geom::{ClientRect, Point};
use crate::raster::RasterSurface;
use crate::style::StrokeStyle;

// =============================================================
// Helpers
// =============================================================

const RED: Rgb = Rgb::new(255, 0, 0);
const BLUE: Rgb = Rgb::new(0, 0, 255);

fn make_core() -> EngineCore<RasterSurface> {
    EngineCore::new(RasterSurface::new(900, 560), &SketchConfig::default())
}

/// A 900x560 surface displayed at half size, offset to (10, 20) on screen.
fn make_scaled_core() -> EngineCore<RasterSurface> {
    let mut surface = RasterSurface::new(900, 560);
    surface.set_display_rect(ClientRect::new(10.0, 20.0, 450.0, 280.0));
    EngineCore::new(surface, &SketchConfig::default())
}

fn pen(color: Rgb, width: f64) -> StrokeStyle {
    StrokeStyle::new(color, width)
}

fn decode(snapshot: &SketchSnapshot) -> RgbaImage {
    let bytes = match snapshot.png_bytes() {
        Ok(Some(bytes)) => bytes,
        Ok(None) => panic!("snapshot is empty"),
        Err(e) => panic!("snapshot does not decode: {e}"),
    };
    match image::load_from_memory(&bytes) {
        Ok(img) => img.to_rgba8(),
        Err(e) => panic!("snapshot is not a PNG: {e}"),
    }
}

fn rgb_at(img: &RgbaImage, x: u32, y: u32) -> Rgb {
    let p = img.get_pixel(x, y);
    Rgb::new(p[0], p[1], p[2])
}

fn is_blank(core: &EngineCore<RasterSurface>) -> bool {
    core.surface().image().pixels().all(|p| p.0 == [255, 255, 255, 255])
}

/// Counts how often the engine asks for the pen style.
struct CountingStyle {
    style: StrokeStyle,
    reads: Cell<usize>,
}

impl StyleSource for CountingStyle {
    fn current_style(&self) -> StrokeStyle {
        self.reads.set(self.reads.get() + 1);
        self.style
    }
}

// =============================================================
// Mount
// =============================================================

#[test]
fn new_core_is_idle_clean_and_white() {
    let core = make_core();
    assert!(!core.is_dirty());
    assert!(!core.is_drawing());
    assert_eq!(core.epoch(), 0);
    assert!(is_blank(&core));
}

#[test]
fn export_right_after_mount_is_empty() {
    let core = make_core();
    assert_eq!(core.snapshot().as_str(), "");
}

#[test]
fn configured_background_is_painted_on_mount() {
    let config = SketchConfig { background: "#102030".into(), ..SketchConfig::default() };
    let core = EngineCore::new(RasterSurface::new(4, 4), &config);
    assert_eq!(core.surface().pixel(3, 3), Some(Rgb::new(0x10, 0x20, 0x30)));
}

// =============================================================
// Press
// =============================================================

#[test]
fn press_enters_drawing_and_marks_dirty() {
    let mut core = make_core();
    let action = core.on_press(&RawPointer::mouse(100.0, 100.0));
    assert_eq!(action, Action::StrokeStarted);
    assert!(core.is_drawing());
    assert!(core.is_dirty());
    assert_eq!(core.input.last_point(), Some(Point::new(100.0, 100.0)));
}

#[test]
fn press_alone_without_movement_is_dirty_and_exports() {
    let mut core = make_core();
    core.on_press(&RawPointer::mouse(5.0, 5.0));
    core.on_release();
    assert!(core.is_dirty());
    let snapshot = core.snapshot();
    assert!(!snapshot.is_empty());
    assert!(is_blank(&core));
}

#[test]
fn press_does_not_paint() {
    let mut core = make_core();
    core.on_press(&RawPointer::mouse(50.0, 50.0));
    assert!(is_blank(&core));
}

#[test]
fn touch_press_without_points_is_ignored() {
    let mut core = make_core();
    let action = core.on_press(&RawPointer::Touch { first: None });
    assert_eq!(action, Action::None);
    assert!(!core.is_drawing());
    assert!(!core.is_dirty());
}

#[test]
fn press_uses_normalized_coordinates() {
    let mut core = make_scaled_core();
    core.on_press(&RawPointer::mouse(60.0, 70.0));
    assert_eq!(core.input.last_point(), Some(Point::new(100.0, 100.0)));
}

#[test]
fn second_press_restarts_from_new_point() {
    let mut core = make_core();
    core.on_press(&RawPointer::mouse(10.0, 10.0));
    core.on_press(&RawPointer::touch(200.0, 300.0));
    assert_eq!(core.input.last_point(), Some(Point::new(200.0, 300.0)));
}

// =============================================================
// Move
// =============================================================

#[test]
fn move_while_idle_is_a_no_op() {
    let mut core = make_core();
    let style = CountingStyle { style: pen(RED, 5.0), reads: Cell::new(0) };
    let action = core.on_move(&RawPointer::mouse(100.0, 100.0), &style);
    assert_eq!(action, Action::None);
    assert!(!action.prevents_default());
    assert!(!core.is_dirty());
    assert!(!core.is_drawing());
    assert_eq!(style.reads.get(), 0);
    assert!(is_blank(&core));
}

#[test]
fn move_after_release_is_a_no_op() {
    let mut core = make_core();
    core.on_press(&RawPointer::mouse(10.0, 10.0));
    core.on_release();
    let before = core.surface().image().clone();
    let action = core.on_move(&RawPointer::mouse(300.0, 300.0), &pen(RED, 5.0));
    assert_eq!(action, Action::None);
    assert_eq!(core.input, InputState::Idle);
    assert_eq!(core.surface().image(), &before);
}

#[test]
fn move_while_drawing_paints_and_prevents_default() {
    let mut core = make_core();
    core.on_press(&RawPointer::mouse(100.0, 100.0));
    let action = core.on_move(&RawPointer::mouse(200.0, 100.0), &pen(RED, 4.0));
    assert_eq!(action, Action::SegmentPainted);
    assert!(action.prevents_default());
    assert_eq!(core.surface().pixel(150, 100), Some(RED));
    assert_eq!(core.input.last_point(), Some(Point::new(200.0, 100.0)));
}

#[test]
fn style_is_read_once_per_segment() {
    let mut core = make_core();
    let style = CountingStyle { style: pen(RED, 3.0), reads: Cell::new(0) };
    core.on_press(&RawPointer::mouse(10.0, 10.0));
    for i in 1..=4 {
        core.on_move(&RawPointer::mouse(10.0 + f64::from(i) * 10.0, 10.0), &style);
    }
    assert_eq!(style.reads.get(), 4);
}

#[test]
fn style_change_mid_stroke_applies_to_next_segment() {
    let mut core = make_core();
    core.on_press(&RawPointer::mouse(100.0, 100.0));
    core.on_move(&RawPointer::mouse(200.0, 100.0), &pen(RED, 4.0));
    core.on_move(&RawPointer::mouse(300.0, 100.0), &pen(BLUE, 4.0));
    assert_eq!(core.surface().pixel(150, 100), Some(RED));
    assert_eq!(core.surface().pixel(250, 100), Some(BLUE));
}

#[test]
fn touch_move_without_points_keeps_state() {
    let mut core = make_core();
    core.on_press(&RawPointer::touch(10.0, 10.0));
    let action = core.on_move(&RawPointer::Touch { first: None }, &pen(RED, 3.0));
    assert_eq!(action, Action::None);
    assert_eq!(core.input.last_point(), Some(Point::new(10.0, 10.0)));
    assert!(is_blank(&core));
}

// =============================================================
// Release
// =============================================================

#[test]
fn release_returns_to_idle_without_repaint() {
    let mut core = make_core();
    core.on_press(&RawPointer::mouse(10.0, 10.0));
    core.on_move(&RawPointer::mouse(60.0, 10.0), &pen(RED, 3.0));
    let before = core.surface().image().clone();
    assert_eq!(core.on_release(), Action::StrokeEnded);
    assert!(!core.is_drawing());
    assert_eq!(core.input.last_point(), None);
    assert_eq!(core.surface().image(), &before);
}

#[test]
fn release_outside_surface_still_ends_stroke() {
    // Window-level mouse-up carries no position; the pointer may be anywhere.
    let mut core = make_scaled_core();
    core.on_press(&RawPointer::mouse(60.0, 70.0));
    core.on_move(&RawPointer::mouse(2000.0, -500.0), &pen(RED, 3.0));
    assert_eq!(core.on_release(), Action::StrokeEnded);
    assert!(!core.is_drawing());
}

#[test]
fn release_while_idle_is_a_no_op() {
    let mut core = make_core();
    assert_eq!(core.on_release(), Action::None);
    assert!(!core.is_dirty());
}

#[test]
fn dirty_stays_true_through_press_move_release() {
    let mut core = make_core();
    core.on_press(&RawPointer::mouse(1.0, 1.0));
    assert!(core.is_dirty());
    for x in 2..20 {
        core.on_move(&RawPointer::mouse(f64::from(x), 1.0), &pen(RED, 2.0));
        assert!(core.is_dirty());
    }
    core.on_release();
    assert!(core.is_dirty());
}

// =============================================================
// Clear
// =============================================================

#[test]
fn clear_resets_dirty_and_repaints_background() {
    let mut core = make_core();
    core.on_press(&RawPointer::mouse(10.0, 10.0));
    core.on_move(&RawPointer::mouse(100.0, 100.0), &pen(RED, 5.0));
    core.on_release();
    assert_eq!(core.clear(), Action::Cleared);
    assert!(!core.is_dirty());
    assert!(is_blank(&core));
    assert!(core.snapshot().is_empty());
}

#[test]
fn press_move_clear_export_is_empty() {
    let mut core = make_core();
    core.on_press(&RawPointer::mouse(10.0, 10.0));
    core.on_move(&RawPointer::mouse(100.0, 100.0), &pen(RED, 5.0));
    core.clear();
    assert_eq!(core.snapshot().as_str(), "");
}

#[test]
fn clear_on_fresh_surface_is_harmless() {
    let mut core = make_core();
    core.clear();
    assert!(!core.is_dirty());
    assert!(core.snapshot().is_empty());
}

#[test]
fn clear_makes_earlier_snapshots_stale() {
    let mut core = make_core();
    core.on_press(&RawPointer::mouse(10.0, 10.0));
    core.on_move(&RawPointer::mouse(100.0, 100.0), &pen(RED, 5.0));
    let before = core.snapshot();
    assert!(!core.is_stale(&before));
    core.clear();
    assert!(core.is_stale(&before));
    assert!(!core.is_stale(&SketchSnapshot::empty()));

    core.on_press(&RawPointer::mouse(20.0, 20.0));
    let after = core.snapshot();
    assert_eq!(after.epoch(), 1);
    assert!(!core.is_stale(&after));
}

#[test]
fn clear_mid_stroke_keeps_drawing_state() {
    let mut core = make_core();
    core.on_press(&RawPointer::mouse(10.0, 10.0));
    core.clear();
    assert!(core.is_drawing());
    assert!(!core.is_dirty());
    core.on_move(&RawPointer::mouse(50.0, 10.0), &pen(RED, 4.0));
    assert_eq!(core.surface().pixel(30, 10), Some(RED));
    assert!(core.is_dirty());
    assert!(!core.snapshot().is_empty());
}

// =============================================================
// Snapshot scenarios
// =============================================================

#[test]
fn red_segment_scenario() {
    let mut core = make_scaled_core();
    // Client (60, 70) maps to logical (100, 100); (85, 90) maps to (150, 140).
    core.on_press(&RawPointer::mouse(60.0, 70.0));
    core.on_move(&RawPointer::mouse(85.0, 90.0), &pen(Rgb::new(0xff, 0, 0), 5.0));
    core.on_release();

    assert!(core.is_dirty());
    let snapshot = core.snapshot();
    assert!(snapshot.as_str().starts_with("data:image/png;base64,"));

    let img = decode(&snapshot);
    assert_eq!(img.dimensions(), (900, 560));
    assert_eq!(rgb_at(&img, 100, 100), RED);
    assert_eq!(rgb_at(&img, 125, 120), RED);
    assert_eq!(rgb_at(&img, 149, 139), RED);
    assert_eq!(rgb_at(&img, 100, 140), Rgb::WHITE);
    assert_eq!(rgb_at(&img, 160, 150), Rgb::WHITE);
}

#[test]
fn touch_strokes_paint_like_mouse_strokes() {
    let mut core = make_scaled_core();
    core.on_press(&RawPointer::touch(60.0, 70.0));
    core.on_move(&RawPointer::touch(85.0, 70.0), &pen(BLUE, 4.0));
    core.on_release();
    assert_eq!(core.surface().pixel(125, 100), Some(BLUE));
}

#[test]
fn consecutive_strokes_accumulate() {
    let mut core = make_core();
    core.on_press(&RawPointer::mouse(100.0, 100.0));
    core.on_move(&RawPointer::mouse(200.0, 100.0), &pen(RED, 4.0));
    core.on_release();
    core.on_press(&RawPointer::mouse(100.0, 300.0));
    core.on_move(&RawPointer::mouse(200.0, 300.0), &pen(BLUE, 4.0));
    core.on_release();

    let img = decode(&core.snapshot());
    assert_eq!(rgb_at(&img, 150, 100), RED);
    assert_eq!(rgb_at(&img, 150, 300), BLUE);
}

#[test]
fn releases_do_not_join_separate_strokes() {
    let mut core = make_core();
    core.on_press(&RawPointer::mouse(100.0, 100.0));
    core.on_move(&RawPointer::mouse(120.0, 100.0), &pen(RED, 2.0));
    core.on_release();
    core.on_press(&RawPointer::mouse(300.0, 100.0));
    core.on_move(&RawPointer::mouse(320.0, 100.0), &pen(RED, 2.0));
    // Nothing between the two strokes.
    assert_eq!(core.surface().pixel(200, 100), Some(Rgb::WHITE));
}

#[test]
fn snapshot_reflects_current_contents_not_a_cache() {
    let mut core = make_core();
    core.on_press(&RawPointer::mouse(100.0, 100.0));
    core.on_move(&RawPointer::mouse(200.0, 100.0), &pen(RED, 4.0));
    let first = core.snapshot();
    core.on_move(&RawPointer::mouse(200.0, 300.0), &pen(RED, 4.0));
    let second = core.snapshot();
    assert_ne!(first, second);
    assert_eq!(rgb_at(&decode(&first), 200, 200), Rgb::WHITE);
    assert_eq!(rgb_at(&decode(&second), 200, 200), RED);
}

// =============================================================
// Action
// =============================================================

#[test]
fn only_painted_segments_prevent_default() {
    for action in [Action::None, Action::StrokeStarted, Action::StrokeEnded, Action::Cleared] {
        assert!(!action.prevents_default(), "{action:?}");
    }
    assert!(Action::SegmentPainted.prevents_default());
}
