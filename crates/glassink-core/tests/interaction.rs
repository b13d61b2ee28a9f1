//! End-to-end behaviour of the canvas driven purely through input events.

use glassink_core::geometry::{screen_to_world, world_to_screen};
use glassink_core::{
    Canvas, InputEvent, Key, Modifiers, MouseButton, ScreenPoint, Stroke, ToolKind, UNDO_LIMIT,
};
use kurbo::{Point, Vec2};
use std::collections::BTreeSet;

const EPS: f64 = 1e-9;

fn press(canvas: &mut Canvas, x: f64, y: f64) -> bool {
    canvas.handle_event(InputEvent::PointerDown {
        position: ScreenPoint::new(x, y),
        button: MouseButton::Left,
    })
}

fn motion(canvas: &mut Canvas, x: f64, y: f64) -> bool {
    canvas.handle_event(InputEvent::PointerMove {
        position: ScreenPoint::new(x, y),
    })
}

fn release(canvas: &mut Canvas, x: f64, y: f64) -> bool {
    canvas.handle_event(InputEvent::PointerUp {
        position: ScreenPoint::new(x, y),
        button: MouseButton::Left,
    })
}

fn key(canvas: &mut Canvas, key: Key) -> bool {
    canvas.handle_event(InputEvent::KeyDown {
        key,
        modifiers: Modifiers::default(),
    })
}

fn ctrl(canvas: &mut Canvas, letter: char) -> bool {
    canvas.handle_event(InputEvent::KeyDown {
        key: Key::char(letter),
        modifiers: Modifiers {
            ctrl: true,
            ..Default::default()
        },
    })
}

fn stroke_through(canvas: &mut Canvas, points: &[(f64, f64)]) {
    let (x, y) = points[0];
    press(canvas, x, y);
    for &(x, y) in &points[1..] {
        motion(canvas, x, y);
    }
    let (x, y) = points[points.len() - 1];
    release(canvas, x, y);
}

fn rect_select(canvas: &mut Canvas, from: (f64, f64), to: (f64, f64)) {
    press(canvas, from.0, from.1);
    motion(canvas, to.0, to.1);
    release(canvas, to.0, to.1);
}

#[test]
fn three_point_stroke_lands_in_store() {
    let mut canvas = Canvas::new();
    stroke_through(&mut canvas, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);

    assert_eq!(
        canvas.document.strokes(),
        &[Stroke::new(
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)],
            "#ff0000",
        )]
    );
    assert_eq!(canvas.document.undo_len(), 1);
    assert_eq!(canvas.document.last_undo_entry(), Some(&[][..]));
}

#[test]
fn rectangle_selects_strokes_with_a_point_inside() {
    let mut canvas = Canvas::new();
    stroke_through(&mut canvas, &[(5.0, 5.0), (40.0, 40.0)]);
    stroke_through(&mut canvas, &[(30.0, 30.0), (60.0, 60.0)]);
    stroke_through(&mut canvas, &[(20.0, 0.0), (25.0, 0.0)]);

    key(&mut canvas, Key::F2);
    rect_select(&mut canvas, (0.0, 0.0), (20.0, 20.0));

    // Stroke 2 touches the edge at (20, 0); the rule is inclusive.
    assert_eq!(canvas.selection(), &BTreeSet::from([0, 2]));
}

#[test]
fn selecting_same_region_twice_is_idempotent() {
    let mut canvas = Canvas::new();
    stroke_through(&mut canvas, &[(5.0, 5.0), (6.0, 6.0)]);
    stroke_through(&mut canvas, &[(50.0, 50.0)]);
    key(&mut canvas, Key::F2);

    rect_select(&mut canvas, (0.0, 0.0), (10.0, 10.0));
    let first = canvas.selection().clone();
    rect_select(&mut canvas, (0.0, 0.0), (10.0, 10.0));
    assert_eq!(canvas.selection(), &first);
}

#[test]
fn backspace_removes_selected_stroke() {
    let mut canvas = Canvas::new();
    stroke_through(&mut canvas, &[(5.0, 5.0), (6.0, 6.0)]);
    stroke_through(&mut canvas, &[(50.0, 50.0), (60.0, 60.0)]);
    key(&mut canvas, Key::F2);
    rect_select(&mut canvas, (0.0, 0.0), (10.0, 10.0));
    let before = canvas.document.strokes().to_vec();
    let undo_len = canvas.document.undo_len();

    assert!(key(&mut canvas, Key::Backspace));

    assert_eq!(canvas.document.len(), 1);
    assert_eq!(canvas.document.get(0).unwrap().points[0], Point::new(50.0, 50.0));
    assert!(canvas.selection().is_empty());
    assert_eq!(canvas.document.undo_len(), undo_len + 1);
    assert_eq!(canvas.document.last_undo_entry(), Some(before.as_slice()));
}

#[test]
fn zoom_in_and_back_restores_offset() {
    let mut canvas = Canvas::new();
    canvas.camera.offset = Vec2::new(12.0, -7.0);
    let anchor = ScreenPoint::new(100.0, 100.0);

    canvas.camera.zoom_to(anchor, 2.0);
    canvas.camera.zoom_to(anchor, 1.0);

    assert!((canvas.camera.offset.x - 12.0).abs() < EPS);
    assert!((canvas.camera.offset.y + 7.0).abs() < EPS);
}

#[test]
fn wheel_zoom_keeps_point_under_cursor() {
    let mut canvas = Canvas::new();
    canvas.camera.offset = Vec2::new(30.0, 40.0);
    let m = ScreenPoint::new(250.0, 125.0);

    for delta in [-120.0, -120.0, 53.0, -1.0, 300.0] {
        let (old_offset, old_zoom) = (canvas.camera.offset, canvas.camera.zoom);
        canvas.handle_event(InputEvent::Wheel { position: m, delta });
        let before = screen_to_world(m, old_offset, old_zoom);
        let after = screen_to_world(m, canvas.camera.offset, canvas.camera.zoom);
        assert!((before - after).hypot() < EPS, "anchor drifted for delta {delta}");
    }
}

#[test]
fn zoom_stays_in_bounds() {
    let mut canvas = Canvas::new();
    let m = ScreenPoint::new(10.0, 10.0);
    for _ in 0..100 {
        canvas.handle_event(InputEvent::Wheel { position: m, delta: -1.0 });
    }
    assert!(canvas.camera.zoom <= 5.0);
    for _ in 0..100 {
        canvas.handle_event(InputEvent::Wheel { position: m, delta: 1.0 });
    }
    assert!(canvas.camera.zoom >= 0.1);
}

#[test]
fn screen_world_round_trip() {
    let offsets = [Vec2::ZERO, Vec2::new(-350.5, 12.25), Vec2::new(1e4, -3e3)];
    let zooms = [0.1, 0.37, 1.0, 2.5, 5.0];
    let points = [ScreenPoint::ZERO, ScreenPoint::new(640.0, 480.0), ScreenPoint::new(-3.5, 99.1)];

    for offset in offsets {
        for zoom in zooms {
            for p in points {
                let back = world_to_screen(screen_to_world(p, offset, zoom), offset, zoom);
                assert!((back.0 - p.0).hypot() < 1e-6);
            }
        }
    }
}

#[test]
fn undo_all_then_redo_all_reproduces_state() {
    let mut canvas = Canvas::new();
    stroke_through(&mut canvas, &[(0.0, 0.0), (5.0, 5.0)]);
    stroke_through(&mut canvas, &[(20.0, 20.0), (25.0, 25.0)]);
    key(&mut canvas, Key::F2);
    rect_select(&mut canvas, (-1.0, -1.0), (6.0, 6.0));
    // Drag stroke 0 by (10, 0).
    press(&mut canvas, 2.0, 2.0);
    motion(&mut canvas, 7.0, 2.0);
    motion(&mut canvas, 12.0, 2.0);
    release(&mut canvas, 12.0, 2.0);
    rect_select(&mut canvas, (19.0, 19.0), (21.0, 21.0));
    key(&mut canvas, Key::Backspace);
    key(&mut canvas, Key::F1);
    stroke_through(&mut canvas, &[(100.0, 0.0)]);

    let mutations = canvas.document.undo_len();
    assert_eq!(mutations, 5);
    let final_state = canvas.document.strokes().to_vec();

    for _ in 0..mutations {
        assert!(ctrl(&mut canvas, 'z'));
    }
    assert!(canvas.document.is_empty());
    assert!(!ctrl(&mut canvas, 'z'));

    for _ in 0..mutations {
        assert!(ctrl(&mut canvas, 'y'));
    }
    assert_eq!(canvas.document.strokes(), final_state.as_slice());
}

#[test]
fn history_stacks_never_exceed_limit() {
    let mut canvas = Canvas::new();
    for i in 0..(UNDO_LIMIT + 15) {
        stroke_through(&mut canvas, &[(i as f64, 0.0)]);
        assert!(canvas.document.undo_len() <= UNDO_LIMIT);
    }
    while ctrl(&mut canvas, 'z') {
        assert!(canvas.document.redo_len() <= UNDO_LIMIT);
    }
    assert_eq!(canvas.document.len(), 15);
}

#[test]
fn drag_is_one_undo_step() {
    let mut canvas = Canvas::new();
    stroke_through(&mut canvas, &[(0.0, 0.0), (10.0, 0.0)]);
    stroke_through(&mut canvas, &[(0.0, 10.0), (10.0, 10.0)]);
    key(&mut canvas, Key::F2);
    rect_select(&mut canvas, (-1.0, -1.0), (11.0, 11.0));
    let before = canvas.document.strokes().to_vec();

    press(&mut canvas, 5.0, 0.0);
    for step in 1..=20 {
        motion(&mut canvas, 5.0 + step as f64, 0.0);
    }
    release(&mut canvas, 25.0, 0.0);

    assert_eq!(canvas.document.get(0).unwrap().points[0], Point::new(20.0, 0.0));
    assert_eq!(canvas.document.get(1).unwrap().points[1], Point::new(30.0, 10.0));

    assert!(ctrl(&mut canvas, 'z'));
    assert_eq!(canvas.document.strokes(), before.as_slice());
}

#[test]
fn space_release_mid_pan_stops_panning() {
    let mut canvas = Canvas::new();
    key(&mut canvas, Key::Space);
    press(&mut canvas, 0.0, 0.0);
    motion(&mut canvas, 4.0, 4.0);
    canvas.handle_event(InputEvent::KeyUp { key: Key::Space });
    motion(&mut canvas, 40.0, 40.0);
    release(&mut canvas, 40.0, 40.0);

    assert_eq!(canvas.camera.offset, Vec2::new(4.0, 4.0));
    assert!(canvas.document.is_empty());
    assert_eq!(canvas.tool(), ToolKind::Pencil);
}

#[test]
fn empty_state_guards_are_silent() {
    let mut canvas = Canvas::new();
    assert!(!ctrl(&mut canvas, 'z'));
    assert!(!ctrl(&mut canvas, 'y'));
    assert!(!key(&mut canvas, Key::F3));
    key(&mut canvas, Key::F2);
    assert!(!key(&mut canvas, Key::Backspace));
    // Selector press with nothing selected starts a rectangle rather than a drag.
    press(&mut canvas, 3.0, 3.0);
    assert!(canvas.tool_manager.selection_rect().is_some());
    release(&mut canvas, 3.0, 3.0);
    assert!(!canvas.document.can_undo());
    assert!(!key(&mut canvas, Key::Other));
}
