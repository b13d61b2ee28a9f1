//! Geometry helpers shared by the camera, hit-testing and selection.
//!
//! World-space coordinates are plain [`Point`]s. Raw input positions are
//! wrapped in [`ScreenPoint`] so the two spaces can't be mixed up.

use crate::document::Stroke;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A position in screen space (pixels relative to the surface origin).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint(pub Point);

impl ScreenPoint {
    pub const ZERO: ScreenPoint = ScreenPoint(Point::ZERO);

    pub fn new(x: f64, y: f64) -> Self {
        Self(Point::new(x, y))
    }

    pub fn x(self) -> f64 {
        self.0.x
    }

    pub fn y(self) -> f64 {
        self.0.y
    }

    /// Screen-space delta from `other` to `self`.
    pub fn delta_from(self, other: ScreenPoint) -> Vec2 {
        self.0 - other.0
    }
}

impl From<Point> for ScreenPoint {
    fn from(point: Point) -> Self {
        Self(point)
    }
}

/// Inclusive point-in-rectangle test (points on any edge count as inside).
pub fn point_in_rect(point: Point, rect: Rect) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Normalized rectangle spanning two arbitrary corners.
pub fn rect_from_points(a: Point, b: Point) -> Rect {
    Rect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
}

/// Whether any point of the stroke lies inside `rect`.
pub fn stroke_in_rect(stroke: &Stroke, rect: Rect) -> bool {
    stroke.points.iter().any(|&p| point_in_rect(p, rect))
}

/// Map a screen point to world space: `(screen - offset) / zoom`.
pub fn screen_to_world(screen: ScreenPoint, offset: Vec2, zoom: f64) -> Point {
    Point::new(
        (screen.x() - offset.x) / zoom,
        (screen.y() - offset.y) / zoom,
    )
}

/// Map a world point to screen space: `world * zoom + offset`.
pub fn world_to_screen(world: Point, offset: Vec2, zoom: f64) -> ScreenPoint {
    ScreenPoint::new(world.x * zoom + offset.x, world.y * zoom + offset.y)
}

/// Shortest distance from `point` to the polyline through `points`.
///
/// A single-point polyline degrades to point distance; an empty one is
/// infinitely far away.
pub fn distance_to_polyline(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => point.distance(*only),
        _ => points
            .windows(2)
            .map(|w| distance_to_segment(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

fn distance_to_segment(point: Point, start: Point, end: Point) -> f64 {
    let line_vec = end - start;
    let line_len_sq = line_vec.hypot2();
    if line_len_sq < f64::EPSILON {
        return point.distance(start);
    }
    let t = ((point - start).dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    point.distance(start + line_vec * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_in_rect_is_inclusive() {
        let rect = Rect::new(0.0, 0.0, 20.0, 20.0);
        assert!(point_in_rect(Point::new(0.0, 0.0), rect));
        assert!(point_in_rect(Point::new(20.0, 20.0), rect));
        assert!(point_in_rect(Point::new(20.0, 5.0), rect));
        assert!(!point_in_rect(Point::new(20.1, 5.0), rect));
    }

    #[test]
    fn test_zero_area_rect_contains_its_corner() {
        let rect = rect_from_points(Point::new(5.0, 5.0), Point::new(5.0, 5.0));
        assert!(point_in_rect(Point::new(5.0, 5.0), rect));
        assert!(!point_in_rect(Point::new(5.0, 5.5), rect));
    }

    #[test]
    fn test_rect_from_points_normalizes() {
        let rect = rect_from_points(Point::new(30.0, 5.0), Point::new(10.0, 25.0));
        assert_eq!(rect, Rect::new(10.0, 5.0, 30.0, 25.0));
    }

    #[test]
    fn test_stroke_in_rect() {
        let stroke = Stroke::new(
            vec![Point::new(-10.0, -10.0), Point::new(5.0, 5.0)],
            "#ff0000",
        );
        assert!(stroke_in_rect(&stroke, Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(!stroke_in_rect(&stroke, Rect::new(6.0, 6.0, 10.0, 10.0)));
    }

    #[test]
    fn test_screen_world_roundtrip() {
        let offset = Vec2::new(-37.5, 112.0);
        for zoom in [0.1, 0.75, 1.0, 2.5, 5.0] {
            let screen = ScreenPoint::new(123.0, -456.0);
            let back = world_to_screen(screen_to_world(screen, offset, zoom), offset, zoom);
            assert!((back.x() - screen.x()).abs() < 1e-9);
            assert!((back.y() - screen.y()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_distance_to_polyline() {
        let line = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
        assert!((distance_to_polyline(Point::new(50.0, 4.0), &line) - 4.0).abs() < 1e-12);
        assert!((distance_to_polyline(Point::new(103.0, 4.0), &line) - 5.0).abs() < 1e-12);
        assert!((distance_to_polyline(Point::new(3.0, 4.0), &line[..1]) - 5.0).abs() < 1e-12);
        assert!(distance_to_polyline(Point::ZERO, &[]).is_infinite());
    }
}
