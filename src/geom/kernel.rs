//! Stateless hit-testing primitives.

use super::Point;
use crate::layout::CameraTile;
use crate::model::{RoiShape, Square};

/// Default pick radius, in mosaic pixels, for [`is_near_shape`].
pub const NEAR_THRESHOLD: f64 = 5.0;

/// Points closer than this to a polygon edge count as inside it.
const EDGE_EPSILON: f64 = 1e-9;

/// Inclusive containment test against a camera tile.
///
/// A missing tile never contains anything.
pub fn point_in_rectangle(p: &Point, rect: Option<&CameraTile>) -> bool {
    let Some(r) = rect else {
        return false;
    };
    p.x >= r.x && p.x <= r.x + r.width && p.y >= r.y && p.y <= r.y + r.height
}

/// Distance from `p` to the closed segment `a..b`.
///
/// A degenerate segment (`a == b`) yields the distance to `a`.
pub fn distance_point_to_segment(p: &Point, a: &Point, b: &Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    let t = if len_sq == 0.0 {
        -1.0
    } else {
        ((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq
    };

    if t < 0.0 {
        p.distance(a)
    } else if t > 1.0 {
        p.distance(b)
    } else {
        p.distance(&Point::new(a.x + t * dx, a.y + t * dy))
    }
}

/// Even-odd containment test over the implicitly closed vertex loop.
///
/// Points lying on an edge (within `1e-9`) are inside, which is what a
/// rasterised fill of the same path would report. Fewer than three
/// vertices enclose nothing.
pub fn point_in_polygon(p: &Point, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let on_edge = edges(vertices).any(|(a, b)| distance_point_to_segment(p, a, b) <= EDGE_EPSILON);
    if on_edge {
        return true;
    }

    let mut inside = false;
    for (a, b) in edges(vertices) {
        if (a.y > p.y) != (b.y > p.y) {
            let cross_x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < cross_x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Inclusive containment test against a square's full area.
pub fn point_in_square(p: &Point, square: &Square) -> bool {
    p.x >= square.x
        && p.x <= square.x + square.size
        && p.y >= square.y
        && p.y <= square.y + square.size
}

/// Pick test used by the select tool.
///
/// The meaning of "near" differs per variant:
/// - line: within `threshold` of the segment
/// - polygon: anywhere in the filled interior (the outline distance is not
///   consulted)
/// - square: within `threshold` of one of its four edges, i.e. a ring around
///   the outline; the middle of a large square does not pick it
pub fn is_near_shape(p: &Point, shape: &RoiShape, threshold: f64) -> bool {
    match shape {
        RoiShape::Line { points, .. } => {
            distance_point_to_segment(p, &points[0], &points[1]) <= threshold
        }
        RoiShape::Polygon { points, .. } => point_in_polygon(p, points),
        RoiShape::Square(square) => near_square_edge(p, square, threshold),
    }
}

fn near_square_edge(p: &Point, s: &Square, threshold: f64) -> bool {
    let right = s.x + s.size;
    let bottom = s.y + s.size;

    let in_expanded = p.x >= s.x - threshold
        && p.x <= right + threshold
        && p.y >= s.y - threshold
        && p.y <= bottom + threshold;
    if !in_expanded {
        return false;
    }

    (p.x - s.x).abs() <= threshold
        || (p.x - right).abs() <= threshold
        || (p.y - s.y).abs() <= threshold
        || (p.y - bottom).abs() <= threshold
}

/// Consecutive vertex pairs, including the closing edge back to the start.
fn edges(vertices: &[Point]) -> impl Iterator<Item = (&Point, &Point)> + '_ {
    vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .take(vertices.len())
}
