//! ROI shape variants.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geom::Point;

/// Edge length of a freshly placed square, in mosaic pixels.
pub const DEFAULT_SQUARE_SIZE: f64 = 50.0;

/// Squares cannot be resized below this edge length.
pub const MIN_SQUARE_SIZE: f64 = 4.0;

/// A committed region of interest.
///
/// Serialized with an internal `"type"` tag (`line`, `polygon`, `square`),
/// which is also the project file representation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RoiShape {
    /// Two points, in click order.
    Line { points: [Point; 2], color: String },

    /// Three or more vertices; the last connects back to the first.
    Polygon { points: Vec<Point>, color: String },

    /// Axis-aligned square.
    Square(Square),
}

/// An axis-aligned square given by its top-left corner and edge length.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Square {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: String,
}

/// The variant of a [`RoiShape`], without its data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    Line,
    Polygon,
    Square,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Line => write!(f, "Line"),
            ShapeKind::Polygon => write!(f, "Polygon"),
            ShapeKind::Square => write!(f, "Square"),
        }
    }
}

impl RoiShape {
    pub fn line(a: Point, b: Point, color: impl Into<String>) -> Self {
        RoiShape::Line {
            points: [a, b],
            color: color.into(),
        }
    }

    /// Builds a polygon without checking the vertex count.
    pub fn polygon(points: Vec<Point>, color: impl Into<String>) -> Self {
        RoiShape::Polygon {
            points,
            color: color.into(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            RoiShape::Line { .. } => ShapeKind::Line,
            RoiShape::Polygon { .. } => ShapeKind::Polygon,
            RoiShape::Square(_) => ShapeKind::Square,
        }
    }

    pub fn color(&self) -> &str {
        match self {
            RoiShape::Line { color, .. } | RoiShape::Polygon { color, .. } => color,
            RoiShape::Square(square) => &square.color,
        }
    }

    /// The points that decide which cameras a shape belongs to.
    ///
    /// For a square this is only its top-left anchor.
    pub fn anchor_points(&self) -> Vec<Point> {
        match self {
            RoiShape::Line { points, .. } => points.to_vec(),
            RoiShape::Polygon { points, .. } => points.clone(),
            RoiShape::Square(square) => vec![square.top_left()],
        }
    }

    pub fn as_square(&self) -> Option<&Square> {
        match self {
            RoiShape::Square(square) => Some(square),
            _ => None,
        }
    }

    pub fn as_square_mut(&mut self) -> Option<&mut Square> {
        match self {
            RoiShape::Square(square) => Some(square),
            _ => None,
        }
    }
}

impl Square {
    pub fn new(x: f64, y: f64, size: f64, color: impl Into<String>) -> Self {
        Self {
            x,
            y,
            size,
            color: color.into(),
        }
    }

    /// A square of edge `size` whose centre is `center`.
    pub fn centered_at(center: Point, size: f64, color: impl Into<String>) -> Self {
        Self::new(center.x - size / 2.0, center.y - size / 2.0, size, color)
    }

    #[inline]
    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.size / 2.0, self.y + self.size / 2.0)
    }

    /// Grows or shrinks the edge by `delta`, keeping the top-left corner.
    pub fn resize_by(&mut self, delta: f64) {
        self.size = (self.size + delta).max(MIN_SQUARE_SIZE);
    }
}
