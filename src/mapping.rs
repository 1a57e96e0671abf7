//! Mosaic-to-image coordinate mapping.
//!
//! A mosaic point is first expressed as a fraction of its camera tile, then
//! scaled to the target image's pixel grid:
//!
//! ```text
//! fx = (p.x - tile.x) / tile.width
//! fy = (p.y - tile.y) / tile.height
//! mapped = (fx * image_width, fy * image_height)
//! ```
//!
//! The mapping is purely per-axis scaling; no lens or perspective model is
//! involved.

use crate::geom::{point_in_rectangle, ImagePoint, Point};
use crate::layout::CameraTile;
use crate::model::{RoiShape, ShapeKind};

/// Maps a mosaic point into the pixel space of an image assigned to `tile`.
pub fn map_point(p: &Point, tile: &CameraTile, image_width: u32, image_height: u32) -> ImagePoint {
    TileMapper::new(tile, image_width, image_height).map_point(p)
}

/// Rounds to two decimal places, as written to the manifest.
pub fn round2(v: f64) -> f64 {
    let r = (v * 100.0).round() / 100.0;
    // Avoid printing "-0"
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

/// Whether `shape` should be projected onto the image of `tile`.
///
/// Lines and polygons qualify when any of their points is inside the tile.
/// A square qualifies when its top-left anchor is. A missing tile matches
/// nothing.
pub fn belongs_to(shape: &RoiShape, tile: Option<&CameraTile>) -> bool {
    shape
        .anchor_points()
        .iter()
        .any(|p| point_in_rectangle(p, tile))
}

/// A shape expressed in target-image pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum MappedShape {
    Line {
        points: [ImagePoint; 2],
        color: String,
    },
    Polygon {
        points: Vec<ImagePoint>,
        color: String,
    },
    Square {
        x: f64,
        y: f64,
        size: f64,
        color: String,
    },
}

impl MappedShape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            MappedShape::Line { .. } => ShapeKind::Line,
            MappedShape::Polygon { .. } => ShapeKind::Polygon,
            MappedShape::Square { .. } => ShapeKind::Square,
        }
    }

    pub fn color(&self) -> &str {
        match self {
            MappedShape::Line { color, .. }
            | MappedShape::Polygon { color, .. }
            | MappedShape::Square { color, .. } => color,
        }
    }
}

/// Projects shapes from one camera tile onto an image of known size.
#[derive(Clone, Copy, Debug)]
pub struct TileMapper<'a> {
    tile: &'a CameraTile,
    image_width: f64,
    image_height: f64,
}

impl<'a> TileMapper<'a> {
    pub fn new(tile: &'a CameraTile, image_width: u32, image_height: u32) -> Self {
        Self {
            tile,
            image_width: f64::from(image_width),
            image_height: f64::from(image_height),
        }
    }

    pub fn tile(&self) -> &CameraTile {
        self.tile
    }

    pub fn map_point(&self, p: &Point) -> ImagePoint {
        let fx = (p.x - self.tile.x) / self.tile.width;
        let fy = (p.y - self.tile.y) / self.tile.height;
        ImagePoint::new(fx * self.image_width, fy * self.image_height)
    }

    /// Ratio used to scale a square's edge length.
    ///
    /// Only the horizontal ratio is used, so a square stays square on the
    /// image even when the image's aspect ratio differs from the tile's;
    /// its vertical extent is then not proportional to the tile.
    pub fn size_scale(&self) -> f64 {
        self.image_width / self.tile.width
    }

    /// Maps every coordinate of `shape`. Does not check membership; see
    /// [`belongs_to`].
    pub fn map_shape(&self, shape: &RoiShape) -> MappedShape {
        match shape {
            RoiShape::Line { points, color } => MappedShape::Line {
                points: [self.map_point(&points[0]), self.map_point(&points[1])],
                color: color.clone(),
            },
            RoiShape::Polygon { points, color } => MappedShape::Polygon {
                points: points.iter().map(|p| self.map_point(p)).collect(),
                color: color.clone(),
            },
            RoiShape::Square(sq) => {
                let anchor = self.map_point(&sq.top_left());
                MappedShape::Square {
                    x: anchor.x,
                    y: anchor.y,
                    size: sq.size * self.size_scale(),
                    color: sq.color.clone(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Square;

    fn tile_at(x: f64, y: f64, width: f64, height: f64) -> CameraTile {
        CameraTile {
            x,
            y,
            width,
            height,
            index: 1,
        }
    }

    #[test]
    fn test_map_point_scales_per_axis() {
        let tile = tile_at(0.0, 0.0, 100.0, 100.0);
        let mapped = map_point(&Point::new(60.0, 60.0), &tile, 400, 300);
        assert_eq!(round2(mapped.x), 240.0);
        assert_eq!(round2(mapped.y), 180.0);
    }

    #[test]
    fn test_map_point_subtracts_tile_origin() {
        let tile = tile_at(200.0, 100.0, 100.0, 100.0);
        let mapped = map_point(&Point::new(250.0, 125.0), &tile, 1920, 1080);
        assert_eq!(mapped.x, 960.0);
        assert_eq!(mapped.y, 270.0);
    }

    #[test]
    fn test_square_size_uses_horizontal_ratio_only() {
        let tile = tile_at(0.0, 0.0, 100.0, 100.0);
        let mapper = TileMapper::new(&tile, 400, 100);
        let sq = RoiShape::Square(Square::new(10.0, 10.0, 20.0, "#fff"));

        match mapper.map_shape(&sq) {
            MappedShape::Square { x, y, size, .. } => {
                assert_eq!((x, y), (40.0, 10.0));
                assert_eq!(size, 80.0);
            }
            other => panic!("expected square, got {other:?}"),
        }
    }

    #[test]
    fn test_map_shape_keeps_color_and_order() {
        let tile = tile_at(0.0, 0.0, 10.0, 10.0);
        let mapper = TileMapper::new(&tile, 100, 100);
        let poly = RoiShape::polygon(
            vec![Point::new(1.0, 1.0), Point::new(2.0, 1.0), Point::new(1.0, 2.0)],
            "#123456",
        );
        let mapped = mapper.map_shape(&poly);
        assert_eq!(mapped.kind(), ShapeKind::Polygon);
        assert_eq!(mapped.color(), "#123456");
        match mapped {
            MappedShape::Polygon { points, .. } => {
                assert_eq!(points[1], ImagePoint::new(20.0, 10.0));
            }
            other => panic!("expected polygon, got {other:?}"),
        }
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.005_1), 1.01);
        assert_eq!(round2(2.344), 2.34);
        assert_eq!(round2(-0.001), 0.0);
        assert!(round2(-0.001).is_sign_positive());
    }

    #[test]
    fn test_belongs_to() {
        let tile = tile_at(0.0, 0.0, 100.0, 100.0);
        let line = RoiShape::line(Point::new(50.0, 50.0), Point::new(150.0, 50.0), "#fff");
        let outside = RoiShape::line(Point::new(150.0, 50.0), Point::new(160.0, 50.0), "#fff");
        // Anchor outside even though the square overlaps the tile
        let square = RoiShape::Square(Square::new(-10.0, 10.0, 50.0, "#fff"));

        assert!(belongs_to(&line, Some(&tile)));
        assert!(!belongs_to(&outside, Some(&tile)));
        assert!(!belongs_to(&square, Some(&tile)));
        assert!(!belongs_to(&line, None));
    }
}
