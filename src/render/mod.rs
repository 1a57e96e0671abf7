//! Drawing annotations onto a surface.
//!
//! The core never keeps drawing state. A redraw is the pure function
//! [`draw_scene`] from a borrowed [`Scene`] snapshot to calls on a
//! [`Surface`]. The export projector reuses the same shape styling through
//! [`draw_polyline_roi`] and [`draw_square_roi`] when burning mapped shapes
//! into target images.

mod color;
mod draw_list;
mod pixmap;

pub use color::Rgb;
pub use draw_list::{DrawList, DrawOp};
pub use pixmap::PixmapSurface;

use crate::layout::CameraTile;
use crate::model::{Pending, RoiShape};

/// Stroke width for ROI outlines.
pub const ROI_WIDTH: f32 = 2.0;

/// Stroke width for the selected ROI and for camera tile borders.
pub const EMPHASIS_WIDTH: f32 = 4.0;

/// Opacity of polygon fills.
pub const POLYGON_FILL_ALPHA: f32 = 0.3;

/// Half the edge length of the marker drawn on each pending point.
const PENDING_MARKER: f64 = 3.0;

/// Colour, line width and opacity for subsequent draw calls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub color: Rgb,
    pub width: f32,
    pub alpha: f32,
}

impl Style {
    pub fn new(color: Rgb, width: f32, alpha: f32) -> Self {
        Self {
            color,
            width,
            alpha,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new(Rgb::RED, ROI_WIDTH, 1.0)
    }
}

/// A drawing surface. Coordinates are in whatever pixel space the surface
/// covers; there is no transform.
pub trait Surface {
    fn clear(&mut self);
    fn set_style(&mut self, style: Style);
    fn stroke_path(&mut self, points: &[(f64, f64)], closed: bool);
    fn fill_path(&mut self, points: &[(f64, f64)]);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn draw_label(&mut self, text: &str, x: f64, y: f64);
}

/// Everything a redraw of the editing surface needs.
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    pub tiles: &'a [CameraTile],
    pub shapes: &'a [RoiShape],
    pub selected: Option<usize>,
    pub pending: &'a Pending,
    /// Colour the pending shape will be committed with.
    pub pending_color: &'a str,
}

/// Redraws the whole editing surface.
///
/// Layers, bottom to top: camera tiles with their labels, committed shapes
/// in z-order, then the shape under construction.
pub fn draw_scene<S: Surface + ?Sized>(scene: &Scene<'_>, surface: &mut S) {
    surface.clear();

    surface.set_style(Style::new(Rgb::RED, EMPHASIS_WIDTH, 1.0));
    for tile in scene.tiles {
        surface.stroke_rect(tile.x, tile.y, tile.width, tile.height);
        surface.draw_label(&format!("Camera {}", tile.index), tile.x + 10.0, tile.y + 20.0);
    }

    for (idx, shape) in scene.shapes.iter().enumerate() {
        let width = if scene.selected == Some(idx) {
            EMPHASIS_WIDTH
        } else {
            ROI_WIDTH
        };
        draw_shape(surface, shape, width);
    }

    draw_pending(surface, scene.pending, scene.pending_color);
}

/// Draws one committed shape in mosaic coordinates.
pub fn draw_shape<S: Surface + ?Sized>(surface: &mut S, shape: &RoiShape, width: f32) {
    let color = Rgb::parse_or_red(shape.color());
    match shape {
        RoiShape::Line { points, .. } => {
            let pts: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
            draw_polyline_roi(surface, color, &pts, false, width);
        }
        RoiShape::Polygon { points, .. } => {
            let pts: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
            draw_polyline_roi(surface, color, &pts, true, width);
        }
        RoiShape::Square(sq) => draw_square_roi(surface, color, (sq.x, sq.y, sq.size, sq.size), width),
    }
}

/// Draws a line (`filled == false`) or a polygon (`filled == true`).
///
/// Polygons get a translucent fill under an opaque outline; lines are
/// stroked fully opaque.
pub fn draw_polyline_roi<S: Surface + ?Sized>(
    surface: &mut S,
    color: Rgb,
    points: &[(f64, f64)],
    filled: bool,
    width: f32,
) {
    if filled {
        surface.set_style(Style::new(color, width, POLYGON_FILL_ALPHA));
        surface.fill_path(points);
    }
    surface.set_style(Style::new(color, width, 1.0));
    surface.stroke_path(points, filled);
}

/// Draws an opaque rectangle outline given as `(x, y, width, height)`.
pub fn draw_square_roi<S: Surface + ?Sized>(
    surface: &mut S,
    color: Rgb,
    rect: (f64, f64, f64, f64),
    width: f32,
) {
    surface.set_style(Style::new(color, width, 1.0));
    surface.stroke_rect(rect.0, rect.1, rect.2, rect.3);
}

fn draw_pending<S: Surface + ?Sized>(surface: &mut S, pending: &Pending, color: &str) {
    let points = pending.points();
    if points.is_empty() {
        return;
    }

    surface.set_style(Style::new(Rgb::parse_or_red(color), ROI_WIDTH, 1.0));
    let pts: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
    if pts.len() > 1 {
        surface.stroke_path(&pts, false);
    }
    for (x, y) in pts {
        surface.stroke_rect(
            x - PENDING_MARKER,
            y - PENDING_MARKER,
            PENDING_MARKER * 2.0,
            PENDING_MARKER * 2.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;
    use crate::layout::layout;
    use crate::model::Square;

    fn scene_ops(shapes: &[RoiShape], selected: Option<usize>, pending: &Pending) -> Vec<DrawOp> {
        let tiles = layout(2, 200.0, 100.0);
        let scene = Scene {
            tiles: &tiles,
            shapes,
            selected,
            pending,
            pending_color: "#00ff00",
        };
        let mut list = DrawList::new();
        draw_scene(&scene, &mut list);
        list.ops
    }

    #[test]
    fn test_scene_draws_tiles_with_labels() {
        let tiles = layout(2, 200.0, 100.0);
        let scene = Scene {
            tiles: &tiles,
            shapes: &[],
            selected: None,
            pending: &Pending::Empty,
            pending_color: "#fff",
        };
        let mut list = DrawList::new();
        draw_scene(&scene, &mut list);

        assert_eq!(list.ops[0], DrawOp::Clear);
        assert_eq!(list.labels(), vec!["Camera 1", "Camera 2"]);
        assert!(list.ops.contains(&DrawOp::Label {
            text: "Camera 2".into(),
            x: 110.0,
            y: 20.0
        }));
    }

    #[test]
    fn test_polygon_is_filled_translucent_then_stroked() {
        let poly = RoiShape::polygon(
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(0.0, 10.0),
            ],
            "#0000ff",
        );
        let ops = scene_ops(&[poly], None, &Pending::Empty);
        let tail = &ops[ops.len() - 4..];

        assert_eq!(
            tail[0],
            DrawOp::Style(Style::new(Rgb::new(0, 0, 255), ROI_WIDTH, POLYGON_FILL_ALPHA))
        );
        assert!(matches!(tail[1], DrawOp::FillPath { .. }));
        assert_eq!(
            tail[2],
            DrawOp::Style(Style::new(Rgb::new(0, 0, 255), ROI_WIDTH, 1.0))
        );
        assert!(matches!(tail[3], DrawOp::StrokePath { closed: true, .. }));
    }

    #[test]
    fn test_selected_shape_is_emphasised() {
        let sq = RoiShape::Square(Square::new(5.0, 5.0, 10.0, "#ffffff"));
        let ops = scene_ops(&[sq], Some(0), &Pending::Empty);
        assert!(ops.contains(&DrawOp::Style(Style::new(
            Rgb::new(255, 255, 255),
            EMPHASIS_WIDTH,
            1.0
        ))));
        assert_eq!(
            ops.last(),
            Some(&DrawOp::StrokeRect {
                x: 5.0,
                y: 5.0,
                width: 10.0,
                height: 10.0
            })
        );
    }

    #[test]
    fn test_pending_points_are_marked() {
        let pending = Pending::Polygon(vec![Point::new(10.0, 10.0), Point::new(20.0, 10.0)]);
        let ops = scene_ops(&[], None, &pending);
        let strokes = ops
            .iter()
            .filter(|op| matches!(op, DrawOp::StrokePath { closed: false, .. }))
            .count();
        assert_eq!(strokes, 1);
        assert!(ops.contains(&DrawOp::StrokeRect {
            x: 17.0,
            y: 7.0,
            width: 6.0,
            height: 6.0
        }));
    }
}
