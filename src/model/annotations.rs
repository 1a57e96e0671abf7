//! The annotation set and its mutating operations.

use crate::editor::Tool;
use crate::error::RoiError;
use crate::geom::{is_near_shape, point_in_square, Point};

use super::history::{History, Removed};
use super::shape::{RoiShape, Square, DEFAULT_SQUARE_SIZE};

/// The shape currently under construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Pending {
    /// The active tool does not capture points.
    #[default]
    Empty,
    /// A line with zero or one captured point.
    Line(Vec<Point>),
    /// A polygon with any number of captured vertices.
    Polygon(Vec<Point>),
}

impl Pending {
    /// Captured points, empty when nothing is being captured.
    pub fn points(&self) -> &[Point] {
        match self {
            Pending::Empty => &[],
            Pending::Line(points) | Pending::Polygon(points) => points,
        }
    }

    fn points_mut(&mut self) -> Option<&mut Vec<Point>> {
        match self {
            Pending::Empty => None,
            Pending::Line(points) | Pending::Polygon(points) => Some(points),
        }
    }
}

/// What happened to a point handed to [`AnnotationModel::add_point`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointOutcome {
    /// No multi-step capture is active.
    Ignored,
    /// The point was appended; the pending shape now has this many points.
    Captured(usize),
    /// The point completed a shape, committed at this index.
    Committed(usize),
}

/// A square picked up for dragging.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SquareGrab {
    /// Position of the square in the annotation set.
    pub index: usize,
    /// Pointer position minus the square's top-left corner.
    pub offset: (f64, f64),
    /// True if the square was created by this grab.
    pub created: bool,
}

/// Committed shapes in z-order, the pending shape, and the selection.
#[derive(Clone, Debug, Default)]
pub struct AnnotationModel {
    shapes: Vec<RoiShape>,
    pending: Pending,
    selected: Option<usize>,
}

impl AnnotationModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> &[RoiShape] {
        &self.shapes
    }

    pub fn pending(&self) -> &Pending {
        &self.pending
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// An owned copy of the committed shapes, for export.
    pub fn snapshot(&self) -> Vec<RoiShape> {
        self.shapes.clone()
    }

    /// Starts a fresh pending shape for tools that capture points.
    ///
    /// Any previously captured points are discarded.
    pub fn begin_shape(&mut self, tool: Tool) {
        self.pending = match tool {
            Tool::Line => Pending::Line(Vec::with_capacity(2)),
            Tool::Polygon => Pending::Polygon(Vec::new()),
            Tool::Select | Tool::Square => Pending::Empty,
        };
    }

    /// Appends a point to the pending shape.
    ///
    /// A line commits as soon as it has two points. Polygons wait for
    /// [`close_polygon`](Self::close_polygon).
    pub fn add_point(&mut self, point: Point, color: &str, history: &mut History) -> PointOutcome {
        match &mut self.pending {
            Pending::Empty => PointOutcome::Ignored,
            Pending::Line(points) => {
                history.invalidate();
                points.push(point);
                if points.len() < 2 {
                    return PointOutcome::Captured(points.len());
                }
                let (a, b) = (points[0], points[1]);
                points.clear();
                PointOutcome::Committed(self.commit(RoiShape::line(a, b, color)))
            }
            Pending::Polygon(points) => {
                history.invalidate();
                points.push(point);
                PointOutcome::Captured(points.len())
            }
        }
    }

    /// Commits the pending polygon.
    ///
    /// # Errors
    /// Returns [`RoiError::InsufficientVertices`] if fewer than three vertices
    /// have been captured (or no polygon is being captured). The pending
    /// vertices are left untouched.
    pub fn close_polygon(&mut self, color: &str, history: &mut History) -> Result<usize, RoiError> {
        match &mut self.pending {
            Pending::Polygon(points) if points.len() >= 3 => {
                let points = std::mem::take(points);
                history.invalidate();
                Ok(self.commit(RoiShape::polygon(points, color)))
            }
            Pending::Polygon(points) => Err(RoiError::InsufficientVertices {
                count: points.len(),
            }),
            _ => Err(RoiError::InsufficientVertices { count: 0 }),
        }
    }

    /// Picks the topmost square containing `point`, or creates and commits a
    /// new default-sized square centred on it.
    pub fn place_or_pick_square(
        &mut self,
        point: Point,
        color: &str,
        history: &mut History,
    ) -> SquareGrab {
        let hit = self
            .shapes
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, shape)| match shape {
                RoiShape::Square(sq) if point_in_square(&point, sq) => Some((i, sq.x, sq.y)),
                _ => None,
            });

        if let Some((index, x, y)) = hit {
            return SquareGrab {
                index,
                offset: (point.x - x, point.y - y),
                created: false,
            };
        }

        history.invalidate();
        let square = Square::centered_at(point, DEFAULT_SQUARE_SIZE, color);
        let index = self.commit(RoiShape::Square(square));
        SquareGrab {
            index,
            offset: (DEFAULT_SQUARE_SIZE / 2.0, DEFAULT_SQUARE_SIZE / 2.0),
            created: true,
        }
    }

    /// Moves the square at `index` so its top-left corner is `top_left`.
    ///
    /// Returns false if `index` is not a square.
    pub fn move_square(&mut self, index: usize, top_left: Point) -> bool {
        match self.shapes.get_mut(index).and_then(RoiShape::as_square_mut) {
            Some(square) => {
                square.x = top_left.x;
                square.y = top_left.y;
                true
            }
            None => false,
        }
    }

    /// Changes the edge length of the square at `index` by `delta`.
    pub fn resize_square(&mut self, index: usize, delta: f64) -> bool {
        match self.shapes.get_mut(index).and_then(RoiShape::as_square_mut) {
            Some(square) => {
                square.resize_by(delta);
                true
            }
            None => false,
        }
    }

    /// Selects the topmost shape near `point`, or clears the selection.
    pub fn select_at(&mut self, point: &Point, threshold: f64) -> Option<usize> {
        self.selected = self
            .shapes
            .iter()
            .rposition(|shape| is_near_shape(point, shape, threshold));
        self.selected
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Removes the selected shape, if any.
    pub fn delete_selected(&mut self) -> Option<RoiShape> {
        let index = self.selected.take()?;
        (index < self.shapes.len()).then(|| self.shapes.remove(index))
    }

    /// Rolls back one step: a pending point if there is one, otherwise the
    /// newest committed shape.
    pub fn undo(&mut self, history: &mut History) -> bool {
        if let Some(point) = self.pending.points_mut().and_then(Vec::pop) {
            history.push_removed(Removed::Point(point));
            return true;
        }

        match self.shapes.pop() {
            Some(shape) => {
                if self.selected == Some(self.shapes.len()) {
                    self.selected = None;
                }
                history.push_removed(Removed::Shape(shape));
                true
            }
            None => false,
        }
    }

    /// Restores the most recently undone item.
    pub fn redo(&mut self, history: &mut History) -> bool {
        match history.pop_removed() {
            Some(Removed::Shape(shape)) => {
                self.shapes.push(shape);
                true
            }
            Some(Removed::Point(point)) => match self.pending.points_mut() {
                Some(points) => {
                    points.push(point);
                    true
                }
                None => {
                    // Nothing to restore into; keep it for when capture resumes
                    history.push_removed(Removed::Point(point));
                    false
                }
            },
            None => false,
        }
    }

    /// Replaces every committed shape, dropping pending state and selection.
    pub fn replace_shapes(&mut self, shapes: Vec<RoiShape>) {
        self.shapes = shapes;
        self.clear_selection();
        if let Some(points) = self.pending.points_mut() {
            points.clear();
        }
    }

    fn commit(&mut self, shape: RoiShape) -> usize {
        log::debug!("committed {} ROI #{}", shape.kind(), self.shapes.len());
        self.shapes.push(shape);
        self.shapes.len() - 1
    }
}
