//! The annotation model: committed ROI shapes, the shape under
//! construction, the current selection, and the redo history.
//!
//! # Example
//!
//! ```
//! use roimap::geom::Point;
//! use roimap::model::{AnnotationModel, History, PointOutcome};
//! use roimap::editor::Tool;
//!
//! let mut model = AnnotationModel::new();
//! let mut history = History::default();
//!
//! model.begin_shape(Tool::Line);
//! model.add_point(Point::new(10.0, 10.0), "#ff0000", &mut history);
//! let outcome = model.add_point(Point::new(50.0, 50.0), "#ff0000", &mut history);
//!
//! assert_eq!(outcome, PointOutcome::Committed(0));
//! assert_eq!(model.shapes().len(), 1);
//! ```

mod annotations;
mod history;
mod shape;

pub use annotations::{AnnotationModel, Pending, PointOutcome, SquareGrab};
pub use history::{History, Removed};
pub use shape::{RoiShape, ShapeKind, Square, DEFAULT_SQUARE_SIZE, MIN_SQUARE_SIZE};
