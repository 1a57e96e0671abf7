//! Geometry for the mosaic editor.
//!
//! Points are typed by the space they live in (see [`Mosaic`] and [`ImagePx`]) so that
//! mosaic-display coordinates and target-image coordinates cannot be mixed
//! up. The [`kernel`] module holds the stateless hit-testing primitives used
//! by the editor and the export projector.

mod coord;
pub mod kernel;
mod space;

pub use coord::Coord;
pub use kernel::{
    distance_point_to_segment, is_near_shape, point_in_polygon, point_in_rectangle,
    point_in_square, NEAR_THRESHOLD,
};
pub use space::{ImagePx, Mosaic};

/// A point on the editing mosaic.
pub type Point = Coord<Mosaic>;

/// A point on a target image, after projection.
pub type ImagePoint = Coord<ImagePx>;
