//! Coordinate space marker types.
//!
//! Zero-sized types used as type parameters so that a point on the editing
//! mosaic can never be handed to code expecting a point on a target image.

use std::fmt;

/// Marker for mosaic-display coordinates.
///
/// This is the pixel space of the editing surface: the composite view that
/// shows every camera tile at once. All captured points live here.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mosaic {}

/// Marker for target-image pixel coordinates.
///
/// Produced by the coordinate mapper when a mosaic point is projected onto
/// the still image assigned to a camera.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImagePx {}

impl fmt::Debug for Mosaic {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for ImagePx {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
