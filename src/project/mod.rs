//! Saved editing sessions.
//!
//! A [`Project`] is the settings blob handed to the persistence
//! collaborator: the camera count, the size of the mosaic surface the
//! shapes were drawn on, and the annotation set itself.

pub mod io_json;

use serde::{Deserialize, Serialize};

use crate::error::RoiError;
use crate::layout::{clamp_camera_count, DEFAULT_CAMERA_COUNT, MAX_CAMERA_COUNT};
use crate::model::RoiShape;

/// Size of the mosaic display surface, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// A saved annotation session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Number of camera tiles in the mosaic. Stored counts outside
    /// `1..=MAX_CAMERA_COUNT` are brought into range when read.
    #[serde(
        default = "default_camera_count",
        deserialize_with = "deserialize_camera_count"
    )]
    pub camera_count: u32,

    /// Surface the shapes were drawn on.
    #[serde(default)]
    pub surface: SurfaceSize,

    /// Committed shapes, in z-order.
    #[serde(default)]
    pub rois: Vec<RoiShape>,
}

fn default_camera_count() -> u32 {
    DEFAULT_CAMERA_COUNT
}

fn deserialize_camera_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let count = u32::deserialize(deserializer)?;
    let clamped = clamp_camera_count(count);
    if clamped != count {
        log::warn!("camera count {count} out of range, using {clamped}");
    }
    Ok(clamped)
}

impl Default for Project {
    fn default() -> Self {
        Self {
            camera_count: DEFAULT_CAMERA_COUNT,
            surface: SurfaceSize::default(),
            rois: Vec::new(),
        }
    }
}

impl Project {
    /// Checks invariants serde cannot express.
    ///
    /// # Errors
    /// Returns [`RoiError::InvalidProject`] for a camera count outside
    /// `1..=MAX_CAMERA_COUNT`, a non-positive surface, a polygon with fewer
    /// than three vertices, or a non-positive square.
    pub fn check(&self) -> Result<(), RoiError> {
        if clamp_camera_count(self.camera_count) != self.camera_count {
            return Err(RoiError::InvalidProject(format!(
                "camera count must be between 1 and {MAX_CAMERA_COUNT}, got {}",
                self.camera_count
            )));
        }

        let SurfaceSize { width, height } = self.surface;
        if !(width > 0.0 && height > 0.0) {
            return Err(RoiError::InvalidProject(format!(
                "surface must be positive, got {width}x{height}"
            )));
        }

        for (idx, roi) in self.rois.iter().enumerate() {
            match roi {
                RoiShape::Polygon { points, .. } if points.len() < 3 => {
                    return Err(RoiError::InvalidProject(format!(
                        "polygon ROI #{idx} has {} vertices (need at least 3)",
                        points.len()
                    )));
                }
                RoiShape::Square(square) if !(square.size > 0.0) => {
                    return Err(RoiError::InvalidProject(format!(
                        "square ROI #{idx} has non-positive size {}",
                        square.size
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }
}
