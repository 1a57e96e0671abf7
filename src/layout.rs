//! Camera grid layout over the mosaic surface.

use serde::{Deserialize, Serialize};

use crate::geom::{point_in_rectangle, Point};

/// Camera count used when nothing else is configured.
pub const DEFAULT_CAMERA_COUNT: u32 = 6;

/// Largest camera count a mosaic can be split into.
pub const MAX_CAMERA_COUNT: u32 = 64;

/// Brings a requested camera count into `1..=MAX_CAMERA_COUNT`.
pub fn clamp_camera_count(count: u32) -> u32 {
    count.clamp(1, MAX_CAMERA_COUNT)
}

/// One cell of the mosaic grid, showing one camera feed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraTile {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// 1-based, assigned in row-major order.
    pub index: u32,
}

impl CameraTile {
    /// Inclusive containment test.
    pub fn contains(&self, p: &Point) -> bool {
        point_in_rectangle(p, Some(self))
    }
}

/// Number of grid columns used for `count` cameras.
pub fn columns_for(count: u32) -> u32 {
    match count {
        2 => 2,
        3 => 3,
        4 => 2,
        _ => 3,
    }
}

/// Splits a `surface_width` x `surface_height` surface into camera tiles.
///
/// Cells are emitted row by row and numbered from 1. A partially filled last
/// row is truncated, not centred. A `count` of zero is treated as one camera,
/// and counts above [`MAX_CAMERA_COUNT`] are capped.
pub fn layout(count: u32, surface_width: f64, surface_height: f64) -> Vec<CameraTile> {
    let count = clamp_camera_count(count);
    let cols = columns_for(count);
    let rows = count.div_ceil(cols);
    let cell_width = surface_width / f64::from(cols);
    let cell_height = surface_height / f64::from(rows);

    let mut tiles = Vec::with_capacity(count as usize);
    'rows: for r in 0..rows {
        for c in 0..cols {
            if tiles.len() as u32 >= count {
                break 'rows;
            }
            tiles.push(CameraTile {
                x: f64::from(c) * cell_width,
                y: f64::from(r) * cell_height,
                width: cell_width,
                height: cell_height,
                index: tiles.len() as u32 + 1,
            });
        }
    }
    tiles
}

/// Finds the tile with the given 1-based camera index.
pub fn tile_by_index(tiles: &[CameraTile], index: u32) -> Option<&CameraTile> {
    tiles.iter().find(|t| t.index == index)
}

/// Finds the first tile (in row-major order) containing `p`.
pub fn tile_at<'a>(tiles: &'a [CameraTile], p: &Point) -> Option<&'a CameraTile> {
    tiles.iter().find(|t| t.contains(p))
}
