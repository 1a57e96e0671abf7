//! The plain-text coordinate manifest.
//!
//! Each image gets a block: its name on the first line, then one line per
//! projected shape. Blocks are separated by a blank line. Lines and polygons
//! are written as a compact JSON-style point list:
//!
//! ```text
//! cam1.png
//! ROI: [{"x":240,"y":180},{"x":320.5,"y":12}]
//! Square ROI: { x: 40, y: 10, size: 80 }
//! ```
//!
//! All numbers are rounded to two decimals and printed without trailing
//! zeros.

use std::fmt::Write as _;

use super::ImageExport;
use crate::geom::ImagePoint;
use crate::mapping::{round2, MappedShape};

/// The manifest line for one projected shape.
pub fn manifest_line(shape: &MappedShape) -> String {
    match shape {
        MappedShape::Line { points, .. } => format!("ROI: {}", point_list(points)),
        MappedShape::Polygon { points, .. } => format!("ROI: {}", point_list(points)),
        MappedShape::Square { x, y, size, .. } => format!(
            "Square ROI: {{ x: {}, y: {}, size: {} }}",
            round2(*x),
            round2(*y),
            round2(*size)
        ),
    }
}

/// The manifest block for one image.
pub fn image_block(export: &ImageExport) -> String {
    let lines: Vec<String> = export.shapes.iter().map(manifest_line).collect();
    format!("{}\n{}", export.image_name, lines.join("\n"))
}

/// The manifest for every image, blocks separated by a blank line.
pub fn manifest(exports: &[ImageExport]) -> String {
    exports
        .iter()
        .map(image_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn point_list(points: &[ImagePoint]) -> String {
    let mut out = String::from("[");
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        // Writing to a String cannot fail
        let _ = write!(out, r#"{{"x":{},"y":{}}}"#, round2(p.x), round2(p.y));
    }
    out.push(']');
    out
}
