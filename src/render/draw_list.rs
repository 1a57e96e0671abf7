//! A surface that records draw calls instead of rasterising them.

use super::{Style, Surface};

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear,
    Style(Style),
    StrokePath { points: Vec<(f64, f64)>, closed: bool },
    FillPath { points: Vec<(f64, f64)> },
    StrokeRect { x: f64, y: f64, width: f64, height: f64 },
    Label { text: String, x: f64, y: f64 },
}

/// Records every call made against it, in order.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    pub ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels drawn so far, in order.
    pub fn labels(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Label { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for DrawList {
    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn set_style(&mut self, style: Style) {
        self.ops.push(DrawOp::Style(style));
    }

    fn stroke_path(&mut self, points: &[(f64, f64)], closed: bool) {
        self.ops.push(DrawOp::StrokePath {
            points: points.to_vec(),
            closed,
        });
    }

    fn fill_path(&mut self, points: &[(f64, f64)]) {
        self.ops.push(DrawOp::FillPath {
            points: points.to_vec(),
        });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::StrokeRect {
            x,
            y,
            width,
            height,
        });
    }

    fn draw_label(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(DrawOp::Label {
            text: text.to_string(),
            x,
            y,
        });
    }
}
