//! Input events and handler outcomes.

use serde::{Deserialize, Serialize};

use super::tool::Tool;
use crate::geom::Point;

/// One pointer or keyboard event, already translated into mosaic
/// coordinates by the caller.
///
/// Serialized with an `"event"` tag so that editing sessions can be
/// scripted as JSON lines, e.g. `{"event":"click","x":10,"y":10}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EditEvent {
    Click { x: f64, y: f64 },
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    Tool { tool: Tool },
    Color { color: String },
    ClosePolygon,
    Delete,
    Undo,
    Redo,
    ResizeSquare { delta: f64 },
    SplitScreen { cameras: u32 },
}

impl EditEvent {
    /// The pointer position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            EditEvent::Click { x, y }
            | EditEvent::PointerDown { x, y }
            | EditEvent::PointerMove { x, y }
            | EditEvent::PointerUp { x, y } => Some(Point::new(*x, *y)),
            _ => None,
        }
    }
}

/// Whether handling an event changed anything visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// State changed; the surface should be redrawn.
    Redraw,
    /// Nothing changed.
    Unchanged,
}

impl Outcome {
    pub fn from_changed(changed: bool) -> Self {
        if changed {
            Outcome::Redraw
        } else {
            Outcome::Unchanged
        }
    }

    pub fn needs_redraw(&self) -> bool {
        *self == Outcome::Redraw
    }
}
