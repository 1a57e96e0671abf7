//! The edit controller.
//!
//! [`Editor`] is the explicit editing context: it owns the annotation model,
//! the redo history, the current camera layout, the active tool and colour,
//! and any square drag in progress. Events go in through
//! [`Editor::handle`]; every handler runs to completion and reports whether
//! the surface needs redrawing. Rendering itself is a separate pure step
//! over [`Editor::scene`].

mod event;
mod tool;

pub use event::{EditEvent, Outcome};
pub use tool::Tool;

use crate::error::RoiError;
use crate::geom::{Point, NEAR_THRESHOLD};
use crate::layout::{
    clamp_camera_count, layout, tile_at, CameraTile, DEFAULT_CAMERA_COUNT, MAX_CAMERA_COUNT,
};
use crate::model::{AnnotationModel, History, PointOutcome, SquareGrab};
use crate::project::{Project, SurfaceSize};
use crate::render::Scene;

/// Colour for new shapes until the operator picks another.
pub const DEFAULT_COLOR: &str = "#ff0000";

/// Observable controller state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EditState {
    /// No tool picked yet.
    Idle,
    /// Line tool, with this many points captured.
    CapturingLine(usize),
    /// Polygon tool, with this many vertices captured.
    CapturingPolygon(usize),
    /// Square tool, pointer not pressed.
    PlacingSquare,
    /// Square tool, dragging the square at `index`.
    DraggingSquare { index: usize, offset: (f64, f64) },
    /// Select tool.
    SelectMode,
}

/// Editing context for one mosaic.
#[derive(Clone, Debug)]
pub struct Editor {
    model: AnnotationModel,
    history: History,
    surface: SurfaceSize,
    tiles: Vec<CameraTile>,
    tool: Option<Tool>,
    color: String,
    drag: Option<SquareGrab>,
}

impl Editor {
    /// A fresh editor over a surface, split for the default camera count.
    pub fn new(surface: SurfaceSize) -> Self {
        Self {
            model: AnnotationModel::new(),
            history: History::new(),
            surface,
            tiles: layout(DEFAULT_CAMERA_COUNT, surface.width, surface.height),
            tool: None,
            color: DEFAULT_COLOR.to_string(),
            drag: None,
        }
    }

    /// Restores an editor from a saved project. History starts empty.
    pub fn from_project(project: &Project) -> Self {
        let mut editor = Self::new(project.surface);
        editor.load_project(project);
        editor
    }

    /// Replaces the whole session with a loaded project.
    ///
    /// The annotation set, layout and surface are swapped out; pending
    /// points, selection, drag and redo history are dropped. The current tool
    /// and colour are kept.
    pub fn load_project(&mut self, project: &Project) {
        self.surface = project.surface;
        self.tiles = layout(
            project.camera_count,
            project.surface.width,
            project.surface.height,
        );
        self.model.replace_shapes(project.rois.clone());
        self.history.clear();
        self.drag = None;
        log::debug!(
            "loaded project with {} ROI(s) over {} camera(s)",
            project.rois.len(),
            self.tiles.len()
        );
    }

    /// Captures the current session as a project.
    pub fn to_project(&self) -> Project {
        Project {
            camera_count: self.tiles.len() as u32,
            surface: self.surface,
            rois: self.model.snapshot(),
        }
    }

    pub fn model(&self) -> &AnnotationModel {
        &self.model
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn tiles(&self) -> &[CameraTile] {
        &self.tiles
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn tool(&self) -> Option<Tool> {
        self.tool
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// The camera tile under a mosaic point, if any.
    pub fn camera_at(&self, p: &Point) -> Option<&CameraTile> {
        tile_at(&self.tiles, p)
    }

    pub fn state(&self) -> EditState {
        let pending = self.model.pending().points().len();
        match self.tool {
            None => EditState::Idle,
            Some(Tool::Select) => EditState::SelectMode,
            Some(Tool::Line) => EditState::CapturingLine(pending),
            Some(Tool::Polygon) => EditState::CapturingPolygon(pending),
            Some(Tool::Square) => match self.drag {
                Some(grab) => EditState::DraggingSquare {
                    index: grab.index,
                    offset: grab.offset,
                },
                None => EditState::PlacingSquare,
            },
        }
    }

    /// A borrowed snapshot for the renderer.
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            tiles: &self.tiles,
            shapes: self.model.shapes(),
            selected: self.model.selected(),
            pending: self.model.pending(),
            pending_color: &self.color,
        }
    }

    /// Applies one event.
    ///
    /// # Errors
    /// Only [`EditEvent::ClosePolygon`] can fail, with
    /// [`RoiError::InsufficientVertices`]; the pending vertices are kept so
    /// the operator can add more.
    pub fn handle(&mut self, event: EditEvent) -> Result<Outcome, RoiError> {
        if let Some(p) = event.position() {
            if !p.is_finite() {
                log::debug!("ignoring pointer event at non-finite position {p:?}");
                return Ok(Outcome::Unchanged);
            }
        }

        let outcome = match event {
            EditEvent::Click { x, y } => self.click(Point::new(x, y)),
            EditEvent::PointerDown { x, y } => self.pointer_down(Point::new(x, y)),
            EditEvent::PointerMove { x, y } => self.pointer_move(Point::new(x, y)),
            EditEvent::PointerUp { .. } => Outcome::from_changed(self.drag.take().is_some()),
            EditEvent::Tool { tool } => {
                self.select_tool(tool);
                Outcome::Redraw
            }
            EditEvent::Color { color } => {
                self.color = color;
                // Pending markers are drawn in the current colour
                Outcome::from_changed(!self.model.pending().points().is_empty())
            }
            EditEvent::ClosePolygon => {
                let index = self.model.close_polygon(&self.color, &mut self.history)?;
                log::debug!("polygon closed as ROI #{index}");
                Outcome::Redraw
            }
            EditEvent::Delete => {
                self.drag = None;
                Outcome::from_changed(self.model.delete_selected().is_some())
            }
            EditEvent::Undo => {
                self.drag = None;
                Outcome::from_changed(self.model.undo(&mut self.history))
            }
            EditEvent::Redo => {
                self.drag = None;
                Outcome::from_changed(self.model.redo(&mut self.history))
            }
            EditEvent::ResizeSquare { delta } => self.resize_square(delta),
            EditEvent::SplitScreen { cameras } => {
                self.split_screen(cameras);
                Outcome::Redraw
            }
        };
        Ok(outcome)
    }

    /// Switches tools, silently discarding any unfinished line or polygon.
    pub fn select_tool(&mut self, tool: Tool) {
        if !self.model.pending().points().is_empty() {
            log::debug!(
                "discarding {} pending point(s) on switch to {tool}",
                self.model.pending().points().len()
            );
        }
        self.model.begin_shape(tool);
        self.history.discard_points();
        self.drag = None;
        self.tool = Some(tool);
    }

    /// Replaces the camera layout. Old tiles are dropped wholesale.
    ///
    /// Counts outside `1..=MAX_CAMERA_COUNT` are brought into range.
    pub fn split_screen(&mut self, cameras: u32) {
        if clamp_camera_count(cameras) != cameras {
            log::warn!(
                "cannot split into {cameras} camera(s); clamping to 1..={MAX_CAMERA_COUNT}"
            );
        }
        self.tiles = layout(cameras, self.surface.width, self.surface.height);
        log::debug!("split screen into {} camera tile(s)", self.tiles.len());
    }

    fn click(&mut self, p: Point) -> Outcome {
        match self.tool {
            Some(tool) if tool.captures_points() => {
                match self.model.add_point(p, &self.color, &mut self.history) {
                    PointOutcome::Ignored => Outcome::Unchanged,
                    PointOutcome::Captured(_) | PointOutcome::Committed(_) => Outcome::Redraw,
                }
            }
            Some(Tool::Select) => self.select(p),
            _ => Outcome::Unchanged,
        }
    }

    fn pointer_down(&mut self, p: Point) -> Outcome {
        match self.tool {
            Some(Tool::Select) => self.select(p),
            Some(Tool::Square) => {
                let grab = self
                    .model
                    .place_or_pick_square(p, &self.color, &mut self.history);
                self.drag = Some(grab);
                Outcome::Redraw
            }
            Some(Tool::Line | Tool::Polygon) | None => Outcome::Unchanged,
        }
    }

    fn pointer_move(&mut self, p: Point) -> Outcome {
        let Some(grab) = self.drag else {
            return Outcome::Unchanged;
        };
        let top_left = p.offset(-grab.offset.0, -grab.offset.1);
        Outcome::from_changed(self.model.move_square(grab.index, top_left))
    }

    fn select(&mut self, p: Point) -> Outcome {
        let before = self.model.selected();
        let after = self.model.select_at(&p, NEAR_THRESHOLD);
        Outcome::from_changed(before != after)
    }

    fn resize_square(&mut self, delta: f64) -> Outcome {
        let target = self
            .drag
            .map(|grab| grab.index)
            .or_else(|| self.model.selected());
        match target {
            Some(index) => Outcome::from_changed(self.model.resize_square(index, delta)),
            None => Outcome::Unchanged,
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(SurfaceSize::default())
    }
}
