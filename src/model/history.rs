//! Redo history.
//!
//! Undo takes its items straight from the annotation model (pending points
//! first, then committed shapes, newest first). What it removes lands here
//! until it is redone or invalidated by a fresh edit.

use crate::geom::Point;

use super::shape::RoiShape;

/// An item taken off the model by undo.
#[derive(Clone, Debug, PartialEq)]
pub enum Removed {
    /// A whole committed shape.
    Shape(RoiShape),
    /// One point of the shape under construction.
    Point(Point),
}

/// Redo stack, most recently removed item last.
#[derive(Clone, Debug, Default)]
pub struct History {
    redo_stack: Vec<Removed>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an item removed by undo.
    pub fn push_removed(&mut self, item: Removed) {
        self.redo_stack.push(item);
    }

    /// Takes the most recently removed item for redo.
    pub fn pop_removed(&mut self) -> Option<Removed> {
        self.redo_stack.pop()
    }

    /// Drops everything redoable. Called when a new shape or point is added.
    pub fn invalidate(&mut self) {
        if !self.redo_stack.is_empty() {
            log::debug!("redo history cleared ({} item(s))", self.redo_stack.len());
        }
        self.redo_stack.clear();
    }

    /// Drops redoable points but keeps redoable shapes.
    ///
    /// Pending points are not carried across tool switches, and neither are
    /// their redo entries.
    pub fn discard_points(&mut self) {
        self.redo_stack
            .retain(|item| matches!(item, Removed::Shape(_)));
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.redo_stack.clear();
    }
}
