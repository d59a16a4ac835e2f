//! Branch snapshots saved on `[` and restored on `]`.

use bevy::math::Vec3;

use crate::cursor::SpatialCursor;
use crate::error::TurtleError;

/// Everything a branch restores when it closes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurtleState {
    pub polygon_mode: bool,
    pub segment_width: f32,
    pub cursor: SpatialCursor,
    pub color: Vec3,
}

/// LIFO stack of [`TurtleState`]s. Popping an empty stack returns
/// [`TurtleError::BranchUnderflow`].
#[derive(Debug, Clone, Default)]
pub struct BranchStack {
    states: Vec<TurtleState>,
}

impl BranchStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, state: TurtleState) {
        self.states.push(state);
    }

    pub fn pop(&mut self) -> Result<TurtleState, TurtleError> {
        self.states.pop().ok_or(TurtleError::BranchUnderflow)
    }

    pub fn depth(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}
