//! The turtle interpreter.
//!
//! A [`Turtle`] walks the string produced by an [`LSystem`] one symbol at a
//! time. Each symbol maps to a [`TurtleCommand`] that moves or turns the
//! turtle's [`SpatialCursor`], opens or closes a branch, or captures polygon
//! vertices. Drawing commands append triangles to a [`TriangleList`].
//!
//! Branch segments are tapered cones: every `F` narrows the width and steps
//! the hue, so deeper parts of the plant come out thinner and shifted in
//! color. Widths and colors are restored when a branch closes.

use bevy::color::{Hsva, Hue, Srgba};
use bevy::math::Vec3;
use tracing::{debug, info, warn};

use crate::branch::{BranchStack, TurtleState};
use crate::command::TurtleCommand;
use crate::config::TurtleConfig;
use crate::cursor::SpatialCursor;
use crate::error::TurtleError;
use crate::geometry::{ConeSegment, emit_cone_segment, emit_polygon_cap};
use crate::lsystem::LSystem;
use crate::mesh::TriangleList;

/// What a draw pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawSummary {
    /// Symbols consumed before the pass ended.
    pub symbols_processed: usize,
    pub triangles: usize,
    /// Set when the triangle buffer filled up before the end of the string.
    pub truncated: bool,
    /// `]` symbols that had no open branch and were ignored.
    pub unmatched_pops: usize,
}

#[derive(Debug, Clone)]
pub struct Turtle {
    config: TurtleConfig,
    cursor: SpatialCursor,
    width: f32,
    width_decrement: f32,
    color: Vec3,
    branches: BranchStack,
    polygon_mode: bool,
    polygon_start: SpatialCursor,
    polygon_vertices: Vec<Vec3>,
}

impl Default for Turtle {
    fn default() -> Self {
        Self::new(TurtleConfig::default())
    }
}

fn hsv_to_rgb(hsv: Hsva) -> Vec3 {
    let rgb = Srgba::from(hsv);
    Vec3::new(rgb.red, rgb.green, rgb.blue)
}

fn rgb_to_hsv(rgb: Vec3) -> Hsva {
    Hsva::from(Srgba::rgb(rgb.x, rgb.y, rgb.z))
}

impl Turtle {
    pub fn new(config: TurtleConfig) -> Self {
        let [h, s, v] = config.initial_hsv;
        Self {
            color: hsv_to_rgb(Hsva::hsv(h, s, v)),
            config,
            cursor: SpatialCursor::default(),
            width: 0.0,
            width_decrement: 0.0,
            branches: BranchStack::new(),
            polygon_mode: false,
            polygon_start: SpatialCursor::default(),
            polygon_vertices: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: TurtleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TurtleConfig) {
        self.config = config;
    }

    pub fn cursor(&self) -> &SpatialCursor {
        &self.cursor
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn color(&self) -> Vec3 {
        self.color
    }

    pub fn is_defining_polygon(&self) -> bool {
        self.polygon_mode
    }

    pub fn branch_depth(&self) -> usize {
        self.branches.depth()
    }

    /// Snapshot of the state a branch would save right now.
    pub fn state(&self) -> TurtleState {
        TurtleState {
            polygon_mode: self.polygon_mode,
            segment_width: self.width,
            cursor: self.cursor,
            color: self.color,
        }
    }

    fn restore(&mut self, state: TurtleState) {
        self.polygon_mode = state.polygon_mode;
        self.width = state.segment_width;
        self.cursor = state.cursor;
        self.color = state.color;
    }

    /// Puts the turtle back at the origin with the starting width and color
    /// for `system`.
    pub fn begin(&mut self, system: &LSystem) {
        let [h, s, v] = self.config.initial_hsv;
        self.cursor.reset();
        self.color = hsv_to_rgb(Hsva::hsv(h, s, v));
        self.width = system.distance() / self.config.width_divisor;
        self.width_decrement = self.width / self.config.taper_divisor;
        self.branches.clear();
        self.polygon_mode = false;
        self.polygon_start = SpatialCursor::default();
        self.polygon_vertices.clear();
    }

    /// Interprets `system` into a fresh list sized by
    /// [`TurtleConfig::max_triangles`].
    pub fn draw_system(&mut self, system: &LSystem) -> TriangleList {
        let mut triangles = TriangleList::new(self.config.max_triangles);
        self.draw_system_into(system, &mut triangles);
        triangles
    }

    /// Clears `out` and refills it from `system`, reusing its storage.
    ///
    /// Reads the generated string, or the axiom when nothing has been
    /// generated. Stops early once `out` is full.
    pub fn draw_system_into(&mut self, system: &LSystem, out: &mut TriangleList) -> DrawSummary {
        out.clear();
        self.begin(system);

        let mut summary = DrawSummary::default();
        let source = system.source();
        debug!(length = source.len(), "turtle processing string");

        for (index, symbol) in source.chars().enumerate() {
            if out.is_full() {
                summary.truncated = true;
                break;
            }
            match self.interpret(symbol, system, out) {
                Ok(()) => {}
                Err(TurtleError::BranchUnderflow) => {
                    warn!(index, "ignoring `]` without an open branch");
                    summary.unmatched_pops += 1;
                }
                Err(err @ TurtleError::CapacityExceeded { .. }) => {
                    warn!(index, "{err}, interpretation stopped");
                    summary.truncated = true;
                    break;
                }
            }
            summary.symbols_processed += 1;
        }

        if self.polygon_mode {
            warn!(
                vertices = self.polygon_vertices.len(),
                "string ended inside a polygon, captured vertices dropped"
            );
        }
        if !self.branches.is_empty() {
            debug!(depth = self.branches.depth(), "string ended with open branches");
        }

        summary.triangles = out.len();
        info!(
            symbols = summary.symbols_processed,
            triangles = summary.triangles,
            truncated = summary.truncated,
            "turtle finished"
        );
        summary
    }

    /// Executes the command for one symbol. Symbols outside the alphabet are
    /// ignored.
    pub fn interpret(
        &mut self,
        symbol: char,
        system: &LSystem,
        out: &mut TriangleList,
    ) -> Result<(), TurtleError> {
        match TurtleCommand::from_symbol(symbol) {
            Some(command) => self.execute(command, system, out),
            None => Ok(()),
        }
    }

    pub fn execute(
        &mut self,
        command: TurtleCommand,
        system: &LSystem,
        out: &mut TriangleList,
    ) -> Result<(), TurtleError> {
        let angle = system.angle();
        match command {
            TurtleCommand::DrawForward => self.draw_forward(system.distance(), out)?,
            TurtleCommand::MoveForward => self.move_forward(system.distance()),
            TurtleCommand::Yaw(sign) => self.cursor.adjust_yaw(sign.apply(angle)),
            TurtleCommand::Pitch(sign) => self.cursor.adjust_pitch(sign.apply(angle)),
            TurtleCommand::Roll(sign) => self.cursor.adjust_roll(sign.apply(angle)),
            TurtleCommand::TurnAround => self.cursor.adjust_yaw(180.0),
            TurtleCommand::RotateToVertical => self.cursor.rotate_to_vertical(),
            TurtleCommand::PushBranch => {
                let state = self.state();
                self.branches.push(state);
            }
            TurtleCommand::PopBranch => {
                let state = self.branches.pop()?;
                self.restore(state);
            }
            TurtleCommand::BeginPolygon => self.begin_polygon(),
            TurtleCommand::EndPolygon => self.end_polygon(out)?,
            TurtleCommand::Reserved(_) => {}
        }
        Ok(())
    }

    fn next_color(&self) -> Vec3 {
        hsv_to_rgb(rgb_to_hsv(self.color).rotate_hue(self.config.hue_step))
    }

    fn draw_forward(&mut self, distance: f32, out: &mut TriangleList) -> Result<(), TurtleError> {
        let next_color = self.next_color();
        let end_width = self.width - self.width_decrement;

        let segment = ConeSegment {
            start_radius: self.width,
            end_radius: end_width.max(0.0),
            start_color: self.color,
            end_color: next_color,
            length: distance,
        };
        emit_cone_segment(&self.cursor, &segment, self.config.sides(), out)?;

        self.width = end_width.max(self.config.min_width);
        self.color = next_color;
        self.move_forward(distance);
        Ok(())
    }

    fn move_forward(&mut self, distance: f32) {
        self.cursor.advance(distance);
        if self.polygon_mode {
            self.polygon_vertices.push(self.cursor.position());
        }
    }

    fn begin_polygon(&mut self) {
        self.polygon_mode = true;
        self.polygon_start = self.cursor;
        self.polygon_vertices.clear();
        self.polygon_vertices.push(self.cursor.position());
    }

    fn end_polygon(&mut self, out: &mut TriangleList) -> Result<(), TurtleError> {
        self.polygon_mode = false;
        let result = emit_polygon_cap(
            &self.polygon_vertices,
            self.polygon_start.up(),
            Vec3::from_array(self.config.polygon_color),
            self.config.cap_offset,
            out,
        );
        self.polygon_vertices.clear();
        result
    }
}
