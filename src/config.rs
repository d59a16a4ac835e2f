//! Turtle tunables, loadable from TOML.
//!
//! ```toml
//! hue_step = 12.0
//! cone_sides = 7
//! max_triangles = 250000
//! ```
//!
//! Missing keys take their defaults.

use std::f32::consts::PI;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LSystemError;

pub const MIN_CONE_SIDES: u32 = 3;
pub const MAX_CONE_SIDES: u32 = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurtleConfig {
    /// Hue rotation, in degrees, applied per `F` segment.
    pub hue_step: f32,
    /// Starting color as `[hue, saturation, value]`.
    pub initial_hsv: [f32; 3],
    /// Starting width is `distance / width_divisor`.
    pub width_divisor: f32,
    /// Each `F` shrinks the width by `starting width / taper_divisor`.
    pub taper_divisor: f32,
    pub min_width: f32,
    /// Sides of each cone segment.
    pub cone_sides: u32,
    pub polygon_color: [f32; 3],
    /// Gap between the two faces of a polygon cap.
    pub cap_offset: f32,
    pub max_triangles: usize,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            hue_step: 8.0,
            initial_hsv: [26.3, 0.7, 0.315],
            width_divisor: PI,
            taper_divisor: PI * PI * PI,
            min_width: 0.005,
            cone_sides: 11,
            polygon_color: [0.1, 0.3, 0.2],
            cap_offset: 0.001,
            max_triangles: 1_000_000,
        }
    }
}

impl TurtleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hue_step(mut self, degrees: f32) -> Self {
        self.hue_step = degrees;
        self
    }

    pub fn with_initial_hsv(mut self, hsv: [f32; 3]) -> Self {
        self.initial_hsv = hsv;
        self
    }

    pub fn with_cone_sides(mut self, sides: u32) -> Self {
        self.cone_sides = sides;
        self
    }

    pub fn with_max_triangles(mut self, max_triangles: usize) -> Self {
        self.max_triangles = max_triangles;
        self
    }

    pub fn with_min_width(mut self, min_width: f32) -> Self {
        self.min_width = min_width;
        self
    }

    pub fn with_taper(mut self, width_divisor: f32, taper_divisor: f32) -> Self {
        self.width_divisor = width_divisor;
        self.taper_divisor = taper_divisor;
        self
    }

    /// Side count actually used for cones.
    pub fn sides(&self) -> u32 {
        self.cone_sides.clamp(MIN_CONE_SIDES, MAX_CONE_SIDES)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, LSystemError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LSystemError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LSystemError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
