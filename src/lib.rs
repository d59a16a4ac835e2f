//! Lindenmayer systems for Bevy: rewriting, 3D turtle interpretation and
//! colored triangle meshes.
//!
//! An [`LSystem`] expands an axiom through its rewriting rules. A [`Turtle`]
//! then walks the generated string and emits tapered, hue-shifted branch
//! cones and double-sided polygon caps into a capacity-bounded
//! [`TriangleList`], ready to hand to a renderer as a Bevy [`Mesh`] or to
//! export as OBJ/GLB.
//!
//! # Features
//!
//! - **Rewriting**: parallel single-character substitution with a length cap
//!   via [`LSystem::rewrite`].
//! - **Turtle**: yaw/pitch/roll turns, branching with `[` `]`, polygon capture
//!   with `{` `}` and Honda-style leveling with `$` via [`Turtle`].
//! - **Parameter files**: a small line-based text format, see [`params`].
//! - **Export**: OBJ and GLB utilities via [`export`].
//! - **Egui UI helpers** (optional): a system editor panel via [`ui`].
//!   Requires the `egui` feature.
//!
//! # Example
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_lindenmayer::{LSystem, Turtle};
//!
//! fn spawn_plant(
//!     mut commands: Commands,
//!     mut meshes: ResMut<Assets<Mesh>>,
//!     mut materials: ResMut<Assets<StandardMaterial>>,
//! ) {
//!     let mut system = LSystem::new()
//!         .with_axiom("X")
//!         .with_rule('X', "F[+X][-X]FX").unwrap()
//!         .with_rule('F', "FF").unwrap()
//!         .with_angle(25.7)
//!         .with_iterations(5);
//!     system.rewrite();
//!
//!     let triangles = Turtle::default().draw_system(&system);
//!     commands.spawn((
//!         Mesh3d(meshes.add(triangles.to_mesh())),
//!         MeshMaterial3d(materials.add(StandardMaterial::default())),
//!     ));
//! }
//! ```
//!
//! [`Mesh`]: bevy::mesh::Mesh

pub mod branch;
pub mod command;
pub mod config;
pub mod cursor;
pub mod error;
pub mod export;
pub mod geometry;
pub mod lsystem;
pub mod mesh;
pub mod params;
pub mod rules;
pub mod turtle;

#[cfg(feature = "egui")]
pub mod ui;

pub use branch::{BranchStack, TurtleState};
pub use command::TurtleCommand;
pub use config::TurtleConfig;
pub use cursor::SpatialCursor;
pub use error::{LSystemError, TurtleError};
pub use lsystem::{LSystem, RewriteSummary};
pub use mesh::{ColoredTriangle, TriangleList};
pub use params::LSystemParams;
pub use rules::RuleTable;
pub use turtle::{DrawSummary, Turtle};
