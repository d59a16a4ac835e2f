//! Triangle emission for branch segments and polygon caps.

use std::f32::consts::TAU;

use bevy::math::Vec3;

use crate::cursor::SpatialCursor;
use crate::error::TurtleError;
use crate::mesh::{ColoredTriangle, TriangleList};

/// A tapered branch piece drawn along the cursor's heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeSegment {
    pub start_radius: f32,
    pub end_radius: f32,
    pub start_color: Vec3,
    pub end_color: Vec3,
    pub length: f32,
}

/// Points on a circle in the plane spanned by `right` and `up`. `phase` is a
/// fraction of one side's angle.
fn ring(center: Vec3, right: Vec3, up: Vec3, radius: f32, sides: u32, phase: f32) -> Vec<Vec3> {
    (0..sides)
        .map(|i| {
            let theta = ((i as f32 + phase) / sides as f32) * TAU;
            let (sin, cos) = theta.sin_cos();
            center + right * (cos * radius) + up * (sin * radius)
        })
        .collect()
}

/// Emits the lateral surface of a cone frustum from the cursor position to
/// `length` along its heading: two flat-shaded triangles per side.
///
/// The end ring is turned by half a side so consecutive segments interleave.
/// Stops with [`TurtleError::CapacityExceeded`] as soon as `out` is full.
pub fn emit_cone_segment(
    cursor: &SpatialCursor,
    segment: &ConeSegment,
    sides: u32,
    out: &mut TriangleList,
) -> Result<(), TurtleError> {
    let start = cursor.position();
    let end = start + cursor.forward() * segment.length;
    let (right, up) = (cursor.right(), cursor.up());

    let start_ring = ring(start, right, up, segment.start_radius, sides, 0.0);
    let end_ring = ring(end, right, up, segment.end_radius, sides, 0.5);
    let (c1, c2) = (segment.start_color, segment.end_color);

    for current in 0..sides as usize {
        let next = (current + 1) % sides as usize;

        out.add_triangle(ColoredTriangle::flat(
            [start_ring[current], start_ring[next], end_ring[current]],
            [c1, c1, c2],
        ))?;
        out.add_triangle(ColoredTriangle::flat(
            [end_ring[next], end_ring[current], start_ring[next]],
            [c2, c2, c1],
        ))?;
    }
    Ok(())
}

/// Fan-triangulates a captured polygon loop from its first vertex.
///
/// Each fan triangle is emitted twice: once as captured and once flipped and
/// pushed `offset` below along `up`, so the cap is visible from both sides.
/// A closing vertex equal to the first is dropped. Loops with fewer than three
/// distinct vertices emit nothing.
pub fn emit_polygon_cap(
    vertices: &[Vec3],
    up: Vec3,
    color: Vec3,
    offset: f32,
    out: &mut TriangleList,
) -> Result<(), TurtleError> {
    let vertices = match vertices {
        [first, rest @ .., last] if !rest.is_empty() && first.distance_squared(*last) < 1e-10 => {
            &vertices[..vertices.len() - 1]
        }
        _ => vertices,
    };
    if vertices.len() < 3 {
        return Ok(());
    }

    let anchor = vertices[0];
    let below = -up * offset;
    for pair in vertices[1..].windows(2) {
        let top = ColoredTriangle::flat([anchor, pair[0], pair[1]], [color; 3]);
        out.add_triangle(top)?;
        out.add_triangle(top.flipped(below))?;
    }
    Ok(())
}
