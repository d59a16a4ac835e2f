//! Capacity-bounded triangle storage filled by the turtle.

use bevy::asset::RenderAssetUsages;
use bevy::color::{LinearRgba, Srgba};
use bevy::mesh::PrimitiveTopology;
use bevy::prelude::*;

use crate::error::TurtleError;

/// Storage reserved up front; larger lists grow on demand up to their capacity.
const PREALLOCATED_TRIANGLES: usize = 1 << 16;

/// One triangle with per-vertex colors and normals.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColoredTriangle {
    pub positions: [Vec3; 3],
    /// Gamma-encoded sRGB.
    pub colors: [Vec3; 3],
    pub normals: [Vec3; 3],
}

impl ColoredTriangle {
    /// Builds a flat-shaded triangle: the face normal of `positions` (in
    /// counter-clockwise winding) is copied to all three vertices.
    pub fn flat(positions: [Vec3; 3], colors: [Vec3; 3]) -> Self {
        let normal = face_normal(positions);
        Self {
            positions,
            colors,
            normals: [normal; 3],
        }
    }

    /// The same triangle seen from the other side: reversed winding, negated
    /// normals, moved by `offset`.
    pub fn flipped(&self, offset: Vec3) -> Self {
        let [a, b, c] = self.positions;
        let [ca, cb, cc] = self.colors;
        let [na, nb, nc] = self.normals;
        Self {
            positions: [c + offset, b + offset, a + offset],
            colors: [cc, cb, ca],
            normals: [-nc, -nb, -na],
        }
    }

    /// Vertex colors in linear RGB, the space Bevy vertex colors and glTF
    /// `COLOR_0` expect.
    pub fn linear_colors(&self) -> [Vec3; 3] {
        self.colors.map(srgb_to_linear)
    }
}

pub fn srgb_to_linear(color: Vec3) -> Vec3 {
    let linear = LinearRgba::from(Srgba::rgb(color.x, color.y, color.z));
    Vec3::new(linear.red, linear.green, linear.blue)
}

pub(crate) fn face_normal([a, b, c]: [Vec3; 3]) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

/// An append-only list of triangles that refuses to grow past its capacity
/// and tracks the bounding box of everything added.
#[derive(Debug, Clone)]
pub struct TriangleList {
    triangles: Vec<ColoredTriangle>,
    capacity: usize,
    bounds_min: Vec3,
    bounds_max: Vec3,
}

impl TriangleList {
    pub fn new(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity.min(PREALLOCATED_TRIANGLES)),
            capacity,
            bounds_min: Vec3::INFINITY,
            bounds_max: Vec3::NEG_INFINITY,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.triangles.len() >= self.capacity
    }

    pub fn triangles(&self) -> &[ColoredTriangle] {
        &self.triangles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColoredTriangle> {
        self.triangles.iter()
    }

    /// Appends a triangle and folds its vertices into the bounding box.
    pub fn add_triangle(&mut self, triangle: ColoredTriangle) -> Result<(), TurtleError> {
        if self.is_full() {
            return Err(TurtleError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        for vertex in triangle.positions {
            self.bounds_min = self.bounds_min.min(vertex);
            self.bounds_max = self.bounds_max.max(vertex);
        }
        self.triangles.push(triangle);
        Ok(())
    }

    /// Empties the list and its bounding box. Allocated storage is kept.
    pub fn clear(&mut self) {
        self.triangles.clear();
        self.bounds_min = Vec3::INFINITY;
        self.bounds_max = Vec3::NEG_INFINITY;
    }

    /// `(min, max)` corners over every vertex added, or `None` when empty.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        (!self.triangles.is_empty()).then_some((self.bounds_min, self.bounds_max))
    }

    pub fn center(&self) -> Option<Vec3> {
        self.bounds().map(|(min, max)| (min + max) * 0.5)
    }

    /// Converts to a non-indexed Bevy mesh with position, normal and vertex
    /// color attributes. Colors are written in linear RGB.
    pub fn to_mesh(&self) -> Mesh {
        let vertex_count = self.triangles.len() * 3;
        let mut positions: Vec<Vec3> = Vec::with_capacity(vertex_count);
        let mut normals: Vec<Vec3> = Vec::with_capacity(vertex_count);
        let mut colors: Vec<[f32; 4]> = Vec::with_capacity(vertex_count);

        for triangle in &self.triangles {
            positions.extend_from_slice(&triangle.positions);
            normals.extend_from_slice(&triangle.normals);
            colors.extend(triangle.linear_colors().map(|c| c.extend(1.0).to_array()));
        }

        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        );
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
        mesh
    }
}

impl<'a> IntoIterator for &'a TriangleList {
    type Item = &'a ColoredTriangle;
    type IntoIter = std::slice::Iter<'a, ColoredTriangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}
