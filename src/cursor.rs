//! Position and orientation of the turtle in 3D space.

use bevy::math::{Mat3, Mat4, Quat, Vec3};

/// World-space heading of an unrotated cursor.
pub const WORLD_FORWARD: Vec3 = Vec3::Z;
pub const WORLD_RIGHT: Vec3 = Vec3::X;
pub const WORLD_UP: Vec3 = Vec3::Y;

/// A position, rotation and scale. Directions are the world axes
/// ([`WORLD_FORWARD`], [`WORLD_RIGHT`], [`WORLD_UP`]) carried through the
/// current orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialCursor {
    position: Vec3,
    orientation: Quat,
    scale: Vec3,
}

impl Default for SpatialCursor {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl SpatialCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation.normalize();
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    pub fn forward(&self) -> Vec3 {
        (self.orientation * WORLD_FORWARD).normalize()
    }

    pub fn right(&self) -> Vec3 {
        (self.orientation * WORLD_RIGHT).normalize()
    }

    pub fn up(&self) -> Vec3 {
        (self.orientation * WORLD_UP).normalize()
    }

    /// Moves along the current heading.
    pub fn advance(&mut self, distance: f32) {
        self.position += self.forward() * distance;
    }

    /// Turns about the cursor's own up axis.
    pub fn adjust_yaw(&mut self, degrees: f32) {
        self.rotate_local(self.up(), degrees);
    }

    /// Turns about the cursor's own right axis.
    pub fn adjust_pitch(&mut self, degrees: f32) {
        self.rotate_local(self.right(), degrees);
    }

    /// Turns about the cursor's own heading.
    pub fn adjust_roll(&mut self, degrees: f32) {
        self.rotate_local(self.forward(), degrees);
    }

    /// Rotates the orientation only. Position is left in place.
    pub fn rotate_local(&mut self, axis: Vec3, degrees: f32) {
        let Some(axis) = axis.try_normalize() else {
            return;
        };
        let turn = Quat::from_axis_angle(axis, degrees.to_radians());
        self.orientation = (turn * self.orientation).normalize();
    }

    /// Rotates position (about the origin) and orientation by a world axis.
    pub fn rotate_world(&mut self, axis: Vec3, degrees: f32) {
        let Some(axis) = axis.try_normalize() else {
            return;
        };
        let turn = Quat::from_axis_angle(axis, degrees.to_radians());
        self.position = turn * self.position;
        self.orientation = (turn * self.orientation).normalize();
    }

    /// Orbits around `pivot` by a world axis.
    pub fn rotate_around_point(&mut self, pivot: Vec3, axis: Vec3, degrees: f32) {
        self.position -= pivot;
        self.rotate_world(axis, degrees);
        self.position += pivot;
    }

    /// Sets the orientation from an orthonormal frame, so that forward, up and
    /// right map to the given vectors.
    pub fn set_basis(&mut self, forward: Vec3, up: Vec3, right: Vec3) {
        let rotation = Mat3::from_cols(right, up, forward);
        self.orientation = Quat::from_mat3(&rotation).normalize();
    }

    /// Rolls about the heading until the side axis is horizontal
    /// (perpendicular to [`WORLD_UP`]). Does nothing while heading straight up
    /// or down.
    pub fn rotate_to_vertical(&mut self) {
        let forward = self.forward();
        let side = WORLD_UP.cross(forward);
        if side.length_squared() < 1e-8 {
            return;
        }
        let side = side.normalize();
        let up = forward.cross(side).normalize();
        self.set_basis(forward, up, side);
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.orientation, self.position)
    }
}
