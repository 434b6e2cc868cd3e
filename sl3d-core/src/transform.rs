/// Rigid transforms applied to mesh vertices in place
use nalgebra::{Rotation3, Vector3};

use crate::geometry::Mesh;

/// Rotation deltas around the three axes, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerDegrees {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl EulerDegrees {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }
}

impl Default for EulerDegrees {
    fn default() -> Self {
        Self::zero()
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from per-axis deltas
    pub fn rotation_matrix(angles: &EulerDegrees) -> Rotation3<f32> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), angles.x.to_radians());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), angles.y.to_radians());
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), angles.z.to_radians());

        // Applied to a vertex as X first, then Y, then Z
        rz * ry * rx
    }

    /// Shift every vertex by `offset`
    pub fn translate(mesh: &mut Mesh, offset: &Vector3<f32>) {
        for vertex in &mut mesh.vertices {
            *vertex += *offset;
        }
    }

    /// Rotate every vertex about the world origin.
    ///
    /// Deltas compound with previous calls: the mesh keeps its rotated
    /// positions, and a mesh away from the origin orbits as well as spins.
    pub fn rotate(mesh: &mut Mesh, angles: &EulerDegrees) {
        let rotation = Self::rotation_matrix(angles);
        for vertex in &mut mesh.vertices {
            *vertex = rotation * *vertex;
        }
    }
}

impl Mesh {
    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        Transform::translate(self, &Vector3::new(dx, dy, dz));
    }

    pub fn rotate(&mut self, x_deg: f32, y_deg: f32, z_deg: f32) {
        Transform::rotate(self, &EulerDegrees::new(x_deg, y_deg, z_deg));
    }
}
