/// Fixed toy perspective from model space to screen space
use nalgebra::Point3;

use crate::error::RenderError;

/// Smallest accepted `camera_distance + z` before a vertex counts as on the camera plane.
pub const MIN_DENOMINATOR: f32 = 1e-3;

/// A vertex in screen space. `z` is the untouched model-space depth, kept
/// only as an interpolation anchor for the fill intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl ProjectedVertex {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Screen geometry and virtual camera distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub width: u32,
    pub height: u32,
    pub camera_distance: f32,
}

impl Projector {
    pub const DEFAULT_CAMERA_DISTANCE: f32 = 50.0;

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            camera_distance: Self::DEFAULT_CAMERA_DISTANCE,
        }
    }

    pub fn with_camera_distance(mut self, camera_distance: f32) -> Self {
        self.camera_distance = camera_distance;
        self
    }

    /// Project a 3D point to 2D screen space.
    ///
    /// The viewport is biased by a third of its size rather than centred.
    /// Points on or behind the camera plane are rejected.
    pub fn project(&self, point: &Point3<f32>) -> Result<ProjectedVertex, RenderError> {
        let denominator = self.camera_distance + point.z;
        if !(denominator > MIN_DENOMINATOR) {
            return Err(RenderError::DegenerateProjection { z: point.z });
        }

        let scale = self.height as f32 / denominator;
        let projected = ProjectedVertex {
            x: point.x * scale + self.width as f32 / 3.0,
            y: point.y * scale + self.height as f32 / 3.0,
            z: point.z,
        };

        if !projected.is_finite() {
            return Err(RenderError::DegenerateProjection { z: point.z });
        }

        Ok(projected)
    }

    /// Project every vertex independently
    pub fn project_all(&self, points: &[Point3<f32>]) -> Vec<Result<ProjectedVertex, RenderError>> {
        points.iter().map(|p| self.project(p)).collect()
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(320, 200)
    }
}
