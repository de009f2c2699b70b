//! # 3D Camera
//!
//! Camera abstraction consumed by the render surface. Library-agnostic: no
//! GPU dependencies in the camera math, just a pose and projection
//! parameters with on-demand matrix generation.

use crate::foundation::math::{utils, Mat4, Vec3};
use nalgebra::Point3;

/// Perspective camera
///
/// Uses a standard right-handed Y-up coordinate system:
/// - X+ = Right
/// - Y+ = Up
/// - Z+ = Towards the viewer
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Field of view angle in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a new perspective camera looking at the origin
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Field of view in degrees (stored as radians)
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Generate the world-to-camera view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(
            &Point3::from(self.position),
            &Point3::from(self.target),
            &self.up,
        )
    }

    /// Generate the perspective projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Update the aspect ratio for viewport changes
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::debug!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }
}

impl Default for Camera {
    /// Perspective camera above and behind the origin, looking at it
    fn default() -> Self {
        Self::perspective(Vec3::new(0.0, 2.5, 5.0), 45.0, 16.0 / 9.0, 0.1, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn view_matrix_moves_the_target_onto_the_negative_z_axis() {
        let camera = Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 45.0, 1.0, 0.1, 100.0);
        let view = camera.view_matrix();
        let p = view.transform_point(&Point3::origin());
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.z, -5.0, epsilon = 1e-5);
    }
}
