//! # Camera collaborator
//!
//! The scene only needs the camera's pose and raw velocity: nodes that follow
//! the view read the pose, and banking behaviors read the velocity. The
//! view-projection matrix is forwarded untouched to the renderer.
//!
//! ## Coordinate System
//! Right-handed, Y-up. A camera with identity orientation looks down `-Z`.

use crate::foundation::math::{utils, Mat4, Quat, Vec3};
use nalgebra::{Isometry3, Perspective3, Translation3};

/// Read-only camera interface consumed by the scene
pub trait Camera {
    /// World-space position
    fn position(&self) -> Vec3;

    /// World-space orientation
    fn orientation(&self) -> Quat;

    /// Raw movement velocity in world units per frame
    fn velocity(&self) -> Vec3;

    /// Combined view-projection matrix for the renderer
    fn view_projection(&self) -> Mat4;
}

/// Free-flying perspective camera driven by an external controller.
///
/// Holds its own velocity so that callers can integrate movement with
/// [`FollowCamera::advance`] and the scene can read the same vector for banking.
#[derive(Debug, Clone)]
pub struct FollowCamera {
    /// Camera position in world space
    pub position: Vec3,

    /// Camera orientation in world space
    pub orientation: Quat,

    /// Current movement velocity
    pub velocity: Vec3,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            orientation: Quat::identity(),
            velocity: Vec3::zeros(),
            fov: utils::deg_to_rad(45.0),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl FollowCamera {
    /// Perspective camera at `position`
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect` - Width over height of the viewport
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32) -> Self {
        Self {
            position,
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            ..Self::default()
        }
    }

    /// Builder: set the orientation
    #[must_use]
    pub const fn with_orientation(mut self, orientation: Quat) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the velocity used for the next [`FollowCamera::advance`]
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Integrate velocity over `delta_time` seconds
    pub fn advance(&mut self, delta_time: f32) {
        self.position += self.velocity * delta_time;
    }

    /// World-to-view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Isometry3::from_parts(Translation3::from(self.position), self.orientation)
            .inverse()
            .to_homogeneous()
    }

    /// View-to-clip matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Perspective3::new(self.aspect, self.fov, self.near, self.far).to_homogeneous()
    }
}

impl Camera for FollowCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn orientation(&self) -> Quat {
        self.orientation
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
