//! Math utilities and types
//!
//! nalgebra aliases plus the local [`Transform`] every scene node carries.

pub use nalgebra::{Matrix4, Quaternion, Unit, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Local transform of a scene node: position, orientation, and scale.
///
/// Hierarchy composition uses [`Transform::rigid_matrix`] (translation and
/// orientation only); scale is applied to the node's own geometry through
/// [`Transform::scale_matrix`] and never propagates to children.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position relative to the parent
    pub position: Vec3,

    /// Orientation relative to the parent
    pub rotation: Quat,

    /// Per-axis scale of the node's own geometry
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder: replace the rotation
    #[must_use]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder: replace the scale
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder: uniform scale
    #[must_use]
    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vec3::new(scale, scale, scale))
    }

    /// Post-multiply the orientation by `rotation` (rotate about local axes).
    pub fn rotate_local(&mut self, rotation: Quat) {
        self.rotation *= rotation;
    }

    /// `translate(position) · rotate(rotation)`, the matrix children inherit.
    pub fn rigid_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position) * self.rotation.to_homogeneous()
    }

    /// Geometry-only scale matrix.
    pub fn scale_matrix(&self) -> Mat4 {
        Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Full `T · R · S` matrix for a node without children.
    pub fn to_matrix(&self) -> Mat4 {
        self.rigid_matrix() * self.scale_matrix()
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Quat, Vec2, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Rotation of `angle` radians about the world X axis
    pub fn rotation_x(angle: f32) -> Quat {
        Quat::from_axis_angle(&Vec3::x_axis(), angle)
    }

    /// Rotation of `angle` radians about the world Y axis
    pub fn rotation_y(angle: f32) -> Quat {
        Quat::from_axis_angle(&Vec3::y_axis(), angle)
    }

    /// Rotation of `angle` radians about the world Z axis
    pub fn rotation_z(angle: f32) -> Quat {
        Quat::from_axis_angle(&Vec3::z_axis(), angle)
    }

    /// Signed angle in radians from `from` to `to`, counter-clockwise positive.
    ///
    /// Returns `None` when either vector has no direction.
    pub fn oriented_angle(from: Vec2, to: Vec2) -> Option<f32> {
        let from = from.try_normalize(f32::EPSILON)?;
        let to = to.try_normalize(f32::EPSILON)?;
        let cross = from.x.mul_add(to.y, -(from.y * to.x));
        Some(cross.atan2(from.dot(&to)))
    }
}
