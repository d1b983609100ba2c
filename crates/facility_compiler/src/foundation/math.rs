//! Math utilities and types
//!
//! Provides the vector aliases and the placement transform used by every
//! emitted primitive.

use serde::Serialize;

pub use nalgebra::{Vector3, Matrix4, Rotation3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Placement of a primitive: location plus XYZ Euler rotation in radians
///
/// Rotation is kept in Euler space rather than as a quaternion so that
/// animation tracks can express whole turns (`z + 2π` is a distinct key).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    /// World space location
    pub location: Vec3,

    /// Euler rotation (X, then Y, then Z), radians
    pub rotation: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            location: Vec3::zeros(),
            rotation: Vec3::zeros(),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only a location
    pub fn from_location(location: Vec3) -> Self {
        Self {
            location,
            ..Default::default()
        }
    }

    /// Create a transform from a location and Euler rotation
    pub fn new(location: Vec3, rotation: Vec3) -> Self {
        Self { location, rotation }
    }

    /// Create a transform yawed about Z by `heading` radians
    pub fn from_location_heading(location: Vec3, heading: f32) -> Self {
        Self {
            location,
            rotation: Vec3::new(0.0, 0.0, heading),
        }
    }

    /// Rotation matrix for the Euler angles (R = Rz * Ry * Rx)
    pub fn rotation_matrix(&self) -> Rotation3<f32> {
        Rotation3::from_euler_angles(self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.location) * self.rotation_matrix().to_homogeneous()
    }

    /// Map a point from primitive-local space into world space
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.location + self.rotation_matrix() * local
    }

    /// Map a direction from primitive-local space into world space
    pub fn transform_vector(&self, local: Vec3) -> Vec3 {
        self.rotation_matrix() * local
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Tolerance used for geometric coincidence checks
    pub const GEOMETRY_EPSILON: f32 = 1e-4;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Component-wise linear interpolation
    pub fn lerp_vec3(a: &Vec3, b: &Vec3, t: f32) -> Vec3 {
        a + (b - a) * t
    }

    /// Heading of a vector in the XY plane (atan2 of y over x)
    pub fn planar_heading(v: &Vec3) -> f32 {
        v.y.atan2(v.x)
    }

    /// Unit vector perpendicular to `heading`, pointing to its left in XY
    pub fn planar_left(heading: f32) -> Vec3 {
        Vec3::new(-heading.sin(), heading.cos(), 0.0)
    }

    /// Unit vector along `heading` in XY
    pub fn planar_forward(heading: f32) -> Vec3 {
        Vec3::new(heading.cos(), heading.sin(), 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_transform_identity() {
        let transform = Transform::identity();
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_relative_eq!(transform.transform_point(p), p, epsilon = EPSILON);
    }

    #[test]
    fn test_heading_rotates_local_x() {
        let transform = Transform::from_location_heading(Vec3::new(1.0, 1.0, 0.0), constants::HALF_PI);
        let end = transform.transform_point(Vec3::new(2.0, 0.0, 0.0));
        assert_relative_eq!(end, Vec3::new(1.0, 3.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_matrix_matches_transform_point() {
        let transform = Transform::new(Vec3::new(0.5, -2.0, 4.0), Vec3::new(0.3, -0.2, 1.1));
        let local = Vec3::new(1.0, -1.0, 0.5);
        let via_matrix = transform.to_matrix().transform_point(&Point3::from(local));
        assert_relative_eq!(via_matrix.coords, transform.transform_point(local), epsilon = EPSILON);
    }

    #[test]
    fn test_planar_axes_are_orthogonal() {
        for heading in [0.0_f32, 0.7, -1.9, 2.5] {
            let forward = utils::planar_forward(heading);
            let left = utils::planar_left(heading);
            assert_relative_eq!(forward.dot(&left), 0.0, epsilon = EPSILON);
            assert_relative_eq!(forward.cross(&left), Vec3::z(), epsilon = EPSILON);
            assert_relative_eq!(utils::planar_heading(&forward), heading, epsilon = EPSILON);
        }
    }
}
