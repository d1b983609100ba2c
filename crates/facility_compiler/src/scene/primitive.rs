//! Primitive shapes and placed instances

use serde::Serialize;

use crate::foundation::math::{Transform, Vec3};
use crate::materials::MaterialHandle;

/// Identifier of an instance within its scene (insertion index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct InstanceId(pub u32);

/// Enumeration of supported primitive shapes
///
/// All sizes are full extents in the primitive's local frame: X is width,
/// Y is depth, Z is height. Planes face +Z. Cylinders run along Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Shape {
    /// Rectangular box
    Box {
        /// Extent along local X
        width: f32,
        /// Extent along local Y
        depth: f32,
        /// Extent along local Z
        height: f32,
    },
    /// Single-sided rectangle in the local XY plane
    Plane {
        /// Extent along local X
        width: f32,
        /// Extent along local Y
        depth: f32,
    },
    /// Faceted cylinder
    Cylinder {
        /// Radius
        radius: f32,
        /// Extent along local Z
        height: f32,
        /// Number of side facets
        facets: u32,
    },
    /// Torus around local Z
    Torus {
        /// Ring radius
        major_radius: f32,
        /// Tube radius
        minor_radius: f32,
    },
    /// Subdivided icosahedron
    Icosphere {
        /// Radius
        radius: f32,
        /// Subdivision level
        subdivisions: u32,
    },
    /// Icosphere squashed along local Z
    Spheroid {
        /// Horizontal radius
        radius: f32,
        /// Half extent along local Z
        vertical_radius: f32,
        /// Subdivision level
        subdivisions: u32,
    },
}

impl Shape {
    /// Human-readable name for this shape
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Box { .. } => "Box",
            Shape::Plane { .. } => "Plane",
            Shape::Cylinder { .. } => "Cylinder",
            Shape::Torus { .. } => "Torus",
            Shape::Icosphere { .. } => "Icosphere",
            Shape::Spheroid { .. } => "Spheroid",
        }
    }

    /// Half extents of the local bounding box
    pub fn half_extents(&self) -> Vec3 {
        match *self {
            Shape::Box { width, depth, height } => Vec3::new(width, depth, height) * 0.5,
            Shape::Plane { width, depth } => Vec3::new(width * 0.5, depth * 0.5, 0.0),
            Shape::Cylinder { radius, height, .. } => Vec3::new(radius, radius, height * 0.5),
            Shape::Torus { major_radius, minor_radius } => {
                let r = major_radius + minor_radius;
                Vec3::new(r, r, minor_radius)
            }
            Shape::Icosphere { radius, .. } => Vec3::new(radius, radius, radius),
            Shape::Spheroid { radius, vertical_radius, .. } => Vec3::new(radius, radius, vertical_radius),
        }
    }

    /// Whether every size of the shape is strictly positive
    pub fn has_positive_dimensions(&self) -> bool {
        let sizes: &[f32] = match self {
            Shape::Box { width, depth, height } => &[*width, *depth, *height],
            Shape::Plane { width, depth } => &[*width, *depth],
            Shape::Cylinder { radius, height, facets } => {
                return *radius > 0.0 && *height > 0.0 && *facets >= 3;
            }
            Shape::Torus { major_radius, minor_radius } => &[*major_radius, *minor_radius],
            Shape::Icosphere { radius, .. } => &[*radius],
            Shape::Spheroid { radius, vertical_radius, .. } => &[*radius, *vertical_radius],
        };
        sizes.iter().all(|s| *s > 0.0)
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A placed primitive with exactly one material
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimitiveInstance {
    /// Identifier within the owning scene
    pub id: InstanceId,
    /// Object name
    pub name: String,
    /// Geometry
    pub shape: Shape,
    /// Placement
    pub transform: Transform,
    /// Shading handle
    pub material: MaterialHandle,
}

impl PrimitiveInstance {
    /// Map a local-space point of this instance to world space
    pub fn world_point(&self, local: Vec3) -> Vec3 {
        self.transform.transform_point(local)
    }
}
