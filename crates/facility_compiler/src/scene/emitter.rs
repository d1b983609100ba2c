//! Primitive emitter
//!
//! Thin factory layer that places shapes into a scene. Each factory takes the
//! shape-specific sizing, a transform and one material handle, and appends the
//! instance to the scene.
//!
//! # Preconditions
//! Every size must be strictly positive (cylinders also need at least three
//! facets). Violations are caller errors: they are checked with
//! `debug_assert!` only and are not reported at runtime.

use super::{InstanceId, SceneGraph, Shape};
use crate::foundation::math::Transform;
use crate::materials::MaterialHandle;

/// Places transformed primitives into a scene
pub struct PrimitiveEmitter<'a> {
    scene: &'a mut SceneGraph,
}

impl<'a> PrimitiveEmitter<'a> {
    /// Create an emitter appending into `scene`
    pub fn new(scene: &'a mut SceneGraph) -> Self {
        Self { scene }
    }

    /// Emit any shape
    pub fn emit(
        &mut self,
        name: impl Into<String>,
        shape: Shape,
        transform: Transform,
        material: &MaterialHandle,
    ) -> InstanceId {
        debug_assert!(shape.has_positive_dimensions(), "non-positive {shape} dimensions");
        let name = name.into();
        log::trace!("Emit {} '{}' at {:?}", shape, name, transform.location);
        self.scene.push_instance(name, shape, transform, material.clone())
    }

    /// Emit a box of `width × depth × height`
    pub fn emit_box(
        &mut self,
        name: impl Into<String>,
        width: f32,
        depth: f32,
        height: f32,
        transform: Transform,
        material: &MaterialHandle,
    ) -> InstanceId {
        self.emit(name, Shape::Box { width, depth, height }, transform, material)
    }

    /// Emit a plane of `width × depth`
    pub fn emit_plane(
        &mut self,
        name: impl Into<String>,
        width: f32,
        depth: f32,
        transform: Transform,
        material: &MaterialHandle,
    ) -> InstanceId {
        self.emit(name, Shape::Plane { width, depth }, transform, material)
    }

    /// Emit a cylinder
    pub fn emit_cylinder(
        &mut self,
        name: impl Into<String>,
        radius: f32,
        height: f32,
        facets: u32,
        transform: Transform,
        material: &MaterialHandle,
    ) -> InstanceId {
        self.emit(name, Shape::Cylinder { radius, height, facets }, transform, material)
    }

    /// Emit a torus
    pub fn emit_torus(
        &mut self,
        name: impl Into<String>,
        major_radius: f32,
        minor_radius: f32,
        transform: Transform,
        material: &MaterialHandle,
    ) -> InstanceId {
        self.emit(name, Shape::Torus { major_radius, minor_radius }, transform, material)
    }

    /// Emit an icosphere
    pub fn emit_icosphere(
        &mut self,
        name: impl Into<String>,
        radius: f32,
        subdivisions: u32,
        transform: Transform,
        material: &MaterialHandle,
    ) -> InstanceId {
        self.emit(name, Shape::Icosphere { radius, subdivisions }, transform, material)
    }

    /// Emit an icosphere flattened to `vertical_radius` along Z
    pub fn emit_spheroid(
        &mut self,
        name: impl Into<String>,
        radius: f32,
        vertical_radius: f32,
        subdivisions: u32,
        transform: Transform,
        material: &MaterialHandle,
    ) -> InstanceId {
        self.emit(
            name,
            Shape::Spheroid {
                radius,
                vertical_radius,
                subdivisions,
            },
            transform,
            material,
        )
    }
}
