//! Portal rings
//!
//! Two concentric tori stood upright across a passage. The rings counter-rotate
//! and both pulse their emission.

use serde::Serialize;

use super::{require_finite, require_finite_angle, require_positive, MechanismError};
use crate::animation::patterns;
use crate::config::{PortalSettings, PulseSettings};
use crate::foundation::math::{constants::HALF_PI, utils, Transform, Vec3};
use crate::layout::PortalSpec;
use crate::materials::{palette, MaterialRegistry};
use crate::scene::{InstanceId, PrimitiveEmitter, SceneGraph};

/// Tube radius of the outer ring
pub const OUTER_TUBE: f32 = 0.16;
/// Tube radius of the inner ring
pub const INNER_TUBE: f32 = 0.12;

const OUTER_GLOW: f32 = 20.0;
const INNER_GLOW: f32 = 15.0;

/// Instances owned by one portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PortalRings {
    /// Outer ring, turning counter-clockwise
    pub outer: InstanceId,
    /// Inner ring, turning clockwise
    pub inner: InstanceId,
}

impl PortalRings {
    /// Emit both rings with their rotation and pulse tracks
    pub fn build(
        spec: &PortalSpec,
        rotation: &PortalSettings,
        pulse: &PulseSettings,
        scene: &mut SceneGraph,
        registry: &MaterialRegistry,
    ) -> Result<Self, MechanismError> {
        require_finite(&spec.id, &spec.position)?;
        require_finite_angle(&spec.id, "heading_deg", spec.heading_deg)?;
        require_positive(&spec.id, "outer_radius", spec.outer_radius)?;
        require_positive(&spec.id, "inner_radius", spec.inner_radius)?;

        let base = Vec3::new(HALF_PI, 0.0, utils::deg_to_rad(spec.heading_deg));
        let at = Transform::new(Vec3::from(spec.position), base);

        let outer_mat = registry.resolve(&palette::neon(palette::PURPLE, OUTER_GLOW))?;
        let inner_mat = registry.resolve(&palette::neon(palette::CYAN, INNER_GLOW))?;

        let mut emitter = PrimitiveEmitter::new(scene);
        let outer = emitter.emit_torus(format!("{}_Outer", spec.id), spec.outer_radius, OUTER_TUBE, at, &outer_mat);
        let inner = emitter.emit_torus(format!("{}_Inner", spec.id), spec.inner_radius, INNER_TUBE, at, &inner_mat);

        for (index, ring) in [outer, inner].into_iter().enumerate() {
            scene.attach_track(patterns::rotation_loop(ring, base, index, rotation.start, rotation.end)?)?;
            scene.attach_track(patterns::emission_pulse(ring, pulse.low, pulse.high, pulse.start, pulse.end)?)?;
        }

        log::debug!("Portal '{}' at {:?}", spec.id, spec.position);
        Ok(Self { outer, inner })
    }
}
