//! Spiral staircase
//!
//! Steps are boxes placed on a helix around a glowing core column. Step `i`
//! sits at angle `i · turns · 2π / steps` and height `0.2 + i · height / steps`
//! above the base.

use serde::Serialize;

use super::{require_finite, require_positive, MechanismError};
use crate::foundation::math::{constants::TAU, Transform, Vec3};
use crate::layout::StairSpec;
use crate::materials::{palette, MaterialRegistry};
use crate::scene::{InstanceId, PrimitiveEmitter, SceneGraph};

/// Step tread size (tangential, radial, thickness)
pub const STEP_SIZE: [f32; 3] = [2.6, 0.9, 0.16];
/// Height of the first step above the base
pub const FIRST_STEP_LIFT: f32 = 0.2;
/// Core column radius
pub const CORE_RADIUS: f32 = 0.36;
/// How far the core rises past the top step
pub const CORE_OVERSHOOT: f32 = 1.2;

/// Instances owned by one staircase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpiralStairs {
    /// Steps from bottom to top
    pub steps: Vec<InstanceId>,
    /// Central column
    pub core: InstanceId,
}

impl SpiralStairs {
    /// Emit every step and the core column
    pub fn build(
        spec: &StairSpec,
        scene: &mut SceneGraph,
        registry: &MaterialRegistry,
    ) -> Result<Self, MechanismError> {
        require_finite(&spec.id, &spec.center)?;
        require_positive(&spec.id, "height", spec.height)?;
        require_positive(&spec.id, "radius", spec.radius)?;
        require_positive(&spec.id, "turns", spec.turns)?;
        if spec.steps == 0 {
            return Err(MechanismError::NonPositiveDimension {
                mechanism: spec.id.clone(),
                what: "steps",
                value: 0.0,
            });
        }

        let step_mat = registry.resolve(&palette::stair_step())?;
        let core_mat = registry.resolve(&palette::neon(palette::PURPLE, 10.0))?;

        let center = Vec3::from(spec.center);
        let count = spec.steps as f32;
        let rise = spec.height / count;
        let sweep = TAU * spec.turns / count;
        let [tread, run, thickness] = STEP_SIZE;

        let mut emitter = PrimitiveEmitter::new(scene);
        let steps = (0..spec.steps)
            .map(|i| {
                let angle = i as f32 * sweep;
                let location = center
                    + Vec3::new(
                        spec.radius * angle.cos(),
                        spec.radius * angle.sin(),
                        FIRST_STEP_LIFT + i as f32 * rise,
                    );
                emitter.emit_box(
                    format!("{}_Step_{i}", spec.id),
                    tread,
                    run,
                    thickness,
                    Transform::from_location_heading(location, angle),
                    &step_mat,
                )
            })
            .collect();

        let core_height = spec.height + CORE_OVERSHOOT;
        let core = emitter.emit_cylinder(
            format!("{}_Core", spec.id),
            CORE_RADIUS,
            core_height,
            24,
            Transform::from_location(center + Vec3::new(0.0, 0.0, core_height * 0.5)),
            &core_mat,
        );

        log::debug!("Stairs '{}': {} steps, {:.1} turns", spec.id, spec.steps, spec.turns);
        Ok(Self { steps, core })
    }
}
