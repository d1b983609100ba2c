//! Sliding double door
//!
//! Two glass panels meet on the door's centreline when closed. Opening slides
//! each panel away from the centreline by its own width plus a clearance, so
//! the open displacement is half the doorway width plus the clearance. A
//! static emissive frame (lintel and two posts) surrounds the opening.

use serde::Serialize;

use super::{require_finite, require_finite_angle, require_positive, MechanismError};
use crate::animation::patterns;
use crate::config::DoorSettings;
use crate::foundation::math::{utils, Transform, Vec3};
use crate::layout::DoorSpec;
use crate::materials::{palette, MaterialRegistry};
use crate::scene::{InstanceId, PrimitiveEmitter, SceneGraph};

/// Door composed of exactly two animated panels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoorMechanism {
    /// Door identifier
    pub name: String,
    /// Panel on the negative side of the sliding axis
    pub left: InstanceId,
    /// Panel on the positive side of the sliding axis
    pub right: InstanceId,
    /// Closed locations (left, right)
    pub closed: [Vec3; 2],
    /// Open locations (left, right)
    pub open: [Vec3; 2],
    /// Closed, open and closed-again times
    pub timing: [f32; 3],
    /// Width of one panel
    pub panel_width: f32,
    /// Slide beyond the panel width
    pub clearance: f32,
    /// Static frame parts
    pub frame: Vec<InstanceId>,
}

impl DoorMechanism {
    /// Emit the door, attach both panel tracks and register it with the scene
    ///
    /// Per-door `clearance` and `timing` override `settings`.
    pub fn build(
        spec: &DoorSpec,
        settings: &DoorSettings,
        scene: &mut SceneGraph,
        registry: &MaterialRegistry,
    ) -> Result<Self, MechanismError> {
        require_finite(&spec.id, &spec.position)?;
        require_finite_angle(&spec.id, "heading_deg", spec.heading_deg)?;
        require_positive(&spec.id, "width", spec.width)?;
        require_positive(&spec.id, "height", spec.height)?;

        let clearance = spec.clearance.unwrap_or(settings.clearance);
        if !clearance.is_finite() || clearance < 0.0 {
            return Err(MechanismError::NonPositiveDimension {
                mechanism: spec.id.clone(),
                what: "clearance",
                value: clearance,
            });
        }
        let timing = spec.timing.unwrap_or(settings.timing);

        let heading = utils::deg_to_rad(spec.heading_deg);
        let lateral = utils::planar_forward(heading);
        let origin = Vec3::from(spec.position);
        let panel_width = spec.width * 0.5;
        let slide = panel_width + clearance;

        let frame_mat = registry.resolve(&palette::door_frame())?;
        let glass = registry.resolve(&palette::door_glass())?;
        let mut emitter = PrimitiveEmitter::new(scene);

        let t = settings.frame_thickness;
        let lintel = emitter.emit_box(
            format!("{}_FrameTop", spec.id),
            spec.width + t,
            t,
            t,
            Transform::from_location_heading(origin + Vec3::new(0.0, 0.0, spec.height + t * 0.5), heading),
            &frame_mat,
        );
        let mut frame = vec![lintel];
        for (suffix, side) in [("L", -1.0_f32), ("R", 1.0)] {
            let post = origin + lateral * (side * spec.width * 0.5) + Vec3::new(0.0, 0.0, spec.height * 0.5);
            frame.push(emitter.emit_box(
                format!("{}_Frame{suffix}", spec.id),
                t,
                t,
                spec.height,
                Transform::from_location_heading(post, heading),
                &frame_mat,
            ));
        }

        let lift = Vec3::new(0.0, 0.0, spec.height * 0.5);
        let closed = [
            origin - lateral * (panel_width * 0.5) + lift,
            origin + lateral * (panel_width * 0.5) + lift,
        ];
        let open = [closed[0] - lateral * slide, closed[1] + lateral * slide];

        let left = emitter.emit_box(
            format!("{}_Left", spec.id),
            panel_width,
            settings.panel_thickness,
            spec.height,
            Transform::from_location_heading(closed[0], heading),
            &glass,
        );
        let right = emitter.emit_box(
            format!("{}_Right", spec.id),
            panel_width,
            settings.panel_thickness,
            spec.height,
            Transform::from_location_heading(closed[1], heading),
            &glass,
        );

        scene.attach_track(patterns::door_slide(left, closed[0], open[0], timing)?)?;
        scene.attach_track(patterns::door_slide(right, closed[1], open[1], timing)?)?;

        let door = Self {
            name: spec.id.clone(),
            left,
            right,
            closed,
            open,
            timing,
            panel_width,
            clearance,
            frame,
        };
        log::debug!(
            "Door '{}': panels {:?}/{:?}, slide {:.3} over frames {:?}",
            door.name,
            left,
            right,
            slide,
            timing
        );
        scene.push_door(door.clone());
        Ok(door)
    }

    /// Distance each panel travels when opening
    pub fn slide_distance(&self) -> f32 {
        self.panel_width + self.clearance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::TrackError;
    use approx::assert_relative_eq;

    fn spec(width: f32) -> DoorSpec {
        DoorSpec {
            id: "door".to_string(),
            position: [0.0, 0.0, 0.0],
            heading_deg: 0.0,
            width,
            height: 5.0,
            clearance: None,
            timing: None,
        }
    }

    #[test]
    fn test_door_poses() {
        let registry = MaterialRegistry::new();
        let mut scene = SceneGraph::new();
        let door = DoorMechanism::build(&spec(6.0), &DoorSettings::default(), &mut scene, &registry).unwrap();

        assert_relative_eq!(door.closed[0].x, -1.5);
        assert_relative_eq!(door.closed[1].x, 1.5);
        assert_relative_eq!(door.open[0].x, -4.55, epsilon = 1e-5);
        assert_relative_eq!(door.open[1].x, 4.55, epsilon = 1e-5);
        assert_relative_eq!(door.slide_distance(), 3.05, epsilon = 1e-6);
        assert_eq!(scene.doors().len(), 1);
        assert_eq!(scene.tracks_for(door.left).count(), 1);
        assert_eq!(scene.tracks_for(door.right).count(), 1);
        assert_eq!(door.frame.len(), 3);
    }

    #[test]
    fn test_heading_rotates_sliding_axis() {
        let registry = MaterialRegistry::new();
        let mut scene = SceneGraph::new();
        let mut rotated = spec(4.0);
        rotated.heading_deg = 90.0;
        let door = DoorMechanism::build(&rotated, &DoorSettings::default(), &mut scene, &registry).unwrap();

        assert_relative_eq!(door.closed[0].x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(door.closed[0].y, -1.0, epsilon = 1e-5);
        assert_relative_eq!(door.open[1].y, 3.05, epsilon = 1e-5);
    }

    #[test]
    fn test_rejects_bad_door() {
        let registry = MaterialRegistry::new();
        let mut scene = SceneGraph::new();
        let result = DoorMechanism::build(&spec(0.0), &DoorSettings::default(), &mut scene, &registry);
        assert!(matches!(result, Err(MechanismError::NonPositiveDimension { what: "width", .. })));

        let mut stuck = spec(6.0);
        stuck.timing = Some([10.0, 5.0, 20.0]);
        let result = DoorMechanism::build(&stuck, &DoorSettings::default(), &mut scene, &registry);
        assert!(matches!(result, Err(MechanismError::Track(TrackError::NonIncreasingTime { .. }))));
    }

    #[test]
    fn test_rejects_non_finite_heading() {
        let registry = MaterialRegistry::new();
        let mut scene = SceneGraph::new();
        let mut spun = spec(6.0);
        spun.heading_deg = f32::NAN;
        let result = DoorMechanism::build(&spun, &DoorSettings::default(), &mut scene, &registry);
        assert!(matches!(result, Err(MechanismError::NonFiniteAngle { what: "heading_deg", .. })));
        assert_eq!(scene.instance_count(), 0);
    }
}
