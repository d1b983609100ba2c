use serde::Serialize;

use crate::foundation::math::{constants::GEOMETRY_EPSILON, utils, Transform, Vec3};

/// Straight placement frame between two ports
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConnectorFrame {
    /// Origin port
    pub start: Vec3,
    /// Destination port
    pub end: Vec3,
    /// Distance between the ports
    pub span: f32,
    /// Centre of the segment
    pub midpoint: Vec3,
    /// Yaw of the segment, radians from +x
    pub heading: f32,
    /// Unit vector from start to end in the ground plane
    pub forward: Vec3,
    /// Unit vector 90° counter-clockwise from `forward`
    pub left: Vec3,
}

impl ConnectorFrame {
    /// Frame of the segment `start → end`
    pub fn between(start: Vec3, end: Vec3) -> Self {
        let delta = end - start;
        let heading = utils::planar_heading(&delta);
        Self {
            start,
            end,
            span: delta.norm(),
            midpoint: (start + end) * 0.5,
            heading,
            forward: utils::planar_forward(heading),
            left: utils::planar_left(heading),
        }
    }

    /// Ports coincide
    pub fn is_degenerate(&self) -> bool {
        self.span <= GEOMETRY_EPSILON
    }

    /// Placement at `lateral` to the left of the centreline and `lift` above it
    pub fn place(&self, lateral: f32, lift: f32) -> Transform {
        self.place_rotated(lateral, lift, 0.0)
    }

    /// Like [`place`](Self::place) with an extra roll about the segment
    pub fn place_rotated(&self, lateral: f32, lift: f32, roll: f32) -> Transform {
        Transform::new(
            self.midpoint + self.left * lateral + Vec3::new(0.0, 0.0, lift),
            Vec3::new(roll, 0.0, self.heading),
        )
    }
}
