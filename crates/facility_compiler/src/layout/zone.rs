//! Zones and port derivation

use serde::Serialize;

use super::Direction;
use crate::foundation::math::Vec3;

/// Axis-aligned footprint of a zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Footprint {
    /// Extent along X
    pub width: f32,
    /// Extent along Y
    pub depth: f32,
    /// Extent along Z
    pub height: f32,
}

/// How a zone's shell is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ZoneStyle {
    /// Rectangular room: floor, ceiling, four walls, corner accents
    #[default]
    Room,
    /// Circular hall with a floor ring, segmented walls and a dome; the
    /// footprint must be square
    Hall,
    /// Open-air plaza; connectors attach but no shell is emitted
    Open,
}

impl ZoneStyle {
    /// Parse the textual style used in layout tables
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "room" => Some(ZoneStyle::Room),
            "hall" => Some(ZoneStyle::Hall),
            "open" => Some(ZoneStyle::Open),
            _ => None,
        }
    }
}

/// A named rectangular facility area
///
/// The anchor is the centre of the footprint at floor level. Footprints are
/// always axis-aligned; rotated zones are not supported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Zone {
    /// Unique identifier
    pub id: String,
    /// Floor-level centre
    pub anchor: Vec3,
    /// Dimensions
    pub footprint: Footprint,
    /// Shell style
    pub style: ZoneStyle,
}

impl Zone {
    /// Point on the zone boundary for a port on `direction`
    ///
    /// Returns the midpoint of the corresponding wall at the zone's own floor
    /// height. The point lies exactly on the wall plane.
    pub fn port(&self, direction: Direction) -> Vec3 {
        let half_w = self.footprint.width * 0.5;
        let half_d = self.footprint.depth * 0.5;
        let a = self.anchor;
        match direction {
            Direction::PosX => Vec3::new(a.x + half_w, a.y, a.z),
            Direction::NegX => Vec3::new(a.x - half_w, a.y, a.z),
            Direction::PosY => Vec3::new(a.x, a.y + half_d, a.z),
            Direction::NegY => Vec3::new(a.x, a.y - half_d, a.z),
        }
    }

    /// Signed distance from `point` to the wall plane on `direction`
    ///
    /// Positive outside the zone, negative inside, zero on the wall.
    pub fn distance_to_wall(&self, direction: Direction, point: &Vec3) -> f32 {
        let normal = direction.outward_normal();
        (point - self.port(direction)).dot(&normal)
    }

    /// Smallest horizontal half extent (radius of a circular hall)
    pub fn inner_radius(&self) -> f32 {
        self.footprint.width.min(self.footprint.depth) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn zone() -> Zone {
        Zone {
            id: "A".to_string(),
            anchor: Vec3::new(4.0, -2.0, 6.0),
            footprint: Footprint { width: 20.0, depth: 10.0, height: 8.0 },
            style: ZoneStyle::Room,
        }
    }

    #[test]
    fn test_ports_on_wall_midpoints() {
        let z = zone();
        assert_relative_eq!(z.port(Direction::PosX), Vec3::new(14.0, -2.0, 6.0));
        assert_relative_eq!(z.port(Direction::NegX), Vec3::new(-6.0, -2.0, 6.0));
        assert_relative_eq!(z.port(Direction::PosY), Vec3::new(4.0, 3.0, 6.0));
        assert_relative_eq!(z.port(Direction::NegY), Vec3::new(4.0, -7.0, 6.0));
    }

    #[test]
    fn test_port_lies_on_wall_plane() {
        let z = zone();
        for direction in Direction::all() {
            assert_relative_eq!(z.distance_to_wall(*direction, &z.port(*direction)), 0.0);
        }
    }

    #[test]
    fn test_wall_distance_sign() {
        let z = zone();
        assert!(z.distance_to_wall(Direction::PosY, &z.anchor) < 0.0);
        assert!(z.distance_to_wall(Direction::PosY, &Vec3::new(4.0, 10.0, 6.0)) > 0.0);
    }

    #[test]
    fn test_style_parse() {
        assert_eq!(ZoneStyle::parse("hall"), Some(ZoneStyle::Hall));
        assert_eq!(ZoneStyle::parse("open"), Some(ZoneStyle::Open));
        assert_eq!(ZoneStyle::parse("dome"), None);
    }
}
