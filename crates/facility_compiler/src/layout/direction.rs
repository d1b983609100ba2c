//! Cardinal port directions

use std::str::FromStr;

use serde::Serialize;

use crate::foundation::math::Vec3;

/// Side of a zone on which a port sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    /// `+x` wall
    PosX,
    /// `-x` wall
    NegX,
    /// `+y` wall
    PosY,
    /// `-y` wall
    NegY,
}

impl Direction {
    /// Get all directions
    pub fn all() -> &'static [Direction] {
        &[Direction::PosX, Direction::NegX, Direction::PosY, Direction::NegY]
    }

    /// Textual form used in layout tables
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::PosX => "+x",
            Direction::NegX => "-x",
            Direction::PosY => "+y",
            Direction::NegY => "-y",
        }
    }

    /// Unit normal pointing out of the zone through this wall
    pub fn outward_normal(&self) -> Vec3 {
        match self {
            Direction::PosX => Vec3::new(1.0, 0.0, 0.0),
            Direction::NegX => Vec3::new(-1.0, 0.0, 0.0),
            Direction::PosY => Vec3::new(0.0, 1.0, 0.0),
            Direction::NegY => Vec3::new(0.0, -1.0, 0.0),
        }
    }

    /// Heading of the outward normal in radians
    pub fn heading(&self) -> f32 {
        use crate::foundation::math::constants::{HALF_PI, PI};
        match self {
            Direction::PosX => 0.0,
            Direction::PosY => HALF_PI,
            Direction::NegX => PI,
            Direction::NegY => -HALF_PI,
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+x" => Ok(Direction::PosX),
            "-x" => Ok(Direction::NegX),
            "+y" => Ok(Direction::PosY),
            "-y" => Ok(Direction::NegY),
            other => Err(other.to_string()),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
