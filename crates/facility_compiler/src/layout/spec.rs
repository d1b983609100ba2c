//! Declarative layout tables
//!
//! These are the serde-facing input types. Identifiers, directions, kinds and
//! styles stay textual here; they are resolved (and rejected) when the
//! `LayoutGraph` is built.

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// One zone row: identifier, anchor point, footprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSpec {
    /// Unique zone identifier
    pub id: String,
    /// Floor-level centre (x, y, z)
    pub anchor: [f32; 3],
    /// Footprint (width, depth, height)
    pub footprint: [f32; 3],
    /// Shell style: `room` (default), `hall` or `open`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl ZoneSpec {
    /// Rectangular room row
    pub fn room(id: impl Into<String>, anchor: [f32; 3], footprint: [f32; 3]) -> Self {
        Self {
            id: id.into(),
            anchor,
            footprint,
            style: None,
        }
    }

    /// Row with an explicit shell style
    pub fn styled(id: impl Into<String>, anchor: [f32; 3], footprint: [f32; 3], style: &str) -> Self {
        Self {
            style: Some(style.to_string()),
            ..Self::room(id, anchor, footprint)
        }
    }
}

/// One edge row connecting two zone ports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    /// Unique edge identifier
    pub id: String,
    /// Origin zone identifier
    pub from: String,
    /// Origin port direction (`+x`, `-x`, `+y`, `-y`)
    pub from_direction: String,
    /// Destination zone identifier
    pub to: String,
    /// Destination port direction
    pub to_direction: String,
    /// `sealed-corridor` or `open-bridge`
    pub kind: String,
    /// Walkable width
    pub width: f32,
    /// Interior height, required for sealed corridors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

impl EdgeSpec {
    /// Sealed corridor row
    pub fn corridor(
        id: impl Into<String>,
        from: (&str, &str),
        to: (&str, &str),
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            id: id.into(),
            from: from.0.to_string(),
            from_direction: from.1.to_string(),
            to: to.0.to_string(),
            to_direction: to.1.to_string(),
            kind: "sealed-corridor".to_string(),
            width,
            height: Some(height),
        }
    }

    /// Open bridge row
    pub fn bridge(id: impl Into<String>, from: (&str, &str), to: (&str, &str), width: f32) -> Self {
        Self {
            kind: "open-bridge".to_string(),
            height: None,
            ..Self::corridor(id, from, to, width, 0.0)
        }
    }
}

/// Sliding double door placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorSpec {
    /// Identifier used to name the emitted parts
    pub id: String,
    /// Centre of the doorway at floor level
    pub position: [f32; 3],
    /// Heading of the panels' sliding axis, degrees (0 = along +x)
    #[serde(default)]
    pub heading_deg: f32,
    /// Full doorway width; each panel is half of it
    pub width: f32,
    /// Doorway height
    pub height: f32,
    /// Extra slide beyond the panel width (defaults to the settings value)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clearance: Option<f32>,
    /// Closed, open and closed-again times (defaults to the settings value)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<[f32; 3]>,
}

/// Pair of counter-rotating rings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalSpec {
    /// Identifier used to name the emitted rings
    pub id: String,
    /// Ring centre
    pub position: [f32; 3],
    /// Heading of the ring plane's normal, degrees
    #[serde(default)]
    pub heading_deg: f32,
    /// Outer ring major radius
    #[serde(default = "default_outer_ring")]
    pub outer_radius: f32,
    /// Inner ring major radius
    #[serde(default = "default_inner_ring")]
    pub inner_radius: f32,
}

fn default_outer_ring() -> f32 {
    2.8
}

fn default_inner_ring() -> f32 {
    2.3
}

/// Spiral staircase around a glowing core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StairSpec {
    /// Identifier used to name the steps
    pub id: String,
    /// Base centre of the spiral
    pub center: [f32; 3],
    /// Total rise
    pub height: f32,
    /// Distance from the core to each step centre
    pub radius: f32,
    /// Number of steps
    pub steps: u32,
    /// Number of full turns over the rise
    pub turns: f32,
}

/// Ground plane under the whole site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundSpec {
    /// Plane centre
    pub center: [f32; 3],
    /// Edge length of the square plane
    pub size: f32,
}

/// Rows of trees flanking a strip of the site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestSpec {
    /// Y where every row starts (rows run towards -y)
    pub start_y: f32,
    /// Y where every row stops
    pub end_y: f32,
    /// X of the strip centreline
    #[serde(default)]
    pub center_x: f32,
    /// Ground height of the trees
    #[serde(default)]
    pub base_z: f32,
    /// Rows on each side of the strip
    pub rows: u32,
    /// Nominal spacing between trees along a row
    pub spacing: f32,
    /// Distance from the centreline to the first row
    pub inner_offset: f32,
    /// Distance between consecutive rows
    pub row_gap: f32,
    /// Override for the LOD switch distances
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub switch_distances: Option<Vec<f32>>,
}

/// Complete declarative facility description
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutSpec {
    /// Zone table
    #[serde(default)]
    pub zones: Vec<ZoneSpec>,
    /// Edge table
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
    /// Door mechanisms
    #[serde(default)]
    pub doors: Vec<DoorSpec>,
    /// Decorative portals
    #[serde(default)]
    pub portals: Vec<PortalSpec>,
    /// Spiral staircases
    #[serde(default)]
    pub stairs: Vec<StairSpec>,
    /// Optional ground plane
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground: Option<GroundSpec>,
    /// Optional forest scatter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forest: Option<ForestSpec>,
}

impl LayoutSpec {
    /// The built-in research laboratory
    ///
    /// An outdoor plaza leads over a walkway (with an automatic door) into a
    /// circular entrance hall; a spiral staircase climbs to an upper level of
    /// seven rooms chained by alternating sealed corridors and open bridges.
    pub fn research_lab() -> Self {
        let upper = 6.0;
        let room = [34.0, 20.0, 9.0];

        let zones = vec![
            ZoneSpec::styled("outdoor", [0.0, 0.0, 0.0], [20.0, 20.0, 4.0], "open"),
            ZoneSpec::styled("entrance_hall", [0.0, -38.0, 0.0], [30.0, 30.0, 12.0], "hall"),
            ZoneSpec::room("motivation_room", [0.0, -65.0, upper], room),
            ZoneSpec::room("theory_room", [0.0, -92.0, upper], room),
            ZoneSpec::room("programming_room", [0.0, -119.0, upper], room),
            ZoneSpec::room("formula_room", [0.0, -146.0, upper], room),
            ZoneSpec::room("simulation_center", [0.0, -190.0, upper], [68.0, 52.0, 12.0]),
            ZoneSpec::room("conclusion_room", [0.0, -235.0, upper], room),
            ZoneSpec::room("future_room", [0.0, -262.0, upper], room),
        ];

        let edges = vec![
            EdgeSpec::bridge("walkway", ("outdoor", "-y"), ("entrance_hall", "+y"), 10.0),
            EdgeSpec::corridor("motivation_theory", ("motivation_room", "-y"), ("theory_room", "+y"), 8.0, 5.0),
            EdgeSpec::bridge("bridge_theory_programming", ("theory_room", "-y"), ("programming_room", "+y"), 5.0),
            EdgeSpec::corridor("programming_formula", ("programming_room", "-y"), ("formula_room", "+y"), 8.0, 5.0),
            EdgeSpec::bridge("bridge_formula_simulation", ("formula_room", "-y"), ("simulation_center", "+y"), 5.0),
            EdgeSpec::corridor("simulation_conclusion", ("simulation_center", "-y"), ("conclusion_room", "+y"), 8.0, 5.0),
            EdgeSpec::bridge("bridge_conclusion_future", ("conclusion_room", "-y"), ("future_room", "+y"), 5.0),
        ];

        let doors = vec![DoorSpec {
            id: "auto_door".to_string(),
            position: [0.0, -20.0, 0.0],
            heading_deg: 0.0,
            width: 8.0,
            height: 5.0,
            clearance: None,
            timing: None,
        }];

        let portal = |id: &str, y: f32, z: f32| PortalSpec {
            id: id.to_string(),
            position: [0.0, y, z],
            heading_deg: 0.0,
            outer_radius: default_outer_ring(),
            inner_radius: default_inner_ring(),
        };
        let portals = vec![
            portal("portal_motivation", -71.0, upper + 3.5),
            portal("portal_programming", -125.0, upper + 3.5),
            portal("portal_simulation", -210.0, upper + 4.5),
        ];

        let stairs = vec![StairSpec {
            id: "hall_stairs".to_string(),
            center: [0.0, -38.0, 0.0],
            height: upper,
            radius: 4.2,
            steps: 34,
            turns: 1.6,
        }];

        Self {
            zones,
            edges,
            doors,
            portals,
            stairs,
            ground: Some(GroundSpec {
                center: [0.0, -140.0, -0.1],
                size: 900.0,
            }),
            forest: Some(ForestSpec {
                start_y: 8.0,
                end_y: -43.0,
                center_x: 0.0,
                base_z: 0.0,
                rows: 3,
                spacing: 7.0,
                inner_offset: 13.0,
                row_gap: 5.0,
                switch_distances: None,
            }),
        }
    }
}

impl Config for LayoutSpec {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_research_lab_shape() {
        let lab = LayoutSpec::research_lab();
        assert_eq!(lab.zones.len(), 9);
        assert_eq!(lab.edges.len(), 7);
        assert_eq!(lab.portals.len(), 3);
        assert!(lab.edges.iter().all(|e| e.kind == "sealed-corridor" || e.kind == "open-bridge"));
    }

    #[test]
    fn test_ron_roundtrip_through_file() {
        let lab = LayoutSpec::research_lab();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lab.ron");
        let path = path.to_str().unwrap();

        lab.save_to_file(path).unwrap();
        let loaded = LayoutSpec::load_from_file(path).unwrap();
        assert_eq!(loaded, lab);
    }

    #[test]
    fn test_toml_table_loads() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[[zones]]
id = "A"
anchor = [0.0, 0.0, 0.0]
footprint = [20.0, 20.0, 8.0]

[[zones]]
id = "B"
anchor = [0.0, -40.0, 0.0]
footprint = [20.0, 20.0, 8.0]

[[edges]]
id = "a_b"
from = "A"
from_direction = "-y"
to = "B"
to_direction = "+y"
kind = "sealed-corridor"
width = 8.0
height = 5.0
"#
        )
        .unwrap();

        let layout = LayoutSpec::load_from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(layout.zones.len(), 2);
        assert_eq!(layout.edges[0].height, Some(5.0));
        assert!(layout.doors.is_empty());
        assert!(layout.forest.is_none());
    }
}
