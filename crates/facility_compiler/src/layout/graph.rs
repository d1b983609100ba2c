//! Layout graph construction and lookup

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use thiserror::Error;

use super::{Direction, Footprint, LayoutSpec, Zone, ZoneStyle};
use crate::foundation::math::{constants::GEOMETRY_EPSILON, Vec3};

/// Configuration errors detected while building the layout graph
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Two zones share an identifier
    #[error("zone '{0}' is declared more than once")]
    DuplicateZone(String),

    /// Two edges share an identifier
    #[error("edge '{0}' is declared more than once")]
    DuplicateEdge(String),

    /// An identifier that was never declared
    #[error("unresolvable zone identifier '{zone}' referenced by {referrer}")]
    UnknownZone {
        /// Missing zone identifier
        zone: String,
        /// What referenced it
        referrer: String,
    },

    /// A direction outside `{+x, -x, +y, -y}`
    #[error("invalid direction '{direction}' on {referrer}; expected one of +x, -x, +y, -y")]
    InvalidDirection {
        /// Offending text
        direction: String,
        /// What declared it
        referrer: String,
    },

    /// Unknown edge kind
    #[error("invalid edge kind '{kind}' on edge '{edge}'; expected sealed-corridor or open-bridge")]
    InvalidEdgeKind {
        /// Offending text
        kind: String,
        /// Edge identifier
        edge: String,
    },

    /// Unknown zone style
    #[error("invalid style '{style}' on zone '{zone}'; expected room, hall or open")]
    InvalidZoneStyle {
        /// Offending text
        style: String,
        /// Zone identifier
        zone: String,
    },

    /// A sealed corridor without a height
    #[error("sealed corridor '{0}' has no height")]
    MissingCorridorHeight(String),

    /// A size that must be positive is not
    #[error("{what} on {referrer} must be positive, got {value}")]
    NonPositiveDimension {
        /// Which dimension
        what: &'static str,
        /// What declared it
        referrer: String,
        /// Offending value
        value: f32,
    },

    /// A coordinate that is NaN or infinite
    #[error("non-finite coordinate on {0}")]
    NonFiniteCoordinate(String),

    /// A hall whose footprint is not square; its round floor would miss ports
    #[error("hall '{zone}' needs a square footprint, got {width} x {depth}")]
    NonSquareHall {
        /// Zone identifier
        zone: String,
        /// Extent along X
        width: f32,
        /// Extent along Y
        depth: f32,
    },
}

/// Connector construction style
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum EdgeKind {
    /// Floor, ceiling and side walls
    SealedCorridor {
        /// Interior height
        height: f32,
    },
    /// Deck and edge strips only
    OpenBridge,
}

impl EdgeKind {
    fn parse(kind: &str, height: Option<f32>, edge: &str) -> Result<Self, LayoutError> {
        match kind.trim() {
            "sealed-corridor" | "sealed_corridor" | "corridor" => {
                let height = height.ok_or_else(|| LayoutError::MissingCorridorHeight(edge.to_string()))?;
                positive("corridor height", edge, height)?;
                Ok(EdgeKind::SealedCorridor { height })
            }
            "open-bridge" | "open_bridge" | "bridge" => Ok(EdgeKind::OpenBridge),
            other => Err(LayoutError::InvalidEdgeKind {
                kind: other.to_string(),
                edge: edge.to_string(),
            }),
        }
    }

    /// Whether this is a sealed corridor
    pub fn is_sealed(&self) -> bool {
        matches!(self, EdgeKind::SealedCorridor { .. })
    }
}

/// One endpoint of an edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortRef {
    /// Index of the zone in the graph
    pub zone: usize,
    /// Wall the port sits on
    pub direction: Direction,
    /// Derived port point
    pub point: Vec3,
}

/// A connection between two zone ports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    /// Unique identifier
    pub id: String,
    /// Origin port
    pub from: PortRef,
    /// Destination port
    pub to: PortRef,
    /// Construction style
    pub kind: EdgeKind,
    /// Walkable width
    pub width: f32,
}

/// Immutable facility topology
#[derive(Debug, Clone, Serialize)]
pub struct LayoutGraph {
    zones: Vec<Zone>,
    edges: Vec<Edge>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl LayoutGraph {
    /// Build the graph from a flat layout table
    ///
    /// Zones are declared first; every edge must then reference declared zones
    /// by identifier. Any configuration error aborts construction.
    pub fn from_spec(spec: &LayoutSpec) -> Result<Self, LayoutError> {
        let mut zones = Vec::with_capacity(spec.zones.len());
        let mut index = HashMap::with_capacity(spec.zones.len());

        for row in &spec.zones {
            let referrer = format!("zone '{}'", row.id);
            if index.contains_key(&row.id) {
                return Err(LayoutError::DuplicateZone(row.id.clone()));
            }
            finite(&row.anchor, &referrer)?;
            let [width, depth, height] = row.footprint;
            positive("footprint width", &referrer, width)?;
            positive("footprint depth", &referrer, depth)?;
            positive("footprint height", &referrer, height)?;

            let style = match &row.style {
                None => ZoneStyle::default(),
                Some(text) => ZoneStyle::parse(text).ok_or_else(|| LayoutError::InvalidZoneStyle {
                    style: text.clone(),
                    zone: row.id.clone(),
                })?,
            };
            if style == ZoneStyle::Hall && (width - depth).abs() > GEOMETRY_EPSILON {
                return Err(LayoutError::NonSquareHall {
                    zone: row.id.clone(),
                    width,
                    depth,
                });
            }

            index.insert(row.id.clone(), zones.len());
            zones.push(Zone {
                id: row.id.clone(),
                anchor: Vec3::from(row.anchor),
                footprint: Footprint { width, depth, height },
                style,
            });
        }

        let mut graph = Self {
            zones,
            edges: Vec::with_capacity(spec.edges.len()),
            index,
        };

        let mut edge_ids = HashSet::with_capacity(spec.edges.len());
        for row in &spec.edges {
            if !edge_ids.insert(row.id.as_str()) {
                return Err(LayoutError::DuplicateEdge(row.id.clone()));
            }
            let referrer = format!("edge '{}'", row.id);
            let from = graph.port_ref(&row.from, &row.from_direction, &referrer)?;
            let to = graph.port_ref(&row.to, &row.to_direction, &referrer)?;
            positive("edge width", &referrer, row.width)?;
            let kind = EdgeKind::parse(&row.kind, row.height, &row.id)?;

            graph.edges.push(Edge {
                id: row.id.clone(),
                from,
                to,
                kind,
                width: row.width,
            });
        }

        log::debug!(
            "Layout graph built: {} zones, {} edges",
            graph.zones.len(),
            graph.edges.len()
        );
        Ok(graph)
    }

    fn port_ref(&self, zone_id: &str, direction: &str, referrer: &str) -> Result<PortRef, LayoutError> {
        let zone = self.zone_index(zone_id, referrer)?;
        let direction = parse_direction(direction, referrer)?;
        Ok(PortRef {
            zone,
            direction,
            point: self.zones[zone].port(direction),
        })
    }

    fn zone_index(&self, zone_id: &str, referrer: &str) -> Result<usize, LayoutError> {
        self.index.get(zone_id).copied().ok_or_else(|| LayoutError::UnknownZone {
            zone: zone_id.to_string(),
            referrer: referrer.to_string(),
        })
    }

    /// Look up a zone by identifier
    pub fn zone(&self, zone_id: &str) -> Result<&Zone, LayoutError> {
        let index = self.zone_index(zone_id, "lookup")?;
        Ok(&self.zones[index])
    }

    /// Derive a port from a zone identifier and textual direction
    pub fn port(&self, zone_id: &str, direction: &str) -> Result<Vec3, LayoutError> {
        Ok(self.port_ref(zone_id, direction, "lookup")?.point)
    }

    /// Zone owning an edge endpoint
    pub fn zone_at(&self, port: &PortRef) -> &Zone {
        &self.zones[port.zone]
    }

    /// All zones in declaration order
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// All edges in declaration order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Directions on `zone_id` used by at least one edge endpoint
    pub fn used_directions(&self, zone_id: &str) -> Vec<Direction> {
        let Some(&zone) = self.index.get(zone_id) else {
            return Vec::new();
        };
        let mut used: Vec<Direction> = Vec::new();
        for edge in &self.edges {
            for port in [&edge.from, &edge.to] {
                if port.zone == zone && !used.contains(&port.direction) {
                    used.push(port.direction);
                }
            }
        }
        used
    }
}

fn parse_direction(text: &str, referrer: &str) -> Result<Direction, LayoutError> {
    text.parse().map_err(|direction| LayoutError::InvalidDirection {
        direction,
        referrer: referrer.to_string(),
    })
}

pub(crate) fn positive(what: &'static str, referrer: &str, value: f32) -> Result<(), LayoutError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(LayoutError::NonPositiveDimension {
            what,
            referrer: referrer.to_string(),
            value,
        })
    }
}

pub(crate) fn finite(coords: &[f32; 3], referrer: &str) -> Result<(), LayoutError> {
    if coords.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(LayoutError::NonFiniteCoordinate(referrer.to_string()))
    }
}
