//! Layout graph model
//!
//! Zones, derived ports and typed edges describing the facility topology.
//! The graph is built once from a declarative `LayoutSpec` and is immutable
//! afterwards.

mod direction;
mod zone;
mod graph;
pub mod spec;

pub use direction::Direction;
pub use zone::{Footprint, Zone, ZoneStyle};
pub use graph::{Edge, EdgeKind, LayoutError, LayoutGraph, PortRef};
pub use spec::{
    DoorSpec, EdgeSpec, ForestSpec, GroundSpec, LayoutSpec, PortalSpec, StairSpec, ZoneSpec,
};
