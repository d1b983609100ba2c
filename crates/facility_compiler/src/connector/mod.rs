//! Connector stitching
//!
//! Joins two zone ports with a straight sealed corridor or open bridge. The
//! connector runs along the exact segment between the ports, so its ends lie
//! on the zones' wall planes and no seam or overlap can appear.

mod geometry;
mod stitcher;

pub use geometry::ConnectorFrame;
pub use stitcher::{ConnectorError, ConnectorStitcher, StitchedConnector};
