//! Corridor and bridge geometry
//!
//! Sealed corridor: floor and ceiling planes of `span × width`, two wall boxes
//! centred `width/2 + t/2` either side of the centreline, and two inward
//! facing glow strips on the inner wall faces.
//!
//! Open bridge: a glass deck, two edge strips just outside the deck and an
//! optional stream of flow particles from the origin port to the destination.

use serde::Serialize;
use thiserror::Error;

use super::ConnectorFrame;
use crate::animation::{patterns, TrackError};
use crate::config::CompilerSettings;
use crate::foundation::math::{constants::{GEOMETRY_EPSILON, HALF_PI}, Transform, Vec3};
use crate::layout::{Edge, EdgeKind};
use crate::materials::{palette, MaterialError, MaterialRegistry};
use crate::scene::{InstanceId, PrimitiveEmitter, SceneGraph};

/// Errors raised while stitching a connector
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConnectorError {
    /// Ports at different floor heights
    #[error("edge '{edge}' joins ports at z={from} and z={to}; ramps are not supported")]
    ElevationMismatch {
        /// Edge identifier
        edge: String,
        /// Origin port height
        from: f32,
        /// Destination port height
        to: f32,
    },

    /// Material descriptor rejected
    #[error(transparent)]
    Material(#[from] MaterialError),

    /// Flow track rejected
    #[error(transparent)]
    Track(#[from] TrackError),
}

/// Instances emitted for one edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StitchedConnector {
    /// Edge identifier
    pub edge: String,
    /// Corridor or bridge
    pub kind: EdgeKind,
    /// Placement frame
    pub frame: ConnectorFrame,
    /// Floor plane or bridge deck
    pub floor: InstanceId,
    /// Ceiling, sealed corridors only
    pub ceiling: Option<InstanceId>,
    /// Side walls (left, right), sealed corridors only
    pub walls: Option<[InstanceId; 2]>,
    /// Glow strips (left, right)
    pub strips: [InstanceId; 2],
    /// Flow particles, open bridges only
    pub particles: Vec<InstanceId>,
}

/// Builds connector geometry from settings
pub struct ConnectorStitcher<'a> {
    settings: &'a CompilerSettings,
}

impl<'a> ConnectorStitcher<'a> {
    /// Create a stitcher using `settings`
    pub fn new(settings: &'a CompilerSettings) -> Self {
        Self { settings }
    }

    /// Emit the connector for `edge`
    ///
    /// Coincident ports still produce geometry, a sliver of
    /// `GEOMETRY_EPSILON` length, and a warning.
    pub fn stitch(
        &self,
        edge: &Edge,
        scene: &mut SceneGraph,
        registry: &MaterialRegistry,
    ) -> Result<StitchedConnector, ConnectorError> {
        let (start, end) = (edge.from.point, edge.to.point);
        if (start.z - end.z).abs() > GEOMETRY_EPSILON {
            return Err(ConnectorError::ElevationMismatch {
                edge: edge.id.clone(),
                from: start.z,
                to: end.z,
            });
        }

        let frame = ConnectorFrame::between(start, end);
        if frame.is_degenerate() {
            log::warn!("Edge '{}' has zero length; emitting a degenerate connector", edge.id);
        }

        let connector = match edge.kind {
            EdgeKind::SealedCorridor { height } => self.corridor(edge, frame, height, scene, registry)?,
            EdgeKind::OpenBridge => self.bridge(edge, frame, scene, registry)?,
        };

        log::debug!(
            "Stitched {:?} '{}': span {:.3}, heading {:.3}",
            edge.kind,
            edge.id,
            frame.span,
            frame.heading
        );
        Ok(connector)
    }

    fn corridor(
        &self,
        edge: &Edge,
        frame: ConnectorFrame,
        height: f32,
        scene: &mut SceneGraph,
        registry: &MaterialRegistry,
    ) -> Result<StitchedConnector, ConnectorError> {
        let floor_mat = registry.resolve(&palette::floor())?;
        let wall_mat = registry.resolve(&palette::wall())?;
        let ceiling_mat = registry.resolve(&palette::ceiling())?;
        let strip_mat = registry.resolve(&palette::neon(palette::CYAN, self.settings.corridor.strip_strength))?;

        let span = frame.span.max(GEOMETRY_EPSILON);
        let width = edge.width;
        let t = self.settings.wall_thickness;
        let mut emitter = PrimitiveEmitter::new(scene);

        let floor = emitter.emit_plane(format!("{}_Floor", edge.id), span, width, frame.place(0.0, 0.0), &floor_mat);
        let ceiling = emitter.emit_plane(
            format!("{}_Ceiling", edge.id),
            span,
            width,
            frame.place(0.0, height),
            &ceiling_mat,
        );

        let wall_offset = width * 0.5 + t * 0.5;
        let walls = [("L", 1.0_f32), ("R", -1.0)].map(|(suffix, side)| {
            emitter.emit_box(
                format!("{}_Wall{suffix}", edge.id),
                span,
                t,
                height,
                frame.place(side * wall_offset, height * 0.5),
                &wall_mat,
            )
        });

        // Inset by t/2 from the wall centre, i.e. on the inner wall face. Rolling
        // the plane by ±90° stands it up facing the centreline.
        let strip_offset = wall_offset - t * 0.5;
        let strips = [("L", 1.0_f32), ("R", -1.0)].map(|(suffix, side)| {
            emitter.emit_plane(
                format!("{}_Strip{suffix}", edge.id),
                span,
                self.settings.corridor.strip_width,
                frame.place_rotated(side * strip_offset, height * 0.5, side * HALF_PI),
                &strip_mat,
            )
        });

        Ok(StitchedConnector {
            edge: edge.id.clone(),
            kind: edge.kind,
            frame,
            floor,
            ceiling: Some(ceiling),
            walls: Some(walls),
            strips,
            particles: Vec::new(),
        })
    }

    fn bridge(
        &self,
        edge: &Edge,
        frame: ConnectorFrame,
        scene: &mut SceneGraph,
        registry: &MaterialRegistry,
    ) -> Result<StitchedConnector, ConnectorError> {
        let bridge = &self.settings.bridge;
        let flow = &self.settings.flow;

        let deck_mat = registry.resolve(&palette::bridge_deck())?;
        let edge_mats = [
            registry.resolve(&palette::neon(palette::CYAN, bridge.edge_strength))?,
            registry.resolve(&palette::neon(palette::MAGENTA, bridge.edge_strength))?,
        ];

        let span = frame.span.max(GEOMETRY_EPSILON);
        let mut emitter = PrimitiveEmitter::new(scene);

        let floor = emitter.emit_plane(
            format!("{}_Deck", edge.id),
            span,
            edge.width,
            frame.place(0.0, bridge.deck_lift),
            &deck_mat,
        );

        let edge_offset = edge.width * 0.5 + bridge.edge_offset;
        let strips = [("L", 1.0_f32, &edge_mats[0]), ("R", -1.0, &edge_mats[1])].map(|(suffix, side, mat)| {
            emitter.emit_plane(
                format!("{}_Edge{suffix}", edge.id),
                span,
                bridge.edge_width,
                frame.place(side * edge_offset, bridge.edge_lift),
                mat,
            )
        });

        let mut particles = Vec::new();
        if flow.particles > 0 {
            let particle_mat = registry.resolve(&palette::neon(palette::CYAN, flow.strength))?;
            let lift = Vec3::new(0.0, 0.0, bridge.deck_lift + flow.radius);
            for k in 0..flow.particles {
                particles.push(emitter.emit_icosphere(
                    format!("{}_Flow_{k}", edge.id),
                    flow.radius,
                    1,
                    Transform::from_location(frame.start + lift),
                    &particle_mat,
                ));
            }

            let first = flow.start;
            for (k, &particle) in particles.iter().enumerate() {
                let t0 = first + k as f32 * flow.stagger;
                scene.attach_track(patterns::flow(particle, frame.start + lift, frame.end + lift, t0, t0 + flow.duration)?)?;
            }
        }

        Ok(StitchedConnector {
            edge: edge.id.clone(),
            kind: edge.kind,
            frame,
            floor,
            ceiling: None,
            walls: None,
            strips,
            particles,
        })
    }
}
