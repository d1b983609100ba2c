//! # Compiler driver
//!
//! Runs the whole compile in dependency order:
//!
//! 1. build the layout graph
//! 2. ground plane and zone shells
//! 3. one connector per edge
//! 4. doors, portals and stairs
//! 5. seeded forest scatter with LOD tagging
//!
//! Any failure aborts the run; there is no partially compiled scene.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use thiserror::Error;

use crate::animation::TrackError;
use crate::config::{CompilerSettings, ConfigError};
use crate::connector::{ConnectorError, ConnectorStitcher, StitchedConnector};
use crate::layout::{LayoutError, LayoutGraph, LayoutSpec};
use crate::lod::{scatter_forest, ForestStats, LodError};
use crate::materials::{Material, MaterialError, MaterialRegistry};
use crate::mechanisms::{DoorMechanism, MechanismError, PortalRings, SpiralStairs};
use crate::scene::SceneGraph;

mod export;
pub mod shells;

pub use export::{ExportError, RonSnapshotExporter, SceneExporter};

/// Any error that aborts a compile
#[derive(Error, Debug)]
pub enum CompileError {
    /// Bad settings
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Bad layout table
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Bad material descriptor
    #[error("Material error: {0}")]
    Material(#[from] MaterialError),

    /// Connector could not be stitched
    #[error("Connector error: {0}")]
    Connector(#[from] ConnectorError),

    /// Mechanism could not be placed
    #[error("Mechanism error: {0}")]
    Mechanism(#[from] MechanismError),

    /// Track rejected
    #[error("Track error: {0}")]
    Track(#[from] TrackError),

    /// LOD group rejected
    #[error("LOD error: {0}")]
    Lod(#[from] LodError),

    /// Exporter failed
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Result of a successful compile
#[derive(Debug, Serialize)]
pub struct CompiledScene {
    /// Instances, tracks, LOD groups and doors
    pub scene: SceneGraph,
    /// Materials in first-use order
    pub materials: Vec<Material>,
    /// One entry per layout edge, in edge order
    pub connectors: Vec<StitchedConnector>,
    /// Portal rings in layout order
    pub portals: Vec<PortalRings>,
    /// Staircases in layout order
    pub stairs: Vec<SpiralStairs>,
    /// Forest summary, when a forest was requested
    pub forest: Option<ForestStats>,
}

impl CompiledScene {
    /// Hand the scene to an exporter
    pub fn export_with(&self, exporter: &mut impl SceneExporter) -> Result<(), ExportError> {
        exporter.export(self)
    }
}

/// Compiles layout tables into scenes
#[derive(Debug, Clone)]
pub struct FacilityCompiler {
    settings: CompilerSettings,
}

impl FacilityCompiler {
    /// Create a compiler, rejecting invalid settings
    pub fn new(settings: CompilerSettings) -> Result<Self, CompileError> {
        settings.validate().map_err(ConfigError::Invalid)?;
        Ok(Self { settings })
    }

    /// Active settings
    pub fn settings(&self) -> &CompilerSettings {
        &self.settings
    }

    /// Compile with a fresh material registry
    pub fn compile(&self, layout: &LayoutSpec) -> Result<CompiledScene, CompileError> {
        let registry = MaterialRegistry::new();
        self.compile_with_registry(layout, &registry)
    }

    /// Compile resolving materials through `registry`
    pub fn compile_with_registry(
        &self,
        layout: &LayoutSpec,
        registry: &MaterialRegistry,
    ) -> Result<CompiledScene, CompileError> {
        let settings = &self.settings;
        let graph = LayoutGraph::from_spec(layout)?;
        log::info!("Compiling {} zones and {} edges", graph.zones().len(), graph.edges().len());

        let mut scene = SceneGraph::new();

        if let Some(ground) = &layout.ground {
            shells::emit_ground(ground, &mut scene, registry)?;
        }
        for zone in graph.zones() {
            let connected = graph.used_directions(&zone.id);
            shells::emit_shell(zone, &connected, settings.wall_thickness, &mut scene, registry)?;
        }
        log::info!("Zone shells: {} instances", scene.instance_count());

        let stitcher = ConnectorStitcher::new(settings);
        let connectors = graph
            .edges()
            .iter()
            .map(|edge| stitcher.stitch(edge, &mut scene, registry))
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("Connectors: {} stitched", connectors.len());

        for door in &layout.doors {
            DoorMechanism::build(door, &settings.door, &mut scene, registry)?;
        }
        let portals = layout
            .portals
            .iter()
            .map(|portal| PortalRings::build(portal, &settings.portal, &settings.pulse, &mut scene, registry))
            .collect::<Result<Vec<_>, _>>()?;
        let stairs = layout
            .stairs
            .iter()
            .map(|stair| SpiralStairs::build(stair, &mut scene, registry))
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "Mechanisms: {} doors, {} portals, {} staircases",
            scene.doors().len(),
            portals.len(),
            stairs.len()
        );

        let forest = match &layout.forest {
            Some(forest) => {
                let mut rng = ChaCha8Rng::seed_from_u64(settings.seed);
                Some(scatter_forest(
                    forest,
                    &settings.lod.switch_distances,
                    &mut scene,
                    registry,
                    &mut rng,
                )?)
            }
            None => None,
        };

        let materials = registry.materials().iter().map(|handle| (**handle).clone()).collect::<Vec<_>>();
        log::info!(
            "Compiled {} instances, {} tracks, {} LOD groups, {} materials",
            scene.instance_count(),
            scene.track_count(),
            scene.lod_groups().len(),
            materials.len()
        );

        Ok(CompiledScene {
            scene,
            materials,
            connectors,
            portals,
            stairs,
            forest,
        })
    }
}
