//! # Facility Compiler
//!
//! Compiles a declarative facility layout (zones joined by corridors and
//! bridges) into a seam-free scene of placed primitives, shared materials,
//! animation tracks and level-of-detail metadata.
//!
//! ## Features
//!
//! - **Layout graph**: zones with axis-aligned footprints and derived ports
//! - **Connectors**: straight sealed corridors and open bridges, port to port
//! - **Mechanisms**: sliding doors, counter-rotating portals, spiral stairs
//! - **Materials**: memoised registry, equal descriptors share one handle
//! - **Determinism**: seeded scatter, identical input gives identical output
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use facility_compiler::prelude::*;
//!
//! fn main() -> Result<(), CompileError> {
//!     let compiler = FacilityCompiler::new(CompilerSettings::default())?;
//!     let compiled = compiler.compile(&LayoutSpec::research_lab())?;
//!     compiled.export_with(&mut RonSnapshotExporter::new("lab.ron"))?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod materials;
pub mod layout;
pub mod scene;
pub mod animation;
pub mod connector;
pub mod mechanisms;
pub mod lod;
pub mod compiler;

#[cfg(test)]
mod tests;

/// Common imports for compiler users
pub mod prelude {
    pub use crate::{
        compiler::{CompileError, CompiledScene, FacilityCompiler, RonSnapshotExporter, SceneExporter},
        config::{CompilerSettings, Config},
        foundation::math::{Transform, Vec3},
        layout::{EdgeSpec, LayoutGraph, LayoutSpec, ZoneSpec},
        materials::{MaterialDescriptor, MaterialRegistry},
        scene::{InstanceId, SceneGraph},
    };
}
