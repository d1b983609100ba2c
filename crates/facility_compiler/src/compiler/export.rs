//! Scene export
//!
//! The compiler's only obligation toward an exporter is a finished scene in
//! which every instance has a material and every track is well ordered. The
//! RON snapshot writer here is for inspection and regression diffs.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::CompiledScene;

/// Errors reported by an exporter
#[derive(Error, Debug)]
pub enum ExportError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Exporter refused the scene
    #[error("Export rejected: {0}")]
    Rejected(String),
}

/// Consumer of a compiled scene
pub trait SceneExporter {
    /// Export the finished scene
    fn export(&mut self, scene: &CompiledScene) -> Result<(), ExportError>;
}

/// Writes the compiled scene as pretty RON
#[derive(Debug, Clone)]
pub struct RonSnapshotExporter {
    path: PathBuf,
}

impl RonSnapshotExporter {
    /// Exporter writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Output path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render the snapshot text without writing it
    pub fn render(scene: &CompiledScene) -> Result<String, ExportError> {
        ron::ser::to_string_pretty(scene, ron::ser::PrettyConfig::default())
            .map_err(|e| ExportError::Serialize(e.to_string()))
    }
}

impl SceneExporter for RonSnapshotExporter {
    fn export(&mut self, scene: &CompiledScene) -> Result<(), ExportError> {
        let text = Self::render(scene)?;
        std::fs::write(&self.path, text)?;
        log::info!("Wrote scene snapshot to {}", self.path.display());
        Ok(())
    }
}
