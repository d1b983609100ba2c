//! Material system
//!
//! Semantic material descriptors and the registry that maps each distinct
//! descriptor to exactly one shared shading handle.

mod descriptor;
mod material;
mod registry;
pub mod palette;

pub use descriptor::{MaterialDescriptor, MaterialKind, MaterialError};
pub use material::{Material, MaterialHandle, MaterialId, ShadingModel, AlphaMode};
pub use registry::MaterialRegistry;
