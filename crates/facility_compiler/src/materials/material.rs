//! Shading handles
//!
//! A `Material` is the cached, immutable shading resource built from a
//! descriptor. Primitives refer to it through a cheap `MaterialHandle`.

use std::ops::Deref;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use super::{MaterialDescriptor, MaterialKind};

/// Index of refraction used for every glass surface
pub const GLASS_IOR: f32 = 1.45;

/// Unique identifier for materials, assigned in resolve order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MaterialId(pub u32);

/// Alpha blending modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AlphaMode {
    /// No transparency
    #[default]
    Opaque,
    /// Alpha blending
    Blend,
}

/// Shader network the host should build for a material
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ShadingModel {
    /// Principled BSDF
    Principled {
        /// Base colour
        base_color: [f32; 4],
        /// Roughness factor
        roughness: f32,
        /// Metallic factor
        metallic: f32,
        /// Emission colour (base colour) strength, 0 when not glowing
        emission_strength: f32,
    },
    /// Emission-only surface
    Emission {
        /// Emitted colour
        color: [f32; 4],
        /// Emission strength
        strength: f32,
    },
    /// Glass BSDF
    Glass {
        /// Tint colour
        color: [f32; 4],
        /// Surface roughness
        roughness: f32,
        /// Index of refraction
        ior: f32,
    },
}

/// Material resource built from a descriptor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Material {
    /// Unique identifier for this material
    pub id: MaterialId,
    /// Descriptor the material was built from
    pub descriptor: MaterialDescriptor,
    /// Shading network
    pub shading: ShadingModel,
    /// Blending mode
    pub alpha_mode: AlphaMode,
}

impl Material {
    /// Build the shading resource for a (validated) descriptor
    pub(crate) fn build(id: MaterialId, descriptor: MaterialDescriptor) -> Self {
        let d = descriptor;
        let (shading, alpha_mode) = match d.kind {
            MaterialKind::Pbr => (
                ShadingModel::Principled {
                    base_color: d.base_color,
                    roughness: d.roughness,
                    metallic: d.metallic,
                    emission_strength: d.emission,
                },
                AlphaMode::Opaque,
            ),
            MaterialKind::Emissive => (
                ShadingModel::Emission {
                    color: d.base_color,
                    strength: d.emission,
                },
                AlphaMode::Opaque,
            ),
            MaterialKind::Glass => (
                ShadingModel::Glass {
                    color: d.base_color,
                    roughness: d.roughness,
                    ior: GLASS_IOR,
                },
                AlphaMode::Blend,
            ),
        };

        Self {
            id,
            descriptor,
            shading,
            alpha_mode,
        }
    }
}

/// Shared reference to a cached material
///
/// Equality is identity: two handles are equal only when they point at the
/// same cached material.
#[derive(Debug, Clone)]
pub struct MaterialHandle(Arc<Material>);

impl MaterialHandle {
    pub(crate) fn new(material: Material) -> Self {
        Self(Arc::new(material))
    }

    /// Identifier of the referenced material
    pub fn id(&self) -> MaterialId {
        self.0.id
    }

    /// Whether both handles reference the same cached material
    pub fn same_as(&self, other: &MaterialHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for MaterialHandle {
    type Target = Material;

    fn deref(&self) -> &Material {
        &self.0
    }
}

impl PartialEq for MaterialHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for MaterialHandle {}

impl Serialize for MaterialHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.id().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glass_blends() {
        let m = Material::build(MaterialId(1), MaterialDescriptor::glass([0.5, 0.8, 1.0, 0.4], 0.03));
        assert_eq!(m.alpha_mode, AlphaMode::Blend);
        assert!(matches!(m.shading, ShadingModel::Glass { ior, .. } if (ior - GLASS_IOR).abs() < f32::EPSILON));
    }

    #[test]
    fn test_emissive_shading() {
        let m = Material::build(MaterialId(2), MaterialDescriptor::emissive([0.0, 0.88, 1.0, 1.0], 12.0));
        assert_eq!(m.alpha_mode, AlphaMode::Opaque);
        assert_eq!(
            m.shading,
            ShadingModel::Emission { color: [0.0, 0.88, 1.0, 1.0], strength: 12.0 }
        );
    }

    #[test]
    fn test_handle_equality_is_identity() {
        let descriptor = MaterialDescriptor::pbr([0.5; 4], 0.5, 0.5);
        let a = MaterialHandle::new(Material::build(MaterialId(1), descriptor));
        let b = MaterialHandle::new(Material::build(MaterialId(1), descriptor));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
