//! Material descriptors
//!
//! A descriptor is the value-level description of a surface. Two descriptors
//! that compare equal always resolve to the same handle in the registry.

use serde::Serialize;
use thiserror::Error;

/// Enumeration of supported material kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MaterialKind {
    /// Principled physically-based surface
    Pbr,
    /// Pure emission surface (neon strips, rings, particles)
    Emissive,
    /// Transmissive glass with alpha blending
    Glass,
}

impl MaterialKind {
    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            MaterialKind::Pbr => "pbr",
            MaterialKind::Emissive => "emissive",
            MaterialKind::Glass => "glass",
        }
    }
}

impl std::fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Errors raised when a descriptor leaves the legal parameter space
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MaterialError {
    /// A colour channel outside [0, 1]
    #[error("colour channel {channel} = {value} is outside [0, 1]")]
    ColorOutOfRange {
        /// Channel index (0 = R .. 3 = A)
        channel: usize,
        /// Offending value
        value: f32,
    },

    /// Roughness outside [0, 1]
    #[error("roughness {0} is outside [0, 1]")]
    RoughnessOutOfRange(f32),

    /// Metallic factor outside [0, 1]
    #[error("metallic factor {0} is outside [0, 1]")]
    MetallicOutOfRange(f32),

    /// Negative or non-finite emission strength
    #[error("emission strength {0} must be finite and >= 0")]
    InvalidEmission(f32),
}

/// Semantic key describing a surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialDescriptor {
    /// Shading family
    pub kind: MaterialKind,
    /// Base colour (RGBA, linear)
    pub base_color: [f32; 4],
    /// Roughness factor (0.0 = mirror, 1.0 = completely rough)
    pub roughness: f32,
    /// Metallic factor (0.0 = dielectric, 1.0 = metallic)
    pub metallic: f32,
    /// Emission strength
    pub emission: f32,
}

impl MaterialDescriptor {
    /// Principled surface
    pub fn pbr(base_color: [f32; 4], roughness: f32, metallic: f32) -> Self {
        Self {
            kind: MaterialKind::Pbr,
            base_color,
            roughness,
            metallic,
            emission: 0.0,
        }
    }

    /// Principled surface that also glows with its base colour
    pub fn pbr_emissive(base_color: [f32; 4], roughness: f32, metallic: f32, emission: f32) -> Self {
        Self {
            emission,
            ..Self::pbr(base_color, roughness, metallic)
        }
    }

    /// Pure emission surface
    pub fn emissive(color: [f32; 4], strength: f32) -> Self {
        Self {
            kind: MaterialKind::Emissive,
            base_color: color,
            roughness: 1.0,
            metallic: 0.0,
            emission: strength,
        }
    }

    /// Glass surface
    pub fn glass(color: [f32; 4], roughness: f32) -> Self {
        Self {
            kind: MaterialKind::Glass,
            base_color: color,
            roughness,
            metallic: 0.0,
            emission: 0.0,
        }
    }

    /// Check every field against the legal descriptor space
    pub fn validate(&self) -> Result<(), MaterialError> {
        for (channel, &value) in self.base_color.iter().enumerate() {
            if !(0.0..=1.0).contains(&value) {
                return Err(MaterialError::ColorOutOfRange { channel, value });
            }
        }
        if !(0.0..=1.0).contains(&self.roughness) {
            return Err(MaterialError::RoughnessOutOfRange(self.roughness));
        }
        if !(0.0..=1.0).contains(&self.metallic) {
            return Err(MaterialError::MetallicOutOfRange(self.metallic));
        }
        if !self.emission.is_finite() || self.emission < 0.0 {
            return Err(MaterialError::InvalidEmission(self.emission));
        }
        Ok(())
    }

    /// Hashable identity of this descriptor
    ///
    /// Only meaningful for validated descriptors (no NaN). Signed zeros are
    /// folded so that `-0.0` and `0.0` share a key, matching `PartialEq`.
    pub(crate) fn key(&self) -> DescriptorKey {
        fn bits(v: f32) -> u32 {
            if v == 0.0 { 0.0_f32.to_bits() } else { v.to_bits() }
        }
        DescriptorKey {
            kind: self.kind,
            base_color: self.base_color.map(bits),
            roughness: bits(self.roughness),
            metallic: bits(self.metallic),
            emission: bits(self.emission),
        }
    }
}

/// Bit-exact cache key for a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct DescriptorKey {
    kind: MaterialKind,
    base_color: [u32; 4],
    roughness: u32,
    metallic: u32,
    emission: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_bounds() {
        let d = MaterialDescriptor::pbr([0.0, 1.0, 0.5, 1.0], 0.0, 1.0);
        assert!(d.validate().is_ok());
        assert!(MaterialDescriptor::emissive([1.0; 4], 0.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_color() {
        let d = MaterialDescriptor::pbr([0.2, 1.2, 0.5, 1.0], 0.4, 0.1);
        assert_eq!(
            d.validate(),
            Err(MaterialError::ColorOutOfRange { channel: 1, value: 1.2 })
        );
    }

    #[test]
    fn test_validate_rejects_factors() {
        assert_eq!(
            MaterialDescriptor::pbr([0.5; 4], 1.5, 0.1).validate(),
            Err(MaterialError::RoughnessOutOfRange(1.5))
        );
        assert_eq!(
            MaterialDescriptor::pbr([0.5; 4], 0.5, -0.1).validate(),
            Err(MaterialError::MetallicOutOfRange(-0.1))
        );
        assert!(matches!(
            MaterialDescriptor::emissive([0.5; 4], -2.0).validate(),
            Err(MaterialError::InvalidEmission(_))
        ));
        assert!(MaterialDescriptor::emissive([0.5; 4], f32::INFINITY).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan() {
        let d = MaterialDescriptor::glass([f32::NAN, 0.5, 0.5, 0.5], 0.1);
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_key_folds_signed_zero() {
        let a = MaterialDescriptor::pbr([0.0, 0.5, 0.5, 1.0], 0.3, 0.0);
        let b = MaterialDescriptor::pbr([-0.0, 0.5, 0.5, 1.0], 0.3, -0.0);
        assert_eq!(a, b);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_key_distinguishes_kind() {
        let pbr = MaterialDescriptor::pbr([0.5; 4], 1.0, 0.0);
        let emissive = MaterialDescriptor {
            kind: MaterialKind::Emissive,
            ..pbr
        };
        assert_ne!(pbr.key(), emissive.key());
    }
}
