//! Level of detail
//!
//! Pure metadata describing which instances form each detail level of a
//! decorative group and at what camera distance a host should switch between
//! them. Nothing here computes distances or swaps geometry.

use thiserror::Error;

use crate::materials::MaterialError;
use crate::scene::InstanceId;

mod descriptor;
pub mod forest;

pub use descriptor::{tag, LodDescriptor, LodLevel};
pub use forest::{scatter_forest, ForestStats};

/// Errors raised while tagging or scattering LOD groups
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LodError {
    /// Fewer than two detail levels
    #[error("group '{group}' needs at least 2 detail levels, got {levels}")]
    TooFewVariants {
        /// Group name
        group: String,
        /// Number of levels supplied
        levels: usize,
    },

    /// Switch distance count is not levels - 1
    #[error("group '{group}' has {levels} levels but {distances} switch distances")]
    DistanceCountMismatch {
        /// Group name
        group: String,
        /// Number of levels
        levels: usize,
        /// Number of distances
        distances: usize,
    },

    /// Distance is zero, negative or not finite
    #[error("group '{group}' has a non-positive switch distance {distance}")]
    NonPositiveDistance {
        /// Group name
        group: String,
        /// Offending distance
        distance: f32,
    },

    /// Distances do not strictly increase
    #[error("group '{group}' switch distances are not increasing: {previous} then {distance}")]
    NonIncreasingDistance {
        /// Group name
        group: String,
        /// Preceding distance
        previous: f32,
        /// Offending distance
        distance: f32,
    },

    /// Level lists no instances
    #[error("group '{group}' level {level} is empty")]
    EmptyLevel {
        /// Group name
        group: String,
        /// Level index
        level: usize,
    },

    /// Group references an instance that was never emitted
    #[error("LOD group references unknown instance {0:?}")]
    UnknownInstance(InstanceId),

    /// Scatter parameters that cannot terminate or make no sense
    #[error("invalid scatter: {0}")]
    Scatter(String),

    /// Material descriptor rejected
    #[error(transparent)]
    Material(#[from] MaterialError),
}
