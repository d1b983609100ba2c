use serde::Serialize;

use super::LodError;
use crate::scene::InstanceId;

/// Instances shown together at one detail level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LodLevel {
    /// Members of the level; an instance may appear in several levels
    pub instances: Vec<InstanceId>,
}

impl LodLevel {
    /// Level made of the given instances
    pub fn new(instances: Vec<InstanceId>) -> Self {
        Self { instances }
    }
}

/// Detail levels of one decorative group, highest detail first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LodDescriptor {
    group: String,
    levels: Vec<LodLevel>,
    switch_distances: Vec<f32>,
}

impl LodDescriptor {
    /// Validate and build a descriptor
    ///
    /// `switch_distances[i]` is where level `i + 1` replaces level `i`, so
    /// there must be exactly one fewer distance than levels.
    pub fn new(
        group: impl Into<String>,
        levels: Vec<LodLevel>,
        switch_distances: Vec<f32>,
    ) -> Result<Self, LodError> {
        let group = group.into();

        if levels.len() < 2 {
            return Err(LodError::TooFewVariants { group, levels: levels.len() });
        }
        if switch_distances.len() != levels.len() - 1 {
            return Err(LodError::DistanceCountMismatch {
                group,
                levels: levels.len(),
                distances: switch_distances.len(),
            });
        }
        if let Some(level) = levels.iter().position(|l| l.instances.is_empty()) {
            return Err(LodError::EmptyLevel { group, level });
        }
        for (i, &distance) in switch_distances.iter().enumerate() {
            if !distance.is_finite() || distance <= 0.0 {
                return Err(LodError::NonPositiveDistance { group, distance });
            }
            if i > 0 && distance <= switch_distances[i - 1] {
                return Err(LodError::NonIncreasingDistance {
                    group,
                    previous: switch_distances[i - 1],
                    distance,
                });
            }
        }

        Ok(Self {
            group,
            levels,
            switch_distances,
        })
    }

    /// Group name
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Levels from highest to lowest detail
    pub fn levels(&self) -> &[LodLevel] {
        &self.levels
    }

    /// Switch distances, strictly increasing
    pub fn switch_distances(&self) -> &[f32] {
        &self.switch_distances
    }

    /// Every instance id referenced by any level
    pub fn instance_ids(&self) -> impl Iterator<Item = InstanceId> + '_ {
        self.levels.iter().flat_map(|l| l.instances.iter().copied())
    }

    /// Level a host would show at `distance`
    pub fn level_for_distance(&self, distance: f32) -> usize {
        self.switch_distances.iter().take_while(|d| distance >= **d).count()
    }
}

/// Tag a group of variants, ordered high to low detail
pub fn tag(
    group: impl Into<String>,
    variants: Vec<Vec<InstanceId>>,
    switch_distances: &[f32],
) -> Result<LodDescriptor, LodError> {
    LodDescriptor::new(
        group,
        variants.into_iter().map(LodLevel::new).collect(),
        switch_distances.to_vec(),
    )
}
