//! Forest scatter
//!
//! Rows of trees on both sides of a strip, walking from `start_y` towards
//! `end_y`. Every draw comes from the generator passed in, so a seeded
//! generator reproduces the same forest. Each tree becomes one LOD group whose
//! levels share the trunk and differ in canopy subdivision.

use rand::Rng;
use serde::Serialize;

use super::{tag, LodError};
use crate::foundation::math::{Transform, Vec3};
use crate::layout::ForestSpec;
use crate::materials::{palette, MaterialRegistry};
use crate::scene::{PrimitiveEmitter, SceneGraph};

/// Lateral jitter of each tree around its row
pub const ROW_JITTER: f32 = 1.5;
/// Jitter added to the spacing between consecutive trees
pub const SPACING_JITTER: f32 = 1.2;
/// Canopy radius relative to the trunk radius
pub const CANOPY_SCALE: f32 = 4.2;
/// Canopy centre height above the trunk top, relative to the trunk radius
pub const CANOPY_LIFT: f32 = 2.2;
/// Canopy subdivision per level, highest detail first
pub const CANOPY_SUBDIVISIONS: [u32; 3] = [3, 2, 1];

/// Summary of one scatter pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ForestStats {
    /// Trees placed
    pub trees: usize,
    /// Instances emitted
    pub instances: usize,
}

/// Scatter the forest and tag every tree
///
/// `switch_distances` is used unless the forest overrides it and must hold
/// one entry fewer than [`CANOPY_SUBDIVISIONS`].
pub fn scatter_forest(
    spec: &ForestSpec,
    switch_distances: &[f32],
    scene: &mut SceneGraph,
    registry: &MaterialRegistry,
    rng: &mut impl Rng,
) -> Result<ForestStats, LodError> {
    if !spec.spacing.is_finite() || spec.spacing <= SPACING_JITTER {
        return Err(LodError::Scatter(format!(
            "spacing {} must exceed the {SPACING_JITTER} jitter",
            spec.spacing
        )));
    }
    if ![spec.start_y, spec.end_y, spec.center_x, spec.base_z, spec.inner_offset, spec.row_gap]
        .iter()
        .all(|v| v.is_finite())
    {
        return Err(LodError::Scatter("forest bounds must be finite".to_string()));
    }
    let distances = spec.switch_distances.as_deref().unwrap_or(switch_distances);

    let trunk_mat = registry.resolve(&palette::trunk())?;
    let leaf_mat = registry.resolve(&palette::leaf())?;

    let before = scene.instance_count();
    let mut trees = Vec::new();
    {
        let mut emitter = PrimitiveEmitter::new(scene);
        let mut index = 0_usize;

        for side in [-1.0_f32, 1.0] {
            for row in 0..spec.rows {
                let x_base = spec.center_x + side * (spec.inner_offset + row as f32 * spec.row_gap);
                let mut y = spec.start_y;

                while y > spec.end_y {
                    let x = x_base + rng.gen_range(-ROW_JITTER..ROW_JITTER);
                    let height: f32 = rng.gen_range(6.0..10.0);
                    let radius: f32 = rng.gen_range(0.3..0.5);

                    let trunk = emitter.emit_cylinder(
                        format!("Tree_{index}_Trunk"),
                        radius,
                        height,
                        12,
                        Transform::from_location(Vec3::new(x, y, spec.base_z + height * 0.5)),
                        &trunk_mat,
                    );
                    let crown_at = Transform::from_location(Vec3::new(
                        x,
                        y,
                        spec.base_z + height + radius * CANOPY_LIFT,
                    ));
                    let variants = CANOPY_SUBDIVISIONS
                        .iter()
                        .enumerate()
                        .map(|(level, &subdivisions)| {
                            let crown = emitter.emit_icosphere(
                                format!("Tree_{index}_Crown_LOD{level}"),
                                radius * CANOPY_SCALE,
                                subdivisions,
                                crown_at,
                                &leaf_mat,
                            );
                            vec![trunk, crown]
                        })
                        .collect::<Vec<_>>();

                    trees.push((format!("Tree_{index}"), variants));
                    index += 1;
                    y -= spec.spacing + rng.gen_range(-SPACING_JITTER..SPACING_JITTER);
                }
            }
        }
    }

    let count = trees.len();
    for (group, variants) in trees {
        scene.attach_lod(tag(group, variants, distances)?)?;
    }

    let stats = ForestStats {
        trees: count,
        instances: scene.instance_count() - before,
    };
    log::debug!("Forest: {} trees, {} instances", stats.trees, stats.instances);
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn spec() -> ForestSpec {
        ForestSpec {
            start_y: 8.0,
            end_y: -43.0,
            center_x: 0.0,
            base_z: 0.0,
            rows: 2,
            spacing: 7.0,
            inner_offset: 13.0,
            row_gap: 5.0,
            switch_distances: None,
        }
    }

    fn scatter(seed: u64) -> SceneGraph {
        let registry = MaterialRegistry::new();
        let mut scene = SceneGraph::new();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        scatter_forest(&spec(), &[25.0, 60.0], &mut scene, &registry, &mut rng).unwrap();
        scene
    }

    #[test]
    fn test_each_tree_is_one_lod_group() {
        let scene = scatter(123);
        let groups = scene.lod_groups();
        assert!(!groups.is_empty());
        assert_eq!(scene.instance_count(), groups.len() * 4);

        for group in groups {
            assert_eq!(group.levels().len(), 3);
            assert_eq!(group.switch_distances(), &[25.0_f32, 60.0]);
            let trunk = group.levels()[0].instances[0];
            assert!(group.levels().iter().all(|l| l.instances[0] == trunk));
        }
    }

    #[test]
    fn test_trees_stay_in_bounds() {
        let scene = scatter(7);
        for instance in scene.instances() {
            let p = instance.transform.location;
            assert!(p.y <= 8.0 && p.y > -43.0, "{p:?}");
            assert!(p.x.abs() >= 13.0 - ROW_JITTER && p.x.abs() <= 18.0 + ROW_JITTER, "{p:?}");
        }
    }

    fn placements(scene: &SceneGraph) -> Vec<(String, Transform)> {
        scene.instances().iter().map(|i| (i.name.clone(), i.transform)).collect()
    }

    #[test]
    fn test_same_seed_same_forest() {
        assert_eq!(placements(&scatter(42)), placements(&scatter(42)));
        assert_ne!(placements(&scatter(42)), placements(&scatter(43)));
    }

    #[test]
    fn test_rejects_spacing_below_jitter() {
        let registry = MaterialRegistry::new();
        let mut scene = SceneGraph::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut tight = spec();
        tight.spacing = 1.0;
        let result = scatter_forest(&tight, &[25.0, 60.0], &mut scene, &registry, &mut rng);
        assert!(matches!(result, Err(LodError::Scatter(_))));
    }

    #[test]
    fn test_override_distances_must_match_levels() {
        let registry = MaterialRegistry::new();
        let mut scene = SceneGraph::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut odd = spec();
        odd.switch_distances = Some(vec![30.0]);
        let result = scatter_forest(&odd, &[25.0, 60.0], &mut scene, &registry, &mut rng);
        assert!(matches!(result, Err(LodError::DistanceCountMismatch { .. })));
    }
}
