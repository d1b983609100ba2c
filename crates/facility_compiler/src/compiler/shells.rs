//! Zone shells
//!
//! Static enclosure geometry for each zone style, plus the site ground plane.

use crate::foundation::math::{
    constants::{PI, TAU},
    utils, Transform, Vec3,
};
use crate::layout::{Direction, GroundSpec, Zone, ZoneStyle};
use crate::materials::{palette, MaterialError, MaterialRegistry};
use crate::scene::{PrimitiveEmitter, SceneGraph};

/// Corner accent radius
const ACCENT_RADIUS: f32 = 0.1;
/// Hall floor slab thickness
const HALL_SLAB: f32 = 0.35;
/// Ring radius relative to the hall radius
const HALL_RING_SCALE: f32 = 0.82;
/// Segments in a full hall wall ring
const HALL_SEGMENTS: u32 = 20;
/// Half-angle of the gap left around a connected direction, degrees
const HALL_OPENING_DEG: f32 = 35.0;
/// Hall wall segment size (length, thickness)
const HALL_SEGMENT: [f32; 2] = [3.2, 0.5];
/// Dome radius relative to the hall radius
const DOME_SCALE: f32 = 0.95;
/// Vertical squash of the dome
const DOME_FLATTEN: f32 = 0.55;

/// Emit the shell for `zone`
///
/// `connected` lists directions with an edge attached; only halls use it, to
/// leave openings in their wall ring.
pub fn emit_shell(
    zone: &Zone,
    connected: &[Direction],
    wall_thickness: f32,
    scene: &mut SceneGraph,
    registry: &MaterialRegistry,
) -> Result<usize, MaterialError> {
    let before = scene.instance_count();
    match zone.style {
        ZoneStyle::Room => room(zone, wall_thickness, scene, registry)?,
        ZoneStyle::Hall => hall(zone, connected, scene, registry)?,
        ZoneStyle::Open => {}
    }
    let emitted = scene.instance_count() - before;
    log::debug!("Shell {:?} '{}': {} instances", zone.style, zone.id, emitted);
    Ok(emitted)
}

fn room(zone: &Zone, t: f32, scene: &mut SceneGraph, registry: &MaterialRegistry) -> Result<(), MaterialError> {
    let floor_mat = registry.resolve(&palette::floor())?;
    let wall_mat = registry.resolve(&palette::wall())?;
    let ceiling_mat = registry.resolve(&palette::ceiling())?;
    let accent_mat = registry.resolve(&palette::neon(palette::CYAN, 12.0))?;

    let a = zone.anchor;
    let (w, d, h) = (zone.footprint.width, zone.footprint.depth, zone.footprint.height);
    let (hw, hd, hh) = (w * 0.5, d * 0.5, h * 0.5);
    let mut emitter = PrimitiveEmitter::new(scene);

    emitter.emit_plane(format!("{}_Floor", zone.id), w, d, Transform::from_location(a), &floor_mat);
    emitter.emit_plane(
        format!("{}_Ceiling", zone.id),
        w,
        d,
        Transform::from_location(a + Vec3::new(0.0, 0.0, h)),
        &ceiling_mat,
    );

    for (suffix, offset) in [("N", hd), ("S", -hd)] {
        emitter.emit_box(
            format!("{}_{suffix}", zone.id),
            w,
            t,
            h,
            Transform::from_location(a + Vec3::new(0.0, offset, hh)),
            &wall_mat,
        );
    }
    for (suffix, offset) in [("E", hw), ("W", -hw)] {
        emitter.emit_box(
            format!("{}_{suffix}", zone.id),
            t,
            d,
            h,
            Transform::from_location(a + Vec3::new(offset, 0.0, hh)),
            &wall_mat,
        );
    }

    for (i, (ex, ey)) in [(hw, hd), (hw, -hd), (-hw, hd), (-hw, -hd)].into_iter().enumerate() {
        emitter.emit_cylinder(
            format!("{}_Edge_{i}", zone.id),
            ACCENT_RADIUS,
            h,
            12,
            Transform::from_location(a + Vec3::new(ex, ey, hh)),
            &accent_mat,
        );
    }
    Ok(())
}

fn hall(
    zone: &Zone,
    connected: &[Direction],
    scene: &mut SceneGraph,
    registry: &MaterialRegistry,
) -> Result<(), MaterialError> {
    let floor_mat = registry.resolve(&palette::hall_floor())?;
    let ring_mat = registry.resolve(&palette::neon(palette::CYAN, 14.0))?;
    let wall_mat = registry.resolve(&palette::wall())?;
    let dome_mat = registry.resolve(&palette::hall_dome())?;

    let a = zone.anchor;
    let radius = zone.inner_radius();
    let height = zone.footprint.height;
    let mut emitter = PrimitiveEmitter::new(scene);

    emitter.emit_cylinder(
        format!("{}_Floor", zone.id),
        radius,
        HALL_SLAB,
        48,
        Transform::from_location(a + Vec3::new(0.0, 0.0, HALL_SLAB * 0.5)),
        &floor_mat,
    );
    emitter.emit_torus(
        format!("{}_Ring", zone.id),
        radius * HALL_RING_SCALE,
        0.12,
        Transform::from_location(a + Vec3::new(0.0, 0.0, HALL_SLAB + 0.07)),
        &ring_mat,
    );

    let opening = utils::deg_to_rad(HALL_OPENING_DEG);
    let [length, thickness] = HALL_SEGMENT;
    for i in 0..HALL_SEGMENTS {
        let angle = TAU * i as f32 / HALL_SEGMENTS as f32;
        if connected.iter().any(|d| angle_between(angle, d.heading()) <= opening + 1e-4) {
            continue;
        }
        let location = a + Vec3::new(
            (radius - 0.5) * angle.cos(),
            (radius - 0.5) * angle.sin(),
            height * 0.5,
        );
        emitter.emit_box(
            format!("{}_Wall_{i}", zone.id),
            length,
            thickness,
            height,
            Transform::from_location_heading(location, angle),
            &wall_mat,
        );
    }

    // Centred on the wall tops
    let dome_radius = radius * DOME_SCALE;
    emitter.emit_spheroid(
        format!("{}_Dome", zone.id),
        dome_radius,
        dome_radius * DOME_FLATTEN,
        3,
        Transform::from_location(a + Vec3::new(0.0, 0.0, height)),
        &dome_mat,
    );
    Ok(())
}

/// Unsigned angle between two headings, in `[0, π]`
fn angle_between(a: f32, b: f32) -> f32 {
    ((a - b + PI).rem_euclid(TAU) - PI).abs()
}

/// Emit the ground plane
pub fn emit_ground(ground: &GroundSpec, scene: &mut SceneGraph, registry: &MaterialRegistry) -> Result<(), MaterialError> {
    let material = registry.resolve(&palette::ground())?;
    PrimitiveEmitter::new(scene).emit_plane(
        "Ground",
        ground.size,
        ground.size,
        Transform::from_location(Vec3::from(ground.center)),
        &material,
    );
    Ok(())
}
