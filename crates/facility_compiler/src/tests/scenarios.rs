//! End-to-end checks on small layouts
//!
//! Two 20×20×8 rooms forty units apart, joined through their facing walls,
//! plus a door at the origin. A second layout joins a hall, a room and an
//! open plaza so every shell style meets a connector.

use std::collections::HashSet;

use approx::assert_relative_eq;

use crate::animation::{AnimationTrack, Keyframe, TrackError, TrackProperty};
use crate::compiler::{CompileError, CompiledScene, FacilityCompiler};
use crate::config::CompilerSettings;
use crate::foundation::math::Vec3;
use crate::layout::{Direction, DoorSpec, EdgeSpec, LayoutError, LayoutGraph, LayoutSpec, PortalSpec, ZoneSpec};
use crate::materials::{palette, MaterialDescriptor, MaterialRegistry};
use crate::mechanisms::MechanismError;
use crate::scene::{InstanceId, Shape};

fn two_rooms(edge: EdgeSpec) -> LayoutSpec {
    LayoutSpec {
        zones: vec![
            ZoneSpec::room("A", [0.0, 0.0, 0.0], [20.0, 20.0, 8.0]),
            ZoneSpec::room("B", [0.0, -40.0, 0.0], [20.0, 20.0, 8.0]),
        ],
        edges: vec![edge],
        ..LayoutSpec::default()
    }
}

fn corridor_layout() -> LayoutSpec {
    two_rooms(EdgeSpec::corridor("a_b", ("A", "-y"), ("B", "+y"), 8.0, 5.0))
}

fn compiler() -> FacilityCompiler {
    FacilityCompiler::new(CompilerSettings::default()).unwrap()
}

#[test]
fn test_corridor_between_two_rooms() {
    let compiled = compiler().compile(&corridor_layout()).unwrap();
    let connector = &compiled.connectors[0];

    assert_relative_eq!(connector.frame.span, 20.0);
    assert_relative_eq!(connector.frame.midpoint.y, -20.0);

    let floor = compiled.scene.instance(connector.floor).unwrap();
    assert_eq!(floor.shape, Shape::Plane { width: 20.0, depth: 8.0 });
}

#[test]
fn test_corridor_floor_meets_both_walls() {
    let layout = corridor_layout();
    let graph = LayoutGraph::from_spec(&layout).unwrap();
    let compiled = compiler().compile(&layout).unwrap();

    let floor = compiled.scene.instance(compiled.connectors[0].floor).unwrap();
    let Shape::Plane { width: span, .. } = floor.shape else {
        panic!("corridor floor is not a plane: {:?}", floor.shape);
    };

    // The floor's local x axis runs along the corridor from A to B
    let near = floor.world_point(Vec3::new(-span * 0.5, 0.0, 0.0));
    let far = floor.world_point(Vec3::new(span * 0.5, 0.0, 0.0));

    let a = graph.zone("A").unwrap();
    let b = graph.zone("B").unwrap();
    assert_relative_eq!(a.distance_to_wall(Direction::NegY, &near), 0.0, epsilon = 1e-4);
    assert_relative_eq!(b.distance_to_wall(Direction::PosY, &far), 0.0, epsilon = 1e-4);
    assert_relative_eq!(near.y, -10.0, epsilon = 1e-4);
    assert_relative_eq!(far.y, -30.0, epsilon = 1e-4);
}

#[test]
fn test_corridor_ends_on_walls_in_any_direction() {
    let layout = LayoutSpec {
        zones: vec![
            ZoneSpec::room("west", [-30.0, 5.0, 2.0], [16.0, 12.0, 6.0]),
            ZoneSpec::room("east", [30.0, -5.0, 2.0], [24.0, 18.0, 6.0]),
        ],
        edges: vec![EdgeSpec::corridor("w_e", ("west", "+x"), ("east", "-x"), 4.0, 3.0)],
        ..LayoutSpec::default()
    };
    let graph = LayoutGraph::from_spec(&layout).unwrap();
    let compiled = compiler().compile(&layout).unwrap();

    let floor = compiled.scene.instance(compiled.connectors[0].floor).unwrap();
    let span = compiled.connectors[0].frame.span;
    let near = floor.world_point(Vec3::new(-span * 0.5, 0.0, 0.0));
    let far = floor.world_point(Vec3::new(span * 0.5, 0.0, 0.0));

    let west = graph.zone("west").unwrap();
    let east = graph.zone("east").unwrap();
    assert_relative_eq!(west.distance_to_wall(Direction::PosX, &near), 0.0, epsilon = 1e-4);
    assert_relative_eq!(east.distance_to_wall(Direction::NegX, &far), 0.0, epsilon = 1e-4);
    assert_relative_eq!(near, west.port(Direction::PosX), epsilon = 1e-4);
    assert_relative_eq!(far, east.port(Direction::NegX), epsilon = 1e-4);
}

/// Hall at the origin, a room east of it and an open plaza north of it
fn mixed_styles(hall_footprint: [f32; 3]) -> LayoutSpec {
    LayoutSpec {
        zones: vec![
            ZoneSpec::styled("hall", [0.0, 0.0, 0.0], hall_footprint, "hall"),
            ZoneSpec::room("room", [40.0, 0.0, 0.0], [20.0, 20.0, 8.0]),
            ZoneSpec::styled("plaza", [0.0, 45.0, 0.0], [24.0, 10.0, 4.0], "open"),
        ],
        edges: vec![
            EdgeSpec::corridor("hall_room", ("hall", "+x"), ("room", "-x"), 6.0, 5.0),
            EdgeSpec::bridge("plaza_hall", ("plaza", "-y"), ("hall", "+y"), 6.0),
        ],
        ..LayoutSpec::default()
    }
}

/// Ends of a connector's floor along its local x axis
fn floor_ends(compiled: &CompiledScene, index: usize) -> (Vec3, Vec3) {
    let connector = &compiled.connectors[index];
    let floor = compiled.scene.instance(connector.floor).unwrap();
    let span = connector.frame.span;
    (
        floor.world_point(Vec3::new(-span * 0.5, 0.0, 0.0)),
        floor.world_point(Vec3::new(span * 0.5, 0.0, 0.0)),
    )
}

#[test]
fn test_corridor_meets_hall_floor_edge() {
    let layout = mixed_styles([30.0, 30.0, 8.0]);
    let graph = LayoutGraph::from_spec(&layout).unwrap();
    let compiled = compiler().compile(&layout).unwrap();
    let (near, far) = floor_ends(&compiled, 0);

    let hall = graph.zone("hall").unwrap();
    let disc = compiled.scene.find("hall_Floor").unwrap();
    let Shape::Cylinder { radius, .. } = disc.shape else {
        panic!("hall floor is not a cylinder: {:?}", disc.shape);
    };
    let from_centre = Vec3::new(near.x - disc.transform.location.x, near.y - disc.transform.location.y, 0.0);
    assert_relative_eq!(from_centre.norm(), radius, epsilon = 1e-4);
    assert_relative_eq!(hall.distance_to_wall(Direction::PosX, &near), 0.0, epsilon = 1e-4);

    let room = graph.zone("room").unwrap();
    assert_relative_eq!(room.distance_to_wall(Direction::NegX, &far), 0.0, epsilon = 1e-4);
}

#[test]
fn test_bridge_meets_open_zone_and_hall() {
    let layout = mixed_styles([30.0, 30.0, 8.0]);
    let graph = LayoutGraph::from_spec(&layout).unwrap();
    let compiled = compiler().compile(&layout).unwrap();
    let (near, far) = floor_ends(&compiled, 1);

    let plaza = graph.zone("plaza").unwrap();
    let hall = graph.zone("hall").unwrap();
    assert_relative_eq!(plaza.distance_to_wall(Direction::NegY, &near), 0.0, epsilon = 1e-4);
    assert_relative_eq!(hall.distance_to_wall(Direction::PosY, &far), 0.0, epsilon = 1e-4);
    assert_relative_eq!(near.y, 40.0, epsilon = 1e-4);
    assert_relative_eq!(far.y, 15.0, epsilon = 1e-4);
    assert_relative_eq!(far.y - hall.anchor.y, hall.inner_radius(), epsilon = 1e-4);
}

#[test]
fn test_oblong_hall_aborts_compile() {
    let layout = mixed_styles([40.0, 20.0, 8.0]);
    assert!(matches!(
        compiler().compile(&layout),
        Err(CompileError::Layout(LayoutError::NonSquareHall { .. }))
    ));
}

fn door_layout() -> LayoutSpec {
    LayoutSpec {
        doors: vec![DoorSpec {
            id: "door".to_string(),
            position: [0.0, 0.0, 0.0],
            heading_deg: 0.0,
            width: 6.0,
            height: 4.0,
            clearance: Some(0.05),
            timing: Some([1.0, 36.0, 120.0]),
        }],
        ..LayoutSpec::default()
    }
}

fn location_at(compiled: &CompiledScene, panel: InstanceId, time: f32) -> Vec3 {
    compiled
        .scene
        .tracks_for(panel)
        .find(|t| t.property() == TrackProperty::Location)
        .and_then(|t| t.evaluate(time).as_vector())
        .unwrap()
}

#[test]
fn test_door_round_trip() {
    let compiled = compiler().compile(&door_layout()).unwrap();
    let door = &compiled.scene.doors()[0];

    let left_closed = location_at(&compiled, door.left, 1.0);
    let left_open = location_at(&compiled, door.left, 36.0);
    let left_again = location_at(&compiled, door.left, 120.0);
    assert_relative_eq!(left_closed.x, -1.5);
    assert_relative_eq!(left_open.x, -1.5 - 3.05, epsilon = 1e-5);
    assert_relative_eq!(left_again, left_closed, epsilon = 1e-5);

    let right_closed = location_at(&compiled, door.right, 1.0);
    let right_open = location_at(&compiled, door.right, 36.0);
    assert_relative_eq!(right_closed.x, 1.5);
    assert_relative_eq!(right_open.x, 1.5 + 3.05, epsilon = 1e-5);
    assert_relative_eq!(location_at(&compiled, door.right, 120.0), right_closed, epsilon = 1e-5);

    // Displacement is W/2 + C, in opposite directions
    let left_shift = left_open - left_closed;
    let right_shift = right_open - right_closed;
    assert_relative_eq!(left_shift.norm(), 3.05, epsilon = 1e-5);
    assert_relative_eq!(right_shift.norm(), 3.05, epsilon = 1e-5);
    assert_relative_eq!(left_shift.dot(&right_shift), -(3.05_f32 * 3.05), epsilon = 1e-4);
}

#[test]
fn test_reversed_samples_rejected() {
    let result = AnimationTrack::new(
        InstanceId(0),
        TrackProperty::Location,
        vec![Keyframe::vector(5.0, Vec3::x()), Keyframe::vector(3.0, Vec3::y())],
    );
    assert!(matches!(result, Err(TrackError::NonIncreasingTime { .. })));
}

#[test]
fn test_equal_descriptors_share_handles() {
    let registry = MaterialRegistry::new();
    let wall = registry.resolve(&palette::wall()).unwrap();
    let again = registry.resolve(&MaterialDescriptor::pbr([0.92, 0.93, 0.97, 1.0], 0.5, 0.15)).unwrap();
    let floor = registry.resolve(&palette::floor()).unwrap();
    assert!(wall.same_as(&again));
    assert!(!wall.same_as(&floor));

    let compiled = compiler().compile_with_registry(&corridor_layout(), &registry).unwrap();
    let walls: Vec<_> = compiled
        .scene
        .instances()
        .iter()
        .filter(|i| i.name.ends_with("_N") || i.name.contains("_Wall"))
        .collect();
    assert_eq!(walls.len(), 4);
    assert!(walls.iter().all(|i| i.material.same_as(&wall)));
}

#[test]
fn test_every_instance_material_is_listed() {
    let compiled = compiler().compile(&LayoutSpec::research_lab()).unwrap();
    for instance in compiled.scene.instances() {
        let listed = &compiled.materials[instance.material.id().0 as usize];
        assert_eq!(listed.id, instance.material.id());
        assert_eq!(listed.descriptor, instance.material.descriptor);
    }
    let keys: HashSet<_> = compiled.materials.iter().map(|m| m.descriptor.key()).collect();
    assert_eq!(keys.len(), compiled.materials.len());
}

#[test]
fn test_bad_mechanism_aborts_compile() {
    let mut layout = corridor_layout();
    layout.portals.push(PortalSpec {
        id: "broken".to_string(),
        position: [0.0, -20.0, 3.0],
        heading_deg: 0.0,
        outer_radius: -1.0,
        inner_radius: 2.3,
    });
    assert!(matches!(
        compiler().compile(&layout),
        Err(CompileError::Mechanism(MechanismError::NonPositiveDimension { .. }))
    ));
}

#[test]
fn test_mismatched_floor_heights_abort_compile() {
    let mut layout = corridor_layout();
    layout.zones[1].anchor[2] = 4.0;
    assert!(matches!(compiler().compile(&layout), Err(CompileError::Connector(_))));
}
