//! Track patterns
//!
//! Pure constructors for the four motion patterns used by mechanisms. Each
//! returns a validated [`AnimationTrack`]; nothing here touches the scene.

use crate::foundation::math::{constants::TAU, Vec3};
use crate::scene::InstanceId;

use super::{AnimationTrack, Keyframe, TrackError, TrackProperty};

/// Closed, open, closed on location at `timing = [t0, t1, t2]`
pub fn door_slide(
    target: InstanceId,
    closed: Vec3,
    open: Vec3,
    timing: [f32; 3],
) -> Result<AnimationTrack, TrackError> {
    let [t0, t1, t2] = timing;
    AnimationTrack::new(
        target,
        TrackProperty::Location,
        vec![
            Keyframe::vector(t0, closed),
            Keyframe::vector(t1, open),
            Keyframe::vector(t2, closed),
        ],
    )
}

/// Sign of the full turn for the ring at `ring_index`.
///
/// Even rings turn counter-clockwise, odd rings clockwise, so neighbouring
/// concentric rings counter-rotate.
pub fn turn_direction(ring_index: usize) -> f32 {
    if ring_index % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

/// One full turn about local Z between `start` and `end`
pub fn rotation_loop(
    target: InstanceId,
    base_rotation: Vec3,
    ring_index: usize,
    start: f32,
    end: f32,
) -> Result<AnimationTrack, TrackError> {
    let turned = base_rotation + Vec3::new(0.0, 0.0, turn_direction(ring_index) * TAU);
    AnimationTrack::new(
        target,
        TrackProperty::Rotation,
        vec![Keyframe::vector(start, base_rotation), Keyframe::vector(end, turned)],
    )
}

/// Symmetric triangular pulse: low at `start`, high at the midpoint, low at `end`
pub fn emission_pulse(
    target: InstanceId,
    low: f32,
    high: f32,
    start: f32,
    end: f32,
) -> Result<AnimationTrack, TrackError> {
    let mid = start + (end - start) * 0.5;
    AnimationTrack::new(
        target,
        TrackProperty::EmissionStrength,
        vec![
            Keyframe::scalar(start, low),
            Keyframe::scalar(mid, high),
            Keyframe::scalar(end, low),
        ],
    )
}

/// Single linear traversal from `from` to `to`; looping is left to the player
pub fn flow(
    target: InstanceId,
    from: Vec3,
    to: Vec3,
    start: f32,
    end: f32,
) -> Result<AnimationTrack, TrackError> {
    AnimationTrack::new(
        target,
        TrackProperty::Location,
        vec![Keyframe::vector(start, from), Keyframe::vector(end, to)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_door_slide_round_trip() {
        let closed = Vec3::new(-1.5, 0.0, 2.0);
        let open = Vec3::new(-4.55, 0.0, 2.0);
        let track = door_slide(InstanceId(3), closed, open, [1.0, 36.0, 120.0]).unwrap();

        assert_eq!(track.keyframes().len(), 3);
        assert_relative_eq!(track.evaluate(1.0).as_vector().unwrap(), closed);
        assert_relative_eq!(track.evaluate(36.0).as_vector().unwrap(), open, epsilon = 1e-5);
        assert_relative_eq!(track.evaluate(120.0).as_vector().unwrap(), closed, epsilon = 1e-5);
    }

    #[test]
    fn test_door_slide_rejects_bad_timing() {
        let result = door_slide(InstanceId(0), Vec3::zeros(), Vec3::x(), [1.0, 1.0, 120.0]);
        assert!(matches!(result, Err(TrackError::NonIncreasingTime { index: 1, .. })));
    }

    #[test]
    fn test_rotation_loop_counter_rotates() {
        let base = Vec3::new(1.0, 0.0, 0.5);
        let outer = rotation_loop(InstanceId(0), base, 0, 1.0, 180.0).unwrap();
        let inner = rotation_loop(InstanceId(1), base, 1, 1.0, 180.0).unwrap();

        let outer_end = outer.evaluate(180.0).as_vector().unwrap();
        let inner_end = inner.evaluate(180.0).as_vector().unwrap();
        assert_relative_eq!(outer_end.z - base.z, TAU, epsilon = 1e-5);
        assert_relative_eq!(inner_end.z - base.z, -TAU, epsilon = 1e-5);
        assert_relative_eq!(outer_end.x, base.x);
    }

    #[test]
    fn test_emission_pulse_is_symmetric() {
        let track = emission_pulse(InstanceId(0), 10.0, 30.0, 0.0, 100.0).unwrap();
        assert_relative_eq!(track.keyframes()[1].time, 50.0);
        assert_relative_eq!(track.evaluate(25.0).as_scalar().unwrap(), 20.0);
        assert_relative_eq!(track.evaluate(75.0).as_scalar().unwrap(), 20.0);
    }

    #[test]
    fn test_flow_is_single_traversal() {
        let track = flow(InstanceId(0), Vec3::zeros(), Vec3::new(0.0, -10.0, 0.0), 10.0, 30.0).unwrap();
        assert_eq!(track.keyframes().len(), 2);
        assert_relative_eq!(track.evaluate(20.0).as_vector().unwrap(), Vec3::new(0.0, -5.0, 0.0));
    }
}
