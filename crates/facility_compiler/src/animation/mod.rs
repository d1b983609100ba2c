//! Mechanism animation
//!
//! Immutable, time-keyed property tracks and the pure pattern functions that
//! build them (door slide, rotation loop, emission pulse, point-to-point flow).

mod track;
pub mod patterns;

pub use track::{AnimationTrack, Keyframe, TrackError, TrackProperty, TrackValue};
