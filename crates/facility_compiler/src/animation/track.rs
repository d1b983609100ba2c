//! Animation tracks
//!
//! A track is an ordered list of `(time, value)` samples on one property of
//! one instance. Construction validates ordering; a built track is never
//! modified.

use serde::Serialize;
use thiserror::Error;

use crate::foundation::math::{utils, Vec3};
use crate::scene::InstanceId;

/// Errors raised while building or attaching a track
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackError {
    /// Fewer than two samples
    #[error("a track needs at least 2 samples, got {0}")]
    TooFewSamples(usize),

    /// Sample time is NaN or infinite
    #[error("sample {index} has a non-finite time")]
    NonFiniteTime {
        /// Sample index
        index: usize,
    },

    /// Sample times are not strictly increasing
    #[error("sample {index} at t={time} does not come after t={previous}")]
    NonIncreasingTime {
        /// Sample index
        index: usize,
        /// Time of the preceding sample
        previous: f32,
        /// Offending time
        time: f32,
    },

    /// Sample value kind does not fit the property
    #[error("sample {index} has the wrong value kind for {property:?}")]
    ValueKindMismatch {
        /// Sample index
        index: usize,
        /// Track property
        property: TrackProperty,
    },

    /// Track targets an instance that does not exist
    #[error("track targets unknown instance {0:?}")]
    UnknownTarget(InstanceId),
}

/// Animatable instance property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TrackProperty {
    /// World location (vector)
    Location,
    /// Euler rotation in radians (vector)
    Rotation,
    /// Material emission strength (scalar)
    EmissionStrength,
}

impl TrackProperty {
    fn accepts(&self, value: &TrackValue) -> bool {
        match self {
            TrackProperty::Location | TrackProperty::Rotation => matches!(value, TrackValue::Vector(_)),
            TrackProperty::EmissionStrength => matches!(value, TrackValue::Scalar(_)),
        }
    }
}

/// Sampled property value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum TrackValue {
    /// Location or rotation
    Vector(Vec3),
    /// Emission strength
    Scalar(f32),
}

impl TrackValue {
    /// The vector payload, if any
    pub fn as_vector(&self) -> Option<Vec3> {
        match self {
            TrackValue::Vector(v) => Some(*v),
            TrackValue::Scalar(_) => None,
        }
    }

    /// The scalar payload, if any
    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            TrackValue::Scalar(s) => Some(*s),
            TrackValue::Vector(_) => None,
        }
    }

    fn lerp(&self, other: &TrackValue, t: f32) -> TrackValue {
        match (self, other) {
            (TrackValue::Vector(a), TrackValue::Vector(b)) => TrackValue::Vector(utils::lerp_vec3(a, b, t)),
            (TrackValue::Scalar(a), TrackValue::Scalar(b)) => TrackValue::Scalar(utils::lerp(*a, *b, t)),
            // Mixed kinds are rejected at construction
            _ => *self,
        }
    }
}

/// One time-keyed sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Keyframe {
    /// Sample time (frames)
    pub time: f32,
    /// Sample value
    pub value: TrackValue,
}

impl Keyframe {
    /// Vector sample
    pub fn vector(time: f32, value: Vec3) -> Self {
        Self {
            time,
            value: TrackValue::Vector(value),
        }
    }

    /// Scalar sample
    pub fn scalar(time: f32, value: f32) -> Self {
        Self {
            time,
            value: TrackValue::Scalar(value),
        }
    }
}

/// Immutable sequence of samples on one property of one instance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationTrack {
    target: InstanceId,
    property: TrackProperty,
    keyframes: Vec<Keyframe>,
}

impl AnimationTrack {
    /// Build a track, rejecting degenerate or unordered samples
    pub fn new(
        target: InstanceId,
        property: TrackProperty,
        keyframes: Vec<Keyframe>,
    ) -> Result<Self, TrackError> {
        if keyframes.len() < 2 {
            return Err(TrackError::TooFewSamples(keyframes.len()));
        }

        for (index, key) in keyframes.iter().enumerate() {
            if !key.time.is_finite() {
                return Err(TrackError::NonFiniteTime { index });
            }
            if !property.accepts(&key.value) {
                return Err(TrackError::ValueKindMismatch { index, property });
            }
            if index > 0 {
                let previous = keyframes[index - 1].time;
                if key.time <= previous {
                    return Err(TrackError::NonIncreasingTime {
                        index,
                        previous,
                        time: key.time,
                    });
                }
            }
        }

        Ok(Self {
            target,
            property,
            keyframes,
        })
    }

    /// Instance the track animates
    pub fn target(&self) -> InstanceId {
        self.target
    }

    /// Animated property
    pub fn property(&self) -> TrackProperty {
        self.property
    }

    /// Samples in time order
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Time of the first sample
    pub fn start_time(&self) -> f32 {
        self.keyframes[0].time
    }

    /// Time of the last sample
    pub fn end_time(&self) -> f32 {
        self.keyframes[self.keyframes.len() - 1].time
    }

    /// Linearly interpolated value at `time`, held constant outside the range
    pub fn evaluate(&self, time: f32) -> TrackValue {
        let first = &self.keyframes[0];
        if time <= first.time {
            return first.value;
        }
        for pair in self.keyframes.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if time <= b.time {
                let t = (time - a.time) / (b.time - a.time);
                return a.value.lerp(&b.value, t);
            }
        }
        self.keyframes[self.keyframes.len() - 1].value
    }
}
