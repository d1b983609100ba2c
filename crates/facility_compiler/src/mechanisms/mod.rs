//! Mechanisms
//!
//! Composite, animated fixtures placed after the zone shells and connectors:
//! sliding doors, counter-rotating portal rings and spiral staircases. Each
//! builder emits its instances, attaches its tracks and reports the ids it
//! owns.

use thiserror::Error;

use crate::animation::TrackError;
use crate::materials::MaterialError;

pub mod door;
pub mod portal;
pub mod stairs;

pub use door::DoorMechanism;
pub use portal::PortalRings;
pub use stairs::SpiralStairs;

/// Errors raised while placing a mechanism
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MechanismError {
    /// A size that must be strictly positive is not
    #[error("{mechanism}: {what} must be positive, got {value}")]
    NonPositiveDimension {
        /// Mechanism identifier
        mechanism: String,
        /// Offending dimension
        what: &'static str,
        /// Offending value
        value: f32,
    },

    /// Position has a NaN or infinite coordinate
    #[error("{0}: position is not finite")]
    NonFinitePosition(String),

    /// An angle is NaN or infinite
    #[error("{mechanism}: {what} is not finite")]
    NonFiniteAngle {
        /// Mechanism identifier
        mechanism: String,
        /// Offending angle
        what: &'static str,
    },

    /// Material descriptor rejected
    #[error(transparent)]
    Material(#[from] MaterialError),

    /// Track rejected
    #[error(transparent)]
    Track(#[from] TrackError),
}

pub(crate) fn require_positive(mechanism: &str, what: &'static str, value: f32) -> Result<(), MechanismError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MechanismError::NonPositiveDimension {
            mechanism: mechanism.to_string(),
            what,
            value,
        })
    }
}

pub(crate) fn require_finite(mechanism: &str, position: &[f32; 3]) -> Result<(), MechanismError> {
    if position.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(MechanismError::NonFinitePosition(mechanism.to_string()))
    }
}

pub(crate) fn require_finite_angle(mechanism: &str, what: &'static str, degrees: f32) -> Result<(), MechanismError> {
    if degrees.is_finite() {
        Ok(())
    } else {
        Err(MechanismError::NonFiniteAngle {
            mechanism: mechanism.to_string(),
            what,
        })
    }
}
