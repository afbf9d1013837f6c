//! Physics error types

use crate::world::MatterId;

/// Errors raised by the physics core
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// A collision shape was given a non-positive or non-finite dimension
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A mass was zero, negative or non-finite
    #[error("Invalid mass: {0} (must be positive and finite)")]
    InvalidMass(f64),

    /// A time step was negative or non-finite
    #[error("Invalid time step: {0} (must be finite and >= 0)")]
    InvalidTimeStep(f64),

    /// Input that would produce NaN or infinite results
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// A handle that does not name a live `Matter`
    #[error("Unknown matter: {0:?}")]
    UnknownMatter(MatterId),
}

/// Reject negative or non-finite time steps
pub(crate) fn check_time_step(dt: f64) -> Result<(), PhysicsError> {
    if dt.is_finite() && dt >= 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidTimeStep(dt))
    }
}
