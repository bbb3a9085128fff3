//! Error type shared by the simulation core
//!
//! Two families of failure exist:
//! - invalid arguments (negative `dt`, degenerate shape parameters), reported
//!   before anything is mutated
//! - numeric anomalies, reported when a step would produce a non-finite
//!   position or velocity; the step is rejected and state is left untouched

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid argument: dt must be non-negative, got {0}")]
    NegativeTimeStep(f64),

    #[error("invalid argument: radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("invalid argument: density must be positive, got {0}")]
    NonPositiveDensity(f64),

    #[error("invalid argument: cannot normalize a zero-length direction")]
    DegenerateDirection,

    #[error("invalid argument: color channel {0} is outside [0, 1]")]
    InvalidColor(f32),

    #[error("invalid argument: surface needs {expected} control points, got {got}")]
    ControlPointCount { expected: usize, got: usize },

    #[error("numeric anomaly: {quantity} became non-finite (body {body})")]
    NumericAnomaly { quantity: &'static str, body: usize },
}

impl SimError {
    /// `true` for errors caused by bad caller input rather than the force model
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(self, SimError::NumericAnomaly { .. })
    }

    /// Re-tag a numeric anomaly with the index of the body that produced it
    pub fn for_body(self, index: usize) -> Self {
        match self {
            SimError::NumericAnomaly { quantity, .. } => SimError::NumericAnomaly { quantity, body: index },
            other => other,
        }
    }
}
