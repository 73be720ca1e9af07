//! Error types for terrarium_core.
//!
//! These describe requests the engine refuses. Callers that face a user
//! (the frame driver, the CLI) absorb them with a log line instead of
//! surfacing them.

use thiserror::Error;

/// Rejected engine request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Point lies outside the arena.
    #[error("point ({x:.1}, {y:.1}) is outside the arena")]
    OutOfBounds { x: f64, y: f64 },

    /// Point lies inside a static obstacle.
    #[error("point ({x:.1}, {y:.1}) is inside an obstacle")]
    InsideObstacle { x: f64, y: f64 },

    /// Speed multiplier is not finite or outside the supported range.
    #[error("invalid speed multiplier: {0}")]
    InvalidSpeed(f64),
}

impl SimError {
    /// Whether the error is a rejected placement.
    #[must_use]
    pub fn is_placement(&self) -> bool {
        matches!(
            self,
            SimError::OutOfBounds { .. } | SimError::InsideObstacle { .. }
        )
    }
}
