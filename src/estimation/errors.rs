//! Errors for the alternating estimation loop.
//!
//! [`EstimationError`] wraps the construction errors of the model layer and
//! configuration errors of the optimizer, and adds the outcomes specific to
//! the outer loop: per-user degenerate weights and the iteration cap.
//!
//! ## Conventions
//! - `DegenerateWeight` never escapes [`crate::estimation::Coordinator::run`];
//!   it is logged and counted per iteration.
//! - `DidNotConverge` is returned after the last iteration has been
//!   committed, so the graph can still be exported.
use crate::{model::errors::ModelError, optimization::errors::OptError};

/// Result alias for estimation-level operations.
pub type EstimationResult<T> = Result<T, EstimationError>;

#[derive(Debug, Clone, PartialEq)]
pub enum EstimationError {
    // ---- Wrapped ----
    /// Model construction or commit failure.
    Model(ModelError),
    /// Optimizer configuration or backend failure.
    Optimization(OptError),

    // ---- Per entity ----
    /// The inverse-variance weights of a user's venues sum to zero or a
    /// non-finite value.
    DegenerateWeight { user: String },

    // ---- Outer loop ----
    /// The iteration cap was reached before the relative change fell below
    /// tolerance.
    DidNotConverge { iterations: usize, last_relative_change: f64 },

    // ---- EstimatorOptions ----
    /// Relative tolerance must be finite and > 0.
    InvalidTolerance { tol: f64, reason: &'static str },
    /// Outer iteration cap must be positive.
    InvalidMaxOuterIter { max_outer_iter: usize, reason: &'static str },
}

impl std::error::Error for EstimationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EstimationError::Model(err) => Some(err),
            EstimationError::Optimization(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for EstimationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Wrapped ----
            EstimationError::Model(err) => write!(f, "{err}"),
            EstimationError::Optimization(err) => write!(f, "{err}"),

            // ---- Per entity ----
            EstimationError::DegenerateWeight { user } => {
                write!(f, "Degenerate location weights for user '{user}'")
            }

            // ---- Outer loop ----
            EstimationError::DidNotConverge { iterations, last_relative_change } => {
                write!(
                    f,
                    "Estimation did not converge after {iterations} iterations \
                     (last relative change {last_relative_change})"
                )
            }

            // ---- EstimatorOptions ----
            EstimationError::InvalidTolerance { tol, reason } => {
                write!(f, "Invalid relative tolerance {tol}: {reason}")
            }
            EstimationError::InvalidMaxOuterIter { max_outer_iter, reason } => {
                write!(f, "Invalid outer iteration cap {max_outer_iter}: {reason}")
            }
        }
    }
}

impl From<ModelError> for EstimationError {
    fn from(err: ModelError) -> EstimationError {
        EstimationError::Model(err)
    }
}

impl From<OptError> for EstimationError {
    fn from(err: OptError) -> EstimationError {
        EstimationError::Optimization(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    // Purpose
    // -------
    // Verify wrapping conversions keep the source error reachable.
    //
    // Given
    // -----
    // - A `ModelError::EmptyVenueRegistry` converted with `?`-style `From`.
    //
    // Expect
    // ------
    // - `EstimationError::Model`, same Display text, and a `source()`.
    fn model_errors_convert_and_expose_source() {
        // Arrange
        let inner = ModelError::EmptyVenueRegistry;

        // Act
        let err: EstimationError = inner.clone().into();

        // Assert
        assert_eq!(err, EstimationError::Model(inner.clone()));
        assert_eq!(err.to_string(), inner.to_string());
        assert!(err.source().is_some());
        assert!(EstimationError::DegenerateWeight { user: "u".into() }.source().is_none());
    }
}
