//! Validation helpers for scope optimization.
//!
//! - **Option checks**: [`verify_unit_interval`], [`verify_tol_objective`],
//!   [`verify_barrier_weight`] guard the constants of the descent.
//! - **State checks**: [`validate_scope`] enforces the positivity invariant
//!   of influence scopes; [`validate_value`] and [`validate_gradient`] reject
//!   non-finite objective values and derivatives.
use crate::optimization::errors::{OptError, OptResult};

/// Check that a constant lies strictly inside (0, 1).
///
/// Returns the rejection reason so callers can attach it to the variant that
/// names the offending option.
pub fn verify_unit_interval(value: f64) -> Result<(), &'static str> {
    if !value.is_finite() {
        return Err("Value must be finite.");
    }
    if value <= 0.0 || value >= 1.0 {
        return Err("Value must lie strictly between 0 and 1.");
    }
    Ok(())
}

/// Validate the objective-change tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolObjective`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_objective(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidTolObjective { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidTolObjective { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

/// Validate the barrier weight `t`.
///
/// # Errors
/// Returns [`OptError::InvalidBarrierWeight`] if the value is non-finite or ≤ 0.0.
pub fn verify_barrier_weight(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::InvalidBarrierWeight { value, reason: "Weight must be finite." });
    }
    if value <= 0.0 {
        return Err(OptError::InvalidBarrierWeight { value, reason: "Weight must be positive." });
    }
    Ok(())
}

/// Validate that a scope is finite and strictly positive.
///
/// # Errors
/// Returns [`OptError::InvalidInitialScope`] otherwise.
pub fn validate_scope(scope: f64) -> OptResult<()> {
    if !(scope.is_finite() && scope > 0.0) {
        return Err(OptError::InvalidInitialScope { value: scope });
    }
    Ok(())
}

/// Validate that an objective or log-likelihood value is finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(scope: f64, value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { scope, value });
    }
    Ok(())
}

/// Validate that a derivative is finite.
///
/// # Errors
/// Returns [`OptError::InvalidGradient`] if the value is `NaN` or infinite.
pub fn validate_gradient(scope: f64, value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::InvalidGradient {
            scope,
            value,
            reason: "Gradient must be finite.",
        });
    }
    Ok(())
}
