//! High-level entry point for maximizing a [`ScopeLikelihood`] over `s > 0`.
//!
//! Wraps the likelihood in a [`BarrierProblem`] (which *minimizes*
//! `-t·ℓ(s) - ln(s)`) and delegates to [`run_backtracking_descent`].
use crate::optimization::{
    errors::OptResult,
    scope_optimizer::{
        adapter::BarrierProblem,
        run::run_backtracking_descent,
        traits::{ScopeLikelihood, ScopeOptions, ScopeOutcome},
    },
};

/// Maximize a scalar log-likelihood `ℓ(s)` subject to `s > 0`.
///
/// # Behavior
/// - Validates the starting scope via `f.check(scope0)`.
/// - Builds a [`BarrierProblem`] with `opts.barrier_weight`.
/// - Runs the backtracking descent and returns its outcome.
///
/// # Parameters
/// - `f`: the likelihood implementing [`ScopeLikelihood`].
/// - `scope0`: starting scope (the venue's current scope).
/// - `opts`: descent options.
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates descent errors, notably `OptError::LineSearchExhausted`.
///
/// # Example
/// ```
/// use venue_scope::optimization::errors::OptResult;
/// use venue_scope::optimization::scope_optimizer::{
///     ScopeLikelihood, ScopeOptions, maximize_scope,
/// };
///
/// struct Peak;
/// impl ScopeLikelihood for Peak {
///     fn value(&self, s: f64) -> OptResult<f64> { Ok(-(s - 2.0).powi(2)) }
///     fn grad(&self, s: f64) -> OptResult<f64> { Ok(-2.0 * (s - 2.0)) }
/// }
///
/// let out = maximize_scope(&Peak, 1.0, &ScopeOptions::default())?;
/// assert!(out.scope > 0.0);
/// # Ok::<(), venue_scope::optimization::errors::OptError>(())
/// ```
pub fn maximize_scope<F: ScopeLikelihood>(
    f: &F, scope0: f64, opts: &ScopeOptions,
) -> OptResult<ScopeOutcome> {
    f.check(scope0)?;
    let problem = BarrierProblem::new(f, opts.barrier_weight);
    run_backtracking_descent(&problem, scope0, opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The `check` hook running before any evaluation.
    //
    // They intentionally DO NOT cover:
    // - Descent behavior (see `run`).
    // -------------------------------------------------------------------------

    struct Flat;

    impl ScopeLikelihood for Flat {
        fn value(&self, _scope: f64) -> OptResult<f64> {
            Ok(0.0)
        }
        fn grad(&self, _scope: f64) -> OptResult<f64> {
            Ok(0.0)
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure an invalid starting scope is rejected up front.
    //
    // Given
    // -----
    // - s0 = -2.
    //
    // Expect
    // ------
    // - `InvalidInitialScope { value: -2.0 }`.
    fn maximize_scope_rejects_invalid_start() {
        // Act
        let err = maximize_scope(&Flat, -2.0, &ScopeOptions::default()).unwrap_err();

        // Assert
        assert_eq!(err, OptError::InvalidInitialScope { value: -2.0 });
    }

    #[test]
    // Purpose
    // -------
    // Verify that a flat likelihood lets the barrier push the scope upward.
    //
    // Given
    // -----
    // - ℓ(s) = 0, s0 = 1, a cap of 3 accepted steps.
    //
    // Expect
    // ------
    // - The scope grows (the barrier cost -ln(s) decreases in s).
    fn flat_likelihood_lets_barrier_grow_scope() {
        // Arrange
        let opts = ScopeOptions::new(0.4, 0.7, 1000, 1e-12, 3, 1.0).expect("valid options");

        // Act
        let out = maximize_scope(&Flat, 1.0, &opts).expect("descent should run");

        // Assert
        assert!(out.scope > 1.0, "scope should grow, got {}", out.scope);
    }
}
