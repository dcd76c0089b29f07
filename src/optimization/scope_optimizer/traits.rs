//! Public API surface for per-venue scope maximization.
//!
//! - [`ScopeLikelihood`]: trait a scalar log-likelihood implements.
//! - [`ScopeOptions`]: configuration of the backtracking barrier descent.
//! - [`ScopeOutcome`]: normalized result returned by [`maximize_scope`].
//!
//! Convention: we *maximize* a log-likelihood `ℓ(s)` over `s > 0` by
//! minimizing the barrier cost `c(s) = -t·ℓ(s) - ln(s)`. Gradients supplied
//! through the trait are gradients of `ℓ`; the adapter flips and extends them.
//!
//! [`maximize_scope`]: crate::optimization::scope_optimizer::maximize_scope
use crate::optimization::{
    errors::{OptError, OptResult},
    scope_optimizer::validation::{
        validate_scope, validate_value, verify_barrier_weight, verify_tol_objective,
        verify_unit_interval,
    },
};
use argmin::core::{TerminationReason, TerminationStatus};

/// Default Armijo sufficient-decrease constant.
pub const DEFAULT_ALPHA: f64 = 0.4;
/// Default step shrink factor.
pub const DEFAULT_BETA: f64 = 0.7;
/// Default number of step reductions before a line search gives up.
pub const DEFAULT_MAX_BACKTRACKS: usize = 1000;
/// Default absolute tolerance on the change of the barrier objective.
pub const DEFAULT_TOL_OBJECTIVE: f64 = 0.01;
/// Default cap on accepted descent steps.
pub const DEFAULT_MAX_ITER: usize = 10_000;
/// Default weight `t` of the log-likelihood inside the barrier objective.
pub const DEFAULT_BARRIER_WEIGHT: f64 = 1.0;

/// Scalar log-likelihood of a single influence scope.
///
/// Implementors evaluate `ℓ(s)` and its derivative at a hypothetical scope
/// without mutating shared state, so one implementor per venue can be
/// evaluated concurrently.
///
/// Required:
/// - `value(s) -> OptResult<f64>`: evaluate `ℓ(s)`.
/// - `grad(s) -> OptResult<f64>`: analytic derivative `dℓ/ds`.
///
/// Optional:
/// - `check(s) -> OptResult<()>`: validation hook called once on the
///   starting scope. The default rejects non-finite or non-positive scopes.
pub trait ScopeLikelihood {
    // Required methods
    fn value(&self, scope: f64) -> OptResult<f64>;
    fn grad(&self, scope: f64) -> OptResult<f64>;

    // Optional methods
    fn check(&self, scope: f64) -> OptResult<()> {
        validate_scope(scope)
    }
}

/// Configuration of the backtracking barrier descent.
///
/// Fields:
/// - `alpha`: Armijo constant; a step is accepted when
///   `c(s') <= c(s) - alpha·η·grad²`.
/// - `beta`: factor applied to the step length `η` after a rejection.
/// - `max_backtracks`: reductions allowed per line search before the venue's
///   update is abandoned.
/// - `tol_objective`: stop when `|c_k - c_{k-1}| < tol_objective`.
/// - `max_iter`: cap on accepted steps.
/// - `barrier_weight`: the fixed weight `t` in `c(s) = -t·ℓ(s) - ln(s)`.
///
/// Default: `(0.4, 0.7, 1000, 0.01, 10_000, 1.0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScopeOptions {
    pub alpha: f64,
    pub beta: f64,
    pub max_backtracks: usize,
    pub tol_objective: f64,
    pub max_iter: usize,
    pub barrier_weight: f64,
}

impl ScopeOptions {
    /// Construct validated descent options.
    ///
    /// # Rules
    /// - `alpha` and `beta` must be finite and lie strictly inside (0, 1).
    /// - `tol_objective` and `barrier_weight` must be finite and `> 0`.
    /// - `max_backtracks` and `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::InvalidAlpha`] / [`OptError::InvalidBeta`] for constants
    ///   outside (0, 1).
    /// - [`OptError::InvalidTolObjective`] / [`OptError::InvalidBarrierWeight`]
    ///   for non-finite or non-positive values.
    /// - [`OptError::InvalidMaxBacktracks`] / [`OptError::InvalidMaxIter`] for
    ///   zero budgets.
    pub fn new(
        alpha: f64, beta: f64, max_backtracks: usize, tol_objective: f64, max_iter: usize,
        barrier_weight: f64,
    ) -> OptResult<Self> {
        verify_unit_interval(alpha)
            .map_err(|reason| OptError::InvalidAlpha { value: alpha, reason })?;
        verify_unit_interval(beta).map_err(|reason| OptError::InvalidBeta { value: beta, reason })?;
        verify_tol_objective(tol_objective)?;
        verify_barrier_weight(barrier_weight)?;
        if max_backtracks == 0 {
            return Err(OptError::InvalidMaxBacktracks {
                max_backtracks,
                reason: "Backtracking budget must be greater than zero.",
            });
        }
        if max_iter == 0 {
            return Err(OptError::InvalidMaxIter {
                max_iter,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        Ok(Self { alpha, beta, max_backtracks, tol_objective, max_iter, barrier_weight })
    }
}

impl Default for ScopeOptions {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            max_backtracks: DEFAULT_MAX_BACKTRACKS,
            tol_objective: DEFAULT_TOL_OBJECTIVE,
            max_iter: DEFAULT_MAX_ITER,
            barrier_weight: DEFAULT_BARRIER_WEIGHT,
        }
    }
}

/// Canonical result returned by `maximize_scope`.
///
/// - `scope`: last accepted scope, always finite and `> 0`.
/// - `log_likelihood`: `ℓ(scope)` (not the barrier cost).
/// - `objective`: barrier cost `c(scope)`.
/// - `iterations`: number of accepted descent steps.
/// - `backtracks`: total step reductions across all line searches.
/// - `converged`: `true` when the objective-change test fired.
/// - `status`: argmin termination status (`SolverConverged` or
///   `MaxItersReached`).
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeOutcome {
    pub scope: f64,
    pub log_likelihood: f64,
    pub objective: f64,
    pub iterations: usize,
    pub backtracks: usize,
    pub converged: bool,
    pub status: TerminationStatus,
}

impl ScopeOutcome {
    /// Build a validated [`ScopeOutcome`] from the final descent state.
    ///
    /// Performs:
    /// - `scope` check via `validate_scope` (finite and positive).
    /// - `log_likelihood` / `objective` checks via `validate_value`.
    /// - Maps `TerminationStatus` into the `converged` flag.
    ///
    /// # Errors
    /// - Propagates any validation error.
    pub fn new(
        scope: f64, log_likelihood: f64, objective: f64, iterations: usize, backtracks: usize,
        status: TerminationStatus,
    ) -> OptResult<Self> {
        validate_scope(scope)?;
        validate_value(scope, log_likelihood)?;
        validate_value(scope, objective)?;
        let converged =
            matches!(status, TerminationStatus::Terminated(TerminationReason::SolverConverged));
        Ok(Self { scope, log_likelihood, objective, iterations, backtracks, converged, status })
    }
}
