//! Execution helper that runs the backtracking barrier descent on one scope
//! and returns a crate-friendly [`ScopeOutcome`].
use crate::optimization::{
    errors::{OptError, OptResult},
    scope_optimizer::{
        adapter::BarrierProblem,
        traits::{ScopeLikelihood, ScopeOptions, ScopeOutcome},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};

/// Accepted steps required before the objective-change test may fire.
pub const MIN_STEPS_BEFORE_CONVERGENCE: usize = 3;

/// A step that passed the sufficient-decrease test.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AcceptedStep {
    scope: f64,
    objective: f64,
    reductions: usize,
}

/// Run gradient descent with Armijo backtracking on a barrier problem.
///
/// Each iteration computes the analytic derivative `g` of the barrier cost,
/// proposes `s' = s - η·g` starting from `η = 1`, and shrinks `η` by
/// `opts.beta` until `c(s') <= c(s) - opts.alpha·η·g²` with both sides
/// finite. Candidates outside the barrier's domain (`s' <= 0`) evaluate to a
/// non-finite cost and are rejected like any other failed test.
///
/// # Arguments
/// - `problem`: the barrier problem wrapping a [`ScopeLikelihood`].
/// - `scope0`: starting scope; must already satisfy `scope0 > 0`.
/// - `opts`: descent constants and budgets.
///
/// # Returns
/// A [`ScopeOutcome`] with status `SolverConverged` once
/// `|c_k - c_{k-1}| < opts.tol_objective` after at least
/// [`MIN_STEPS_BEFORE_CONVERGENCE`] accepted steps (or when the derivative
/// vanishes), or `MaxItersReached` after `opts.max_iter` accepted steps.
///
/// # Errors
/// - [`OptError::LineSearchExhausted`] when no step passes within
///   `opts.max_backtracks` reductions. The caller keeps its previous scope.
/// - [`OptError::NonFiniteCost`] if the starting cost is not finite.
/// - [`OptError::InvalidGradient`] if a derivative is not finite.
/// - Propagates any other error from the likelihood.
pub fn run_backtracking_descent<F: ScopeLikelihood>(
    problem: &BarrierProblem<'_, F>, scope0: f64, opts: &ScopeOptions,
) -> OptResult<ScopeOutcome> {
    let mut scope = scope0;
    let mut objective = problem.objective(scope)?;
    let mut iterations = 0usize;
    let mut backtracks = 0usize;

    let reason = loop {
        if iterations >= opts.max_iter {
            break TerminationReason::MaxItersReached;
        }
        let grad = problem.objective_gradient(scope)?;
        if grad == 0.0 {
            break TerminationReason::SolverConverged;
        }
        let step = backtrack(problem, scope, objective, grad, opts)?;
        let change = (step.objective - objective).abs();
        scope = step.scope;
        objective = step.objective;
        backtracks += step.reductions;
        iterations += 1;
        if iterations >= MIN_STEPS_BEFORE_CONVERGENCE && change < opts.tol_objective {
            break TerminationReason::SolverConverged;
        }
    };

    let log_likelihood = problem.f.value(scope)?;
    ScopeOutcome::new(
        scope,
        log_likelihood,
        objective,
        iterations,
        backtracks,
        TerminationStatus::Terminated(reason),
    )
}

// ---- Helper Methods ----

/// One Armijo line search along `-grad` from `scope`.
fn backtrack<F: ScopeLikelihood>(
    problem: &BarrierProblem<'_, F>, scope: f64, objective: f64, grad: f64, opts: &ScopeOptions,
) -> OptResult<AcceptedStep> {
    let decrease = grad * grad;
    let mut eta = 1.0;
    for reductions in 0..=opts.max_backtracks {
        let candidate = scope - eta * grad;
        let rhs = objective - opts.alpha * eta * decrease;
        match problem.objective(candidate) {
            Ok(value) if rhs.is_finite() && value <= rhs => {
                return Ok(AcceptedStep { scope: candidate, objective: value, reductions });
            }
            Ok(_) | Err(OptError::NonFiniteCost { .. }) => {}
            Err(e) => return Err(e),
        }
        eta *= opts.beta;
    }
    Err(OptError::LineSearchExhausted { scope, attempts: opts.max_backtracks })
}
