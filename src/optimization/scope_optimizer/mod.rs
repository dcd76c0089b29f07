//! scope_optimizer — positivity-constrained maximization of one venue's
//! influence scope.
//!
//! Purpose
//! -------
//! Provide the per-venue inner solver of the alternating estimation loop.
//! Callers implement [`ScopeLikelihood`] for a scalar log-likelihood `ℓ(s)`
//! and invoke [`maximize_scope`] to run gradient descent with Armijo
//! backtracking on a log-barrier reformulation.
//!
//! Key behaviors
//! -------------
//! - Convert `ℓ(s)` into the barrier cost `c(s) = -t·ℓ(s) - ln(s)` via
//!   [`adapter::BarrierProblem`], which also implements argmin's
//!   `CostFunction` and `Gradient` traits.
//! - Run the descent in [`run::run_backtracking_descent`]: full step first,
//!   geometric shrinking by `beta`, acceptance by the sufficient-decrease
//!   test with constant `alpha`, and rejection of non-finite candidates.
//! - Report results as a validated [`ScopeOutcome`] carrying an argmin
//!   `TerminationStatus`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every accepted scope is finite and strictly positive: candidates at or
//!   below zero have an infinite barrier cost and are never accepted.
//! - A line search that exhausts its budget is an error
//!   (`OptError::LineSearchExhausted`); the outcome of a failed venue is
//!   never a partially updated scope.
//! - [`ScopeLikelihood`] implementors evaluate without mutation, so many
//!   venues can be optimized concurrently.
//!
//! Conventions
//! -----------
//! - Gradients supplied by implementors are `dℓ/ds`; the adapter negates
//!   and adds the barrier term.
//! - Convergence uses the absolute change of the barrier cost and is only
//!   tested after [`run::MIN_STEPS_BEFORE_CONVERGENCE`] accepted steps.
//!
//! Downstream usage
//! ----------------
//! - `model::likelihood::VenueLikelihood` implements [`ScopeLikelihood`];
//!   the estimation coordinator calls [`maximize_scope`] for every venue
//!   with at least one checkin.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover option validation, sign conventions and
//!   finite-difference agreement of the barrier derivative, convergence and
//!   positivity on toy likelihoods, NaN rejection, and budget exhaustion.

pub mod adapter;
pub mod api;
pub mod run;
pub mod traits;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::adapter::BarrierProblem;
pub use self::api::maximize_scope;
pub use self::traits::{
    DEFAULT_ALPHA, DEFAULT_BARRIER_WEIGHT, DEFAULT_BETA, DEFAULT_MAX_BACKTRACKS,
    DEFAULT_MAX_ITER, DEFAULT_TOL_OBJECTIVE, ScopeLikelihood, ScopeOptions, ScopeOutcome,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use venue_scope::optimization::scope_optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::maximize_scope;
    pub use super::traits::{ScopeLikelihood, ScopeOptions, ScopeOutcome};
}
