//! optimization — scope solver, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! Provide the optimization layer used by the estimation loop: a
//! positivity-constrained scalar maximizer for venue influence scopes,
//! numerically stable transforms for the competition term, and a single
//! error/result surface.
//!
//! Key behaviors
//! -------------
//! - Expose [`scope_optimizer::maximize_scope`], a log-barrier backtracking
//!   descent for maximizing `ℓ(s)` over `s > 0`.
//! - Supply guarded scalar transforms (`numerical_stability`) for
//!   `ln σ(x)`, `ln Φ(x)` and their derivatives.
//! - Normalize configuration issues, numerical failures, and argmin errors
//!   into [`errors::OptError`] with the alias `OptResult<T>`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Invalid states are reported as `OptError`, not panics.
//! - Failures of one venue's problem never touch other venues; callers
//!   decide whether a numeric error is fatal (see `OptError::is_numeric`).
//!
//! Conventions
//! -----------
//! - Solvers conceptually maximize a log-likelihood by minimizing a cost;
//!   outcomes report both.
//! - This module does not log; the estimation layer reports outcomes
//!   through `tracing`.
//!
//! Downstream usage
//! ----------------
//! - `model::likelihood` implements `ScopeLikelihood` per venue and uses
//!   the numerical-stability helpers through `model::competition`.
//! - Front-ends can import the curated surface via
//!   `optimization::prelude::*`.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; the integration test under
//!   `tests/` exercises the solver through the full estimation loop.

pub mod errors;
pub mod numerical_stability;
pub mod scope_optimizer;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use venue_scope::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::numerical_stability::prelude::*;
    pub use super::scope_optimizer::prelude::*;
}
