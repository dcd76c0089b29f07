//! estimation — alternating maximization of scopes and home locations.
//!
//! Purpose
//! -------
//! Drive the checkin graph towards a joint maximum of the log-likelihood by
//! alternating two block updates: unknown user homes (closed form) and venue
//! scopes (per-venue barrier descent).
//!
//! Key behaviors
//! -------------
//! - [`Coordinator::step`] runs one outer iteration with two-phase
//!   compute/commit updates and records an [`IterationStats`].
//! - [`Coordinator::run`] repeats until the relative change of the
//!   log-likelihood drops below `tol_relative` or `max_outer_iter` is hit.
//! - [`ScopeEstimates`] exports the committed state keyed by external ids.
//!
//! Invariants & assumptions
//! ------------------------
//! - Compute phases read only committed state; commits are sequential.
//! - A venue whose line search fails keeps its previous scope; a user with
//!   degenerate weights keeps its previous location.
//! - Results do not depend on the number of rayon worker threads.
//!
//! Conventions
//! -----------
//! - Convergence is never tested on the first iteration.
//! - `DidNotConverge` is an error value, but the coordinator still holds a
//!   consistent graph afterwards.
//!
//! Downstream usage
//! ----------------
//! - Build [`EstimatorOptions`], construct a [`Coordinator`] from
//!   `model::CheckinData`, call `run`, then read `estimates()`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover options, the location update, step bookkeeping and
//!   convergence; `tests/integration_estimation_pipeline.rs` runs the
//!   scenarios end to end.

pub mod coordinator;
pub mod errors;
pub mod location;
pub mod options;
pub mod report;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::coordinator::Coordinator;
pub use self::errors::{EstimationError, EstimationResult};
pub use self::location::{estimate_location, estimate_locations};
pub use self::options::{DEFAULT_MAX_OUTER_ITER, DEFAULT_TOL_RELATIVE, EstimatorOptions};
pub use self::report::{AreaEstimate, EstimationReport, IterationStats, ScopeEstimates};
