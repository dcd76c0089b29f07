//! venue_scope — influence-scope and home-location estimation from checkins.
//!
//! Purpose
//! -------
//! Given a table of user checkins at geolocated venues, estimate for every
//! venue a positive influence scope (the spread of a Gaussian attraction
//! kernel around the venue's area) and, for users with an undisclosed home,
//! a home location, by maximizing a joint log-likelihood.
//!
//! Key behaviors
//! -------------
//! - `spatial`: partition venues into areas and build the neighbor graph
//!   (haversine threshold or square grid).
//! - `model`: own users, venues and areas in an arena and evaluate the
//!   attraction and competition log-likelihood.
//! - `optimization`: per-venue log-barrier descent with Armijo backtracking,
//!   exposed through argmin's problem traits.
//! - `estimation`: alternate location and scope updates until the relative
//!   change of the log-likelihood is small.
//!
//! Invariants & assumptions
//! ------------------------
//! - Venue scopes are finite and strictly positive at all times.
//! - Area scopes are `sqrt(Σ member.scope²)` after every commit.
//! - All parallel phases read committed state only; results are independent
//!   of thread count and of hash-map iteration order.
//!
//! Conventions
//! -----------
//! - Coordinates are `(lat, lng)` in decimal degrees. Neighbor thresholds
//!   are metres; scopes, grid scales and likelihood distances are
//!   coordinate units.
//! - Errors are layer-specific enums (`model::ModelError`, which also covers
//!   spatial configuration, and `optimization::errors::OptError`) with result
//!   aliases and `From` conversions into `estimation::EstimationError`.
//! - The library emits `tracing` events and never installs a subscriber.
//!
//! Downstream usage
//! ----------------
//! ```no_run
//! use std::collections::HashMap;
//! use venue_scope::prelude::*;
//!
//! let data = CheckinData::new(
//!     HashMap::from([("u1".to_string(), HashMap::from([("A".to_string(), 10)]))]),
//!     HashMap::from([("A".to_string(), Point::new(0.0, 0.0))]),
//!     HashMap::from([("u1".to_string(), UserLocation::Unknown)]),
//! )?;
//! let mut coordinator = Coordinator::new(&data, EstimatorOptions::default())?;
//! let report = coordinator.run()?;
//! let estimates = coordinator.estimates();
//! println!("{} iterations, A = {:?}", report.num_iterations(), estimates.venue_scopes.get("A"));
//! # Ok::<(), EstimationError>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests live next to the code in every module; the end-to-end
//!   scenarios are in `tests/integration_estimation_pipeline.rs`.

pub mod estimation;
pub mod model;
pub mod optimization;
pub mod spatial;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use venue_scope::prelude::*;
//
// to import the inputs, options and driver in a single line.

pub mod prelude {
    pub use crate::estimation::{
        Coordinator, EstimationError, EstimationReport, EstimationResult, EstimatorOptions,
        IterationStats, ScopeEstimates,
    };
    pub use crate::model::{
        CheckinData, CheckinGraph, CheckinWeighting, CompetitionFn, LikelihoodMode, ModelError,
        ModelOptions, UserLocation,
    };
    pub use crate::optimization::scope_optimizer::ScopeOptions;
    pub use crate::spatial::{AreaStrategy, CentroidMode, Point, SpatialOptions};
}
