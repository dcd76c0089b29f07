//! numerical_stability — guarded scalar transforms for the competition term.
//!
//! Purpose
//! -------
//! Collect numerically stable scalar transforms used when a venue's scope is
//! compared with its neighbors' through a win probability. Both supported
//! win-probability families (logistic and standard normal CDF) need their
//! logarithm and its derivative evaluated far into the lower tail, where the
//! naïve formulas return `-∞` or `0/0`.
//!
//! Key behaviors
//! -------------
//! - Provide stable logistic helpers (`safe_softplus`, `safe_logistic`,
//!   `log_logistic`) with an explicit overflow cutoff.
//! - Provide standard normal helpers (`std_normal_cdf`, `std_normal_pdf`,
//!   `log_std_normal_cdf`, `std_normal_hazard`) backed by `statrs`'s `erfc`
//!   and an asymptotic Mills-ratio expansion below `NORMAL_TAIL_CUTOFF`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite `f64`; the helpers return finite values for every
//!   finite input. Non-finite inputs propagate as `NaN`/`±∞` and are caught
//!   by the optimizer's cost validation.
//!
//! Conventions
//! -----------
//! - Pure functions only. No logging, I/O or global state; safe to call from
//!   rayon workers inside tight inner loops.
//!
//! Downstream usage
//! ----------------
//! - `model::competition` maps a `CompetitionFn` to `ln P(x)` and
//!   `d/dx ln P(x)` through these helpers.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] compare against naïve formulas on
//!   safe grids, check tail finiteness, continuity at the tail switch, and
//!   the hazard/derivative relationship via central differences.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    NORMAL_TAIL_CUTOFF, SOFTPLUS_CUTOFF, log_logistic, log_std_normal_cdf, safe_logistic,
    safe_softplus, std_normal_cdf, std_normal_hazard, std_normal_pdf,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use venue_scope::optimization::numerical_stability::prelude::*;
//
// to import the main numerical-stability surface in a single line.

pub mod prelude {
    pub use super::transformations::{
        log_logistic, log_std_normal_cdf, safe_logistic, safe_softplus, std_normal_cdf,
        std_normal_hazard,
    };
}
