//! model — checkin graph and probabilistic model.
//!
//! Purpose
//! -------
//! Own the state of the estimation problem (users, venues, areas) and
//! evaluate its log-likelihood. Inputs arrive as plain maps
//! ([`CheckinData`]); construction resolves keys into dense arena ids and
//! runs the spatial indexer once.
//!
//! Key behaviors
//! -------------
//! - [`CheckinGraph::new`] validates inputs, seeds unknown homes at the
//!   checkin-weighted center of their venues, and materializes areas.
//! - [`CheckinGraph::log_likelihood`] sums the attraction and competition
//!   components selected by [`LikelihoodMode`].
//! - [`VenueLikelihood`] restricts the likelihood to one venue's scope and
//!   implements `ScopeLikelihood` for the optimizer.
//! - State changes only through [`CheckinGraph::commit_scopes`],
//!   [`CheckinGraph::commit_locations`], and
//!   [`CheckinGraph::refresh_area_scopes`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Venue scopes are finite and strictly positive at all times.
//! - Neighbor lists are symmetric; every venue has exactly one area.
//! - Area scopes equal `sqrt(Σ member.scope²)` after construction and after
//!   every refresh.
//! - Known user homes never move.
//!
//! Conventions
//! -----------
//! - Users and venues are ordered by external key; ids are positions in the
//!   arena and stay stable for the life of the graph.
//! - Distances inside the likelihood are squared coordinate differences;
//!   metres only appear in the threshold neighbor search.
//!
//! Downstream usage
//! ----------------
//! - The estimation coordinator owns a `CheckinGraph`, builds a
//!   `VenueLikelihood` per active venue in parallel, and commits results.
//!
//! Testing notes
//! -------------
//! - Unit tests cover input validation, arena construction, commit
//!   semantics, closed-form likelihood values, local/total consistency, and
//!   derivative agreement with `finitediff`.

pub mod competition;
pub mod entities;
pub mod errors;
pub mod graph;
pub mod inputs;
pub mod likelihood;
pub mod options;
pub mod weighting;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::competition::CompetitionFn;
pub use self::entities::{Area, AreaId, User, UserId, Venue, VenueId};
pub use self::errors::{ModelError, ModelResult};
pub use self::graph::CheckinGraph;
pub use self::inputs::{CheckinData, UserLocation};
pub use self::likelihood::{
    VenueLikelihood, attraction_log_likelihood, competition_log_likelihood,
};
pub use self::options::{DEFAULT_INITIAL_SCOPE, LikelihoodMode, ModelOptions};
pub use self::weighting::CheckinWeighting;
