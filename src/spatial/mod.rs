//! spatial — area partition and venue neighbor graph.
//!
//! Purpose
//! -------
//! Turn raw venue coordinates into the two structures the likelihood needs:
//! a partition of venues into areas (each with a centroid and a set of
//! member venues whose scopes aggregate into the area scope) and a symmetric
//! venue neighbor graph used by the competition term.
//!
//! Key behaviors
//! -------------
//! - `AreaStrategy::Threshold`: haversine neighbors under a metre threshold,
//!   found by a latitude-sorted sweep computed in parallel with rayon; every
//!   venue anchors its own area.
//! - `AreaStrategy::Grid`: square cells over the bounding box; cell mates
//!   form an area and neighbors are the venues of the 3×3 cell block.
//! - `CentroidMode` chooses between fixed centroids (cell center, anchor
//!   coordinate) and the blended mean of member coordinates.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite coordinates; the model layer rejects others before
//!   indexing.
//! - Neighbor lists are symmetric, sorted, and free of self-loops.
//! - Every venue is a resident of exactly one area.
//! - Output depends only on the slice order of the input coordinates.
//!
//! Conventions
//! -----------
//! - Venues are addressed by their index in the input slice; the model layer
//!   maps indices to arena ids.
//! - Threshold distances are metres; grid scales and likelihood distances
//!   are raw coordinate units.
//!
//! Downstream usage
//! ----------------
//! - `model::CheckinGraph::new` runs [`SpatialIndexer::index`] once and
//!   materializes venues and areas from the returned [`SpatialLayout`].
//!
//! Testing notes
//! -------------
//! - Unit tests cover the strict threshold, sweep/brute-force agreement,
//!   symmetry, grid codes and adjacency, centroid modes, and residency.

pub mod geometry;
pub mod grid;
pub mod indexer;
pub mod options;
pub mod threshold;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::geometry::{BoundingBox, EARTH_RADIUS_M, Point};
pub use self::indexer::{AreaKey, AreaLayout, SpatialIndexer, SpatialLayout};
pub use self::options::{AreaStrategy, CentroidMode, DEFAULT_GRID_SCALE, SpatialOptions};
