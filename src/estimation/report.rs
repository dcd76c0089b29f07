//! Iteration trace and exported estimates.
//!
//! - [`IterationStats`]: one record per outer iteration.
//! - [`EstimationReport`]: summary returned by `Coordinator::run`.
//! - [`ScopeEstimates`]: key-addressed snapshot of the graph for callers.
use std::collections::BTreeMap;

use crate::{model::graph::CheckinGraph, spatial::geometry::Point};

/// Statistics of a single outer iteration.
///
/// - `iteration`: 0-based index.
/// - `llh_after_locations`: total log-likelihood after the location commit.
/// - `llh_after_scopes`: total log-likelihood after scopes and area scopes
///   were committed.
/// - `relative_change`: `|prev - llh| / |llh|` against the previous
///   iteration (or the initial value for iteration 0).
/// - `optimized_venues` / `skipped_venues`: venues whose scope update was
///   committed / abandoned.
/// - `moved_users` / `degenerate_users`: unknown-home users relocated /
///   left in place because of degenerate weights.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationStats {
    pub iteration: usize,
    pub llh_after_locations: f64,
    pub llh_after_scopes: f64,
    pub relative_change: f64,
    pub optimized_venues: usize,
    pub skipped_venues: usize,
    pub moved_users: usize,
    pub degenerate_users: usize,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationReport {
    pub initial_llh: f64,
    pub final_llh: f64,
    pub iterations: Vec<IterationStats>,
    pub converged: bool,
}

impl EstimationReport {
    /// Number of outer iterations run.
    pub fn num_iterations(&self) -> usize {
        self.iterations.len()
    }
}

/// Exported state of one area.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaEstimate {
    pub scope: f64,
    pub centroid: Point,
    pub members: Vec<String>,
}

/// Key-addressed estimates.
///
/// - `venue_scopes`: final influence scope per venue key.
/// - `user_locations`: inferred home per previously unknown user key.
/// - `areas`: scope, centroid and member venue keys per area key.
///
/// Ordered maps keep the export deterministic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScopeEstimates {
    pub venue_scopes: BTreeMap<String, f64>,
    pub user_locations: BTreeMap<String, Point>,
    pub areas: BTreeMap<String, AreaEstimate>,
}

impl ScopeEstimates {
    /// Snapshot the committed state of `graph`.
    pub fn from_graph(graph: &CheckinGraph) -> Self {
        let venue_scopes =
            graph.venues().iter().map(|v| (v.key().to_string(), v.scope())).collect();
        let user_locations = graph
            .unknown_users()
            .iter()
            .map(|&u| {
                let user = graph.user(u);
                (user.key().to_string(), user.location())
            })
            .collect();
        let areas = graph
            .areas()
            .iter()
            .map(|a| {
                let members =
                    a.members().iter().map(|&m| graph.venue(m).key().to_string()).collect();
                (
                    a.key().to_string(),
                    AreaEstimate { scope: a.scope(), centroid: a.centroid(), members },
                )
            })
            .collect();
        Self { venue_scopes, user_locations, areas }
    }
}
