//! Alternating maximization driver.
//!
//! Each outer iteration runs
//! `UPDATE_LOCATIONS → UPDATE_SCOPES → UPDATE_AREA_SCOPES → EVALUATE_LLH`.
//! Every compute phase reads only the committed graph and collects its
//! results into a staging vector (`par_iter().map().collect()`); the
//! coordinator then commits the batch through its exclusive `&mut` access.
//! Per-entity failures (degenerate user weights, exhausted line searches)
//! leave that entity unchanged and are counted in [`IterationStats`].
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    estimation::{
        errors::{EstimationError, EstimationResult},
        location::estimate_locations,
        options::EstimatorOptions,
        report::{EstimationReport, IterationStats, ScopeEstimates},
    },
    model::{
        entities::VenueId, graph::CheckinGraph, inputs::CheckinData, likelihood::VenueLikelihood,
    },
    optimization::{
        errors::OptResult,
        scope_optimizer::{ScopeOptions, ScopeOutcome, maximize_scope},
    },
};

/// Owner of the checkin graph for the duration of an estimation run.
#[derive(Debug, Clone)]
pub struct Coordinator {
    graph: CheckinGraph,
    options: EstimatorOptions,
    initial_llh: f64,
    current_llh: f64,
    history: Vec<IterationStats>,
    converged: bool,
}

impl Coordinator {
    /// Validate options, build the graph, and evaluate the initial
    /// log-likelihood.
    ///
    /// # Errors
    /// - Option validation errors.
    /// - [`EstimationError::Model`] for any construction failure of the
    ///   graph (missing data, unseedable users, invalid strategy).
    pub fn new(data: &CheckinData, options: EstimatorOptions) -> EstimationResult<Self> {
        options.validate()?;
        let graph = CheckinGraph::new(data, options.model, options.spatial)?;
        let initial_llh = graph.log_likelihood();
        info!(llh = initial_llh, "initial log-likelihood");
        Ok(Self {
            graph,
            options,
            initial_llh,
            current_llh: initial_llh,
            history: Vec::new(),
            converged: false,
        })
    }

    pub fn graph(&self) -> &CheckinGraph {
        &self.graph
    }

    pub fn options(&self) -> &EstimatorOptions {
        &self.options
    }

    /// Per-iteration trace so far.
    pub fn history(&self) -> &[IterationStats] {
        &self.history
    }

    /// Log-likelihood of the committed state.
    pub fn current_llh(&self) -> f64 {
        self.current_llh
    }

    /// Key-addressed snapshot of the committed state.
    pub fn estimates(&self) -> ScopeEstimates {
        ScopeEstimates::from_graph(&self.graph)
    }

    /// Summary of the iterations run so far.
    pub fn report(&self) -> EstimationReport {
        EstimationReport {
            initial_llh: self.initial_llh,
            final_llh: self.current_llh,
            iterations: self.history.clone(),
            converged: self.converged,
        }
    }

    /// Run exactly one outer iteration and return its statistics.
    ///
    /// # Errors
    /// - [`EstimationError::Optimization`] for optimizer failures that are
    ///   not tied to one venue's numerics.
    /// - [`EstimationError::Model`] if a commit is rejected.
    pub fn step(&mut self) -> EstimationResult<IterationStats> {
        let iteration = self.history.len();

        // ---- Locations ----
        let mut staged_locations = Vec::with_capacity(self.graph.unknown_users().len());
        let mut degenerate_users = 0;
        for (user, result) in estimate_locations(&self.graph) {
            match result {
                Ok(location) => staged_locations.push((user, location)),
                Err(err) => {
                    warn!(iteration, user = self.graph.user(user).key(), %err, "location kept");
                    degenerate_users += 1;
                }
            }
        }
        let moved_users = self.graph.commit_locations(&staged_locations)?;
        let llh_after_locations = self.graph.log_likelihood();

        // ---- Scopes ----
        let mut staged_scopes = Vec::with_capacity(self.graph.active_venues().len());
        let mut skipped_venues = 0;
        for (venue, outcome) in optimize_scopes(&self.graph, &self.options.scope) {
            let key = self.graph.venue(venue).key();
            match outcome {
                Ok(out) => {
                    debug!(
                        iteration,
                        venue = key,
                        scope = out.scope,
                        steps = out.iterations,
                        backtracks = out.backtracks,
                        converged = out.converged,
                        "scope optimized"
                    );
                    staged_scopes.push((venue, out.scope));
                }
                Err(err) if err.is_numeric() => {
                    warn!(iteration, venue = key, %err, "scope update skipped");
                    skipped_venues += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
        let optimized_venues = staged_scopes.len();
        self.graph.commit_scopes(&staged_scopes)?;
        self.graph.refresh_area_scopes();

        // ---- Evaluate ----
        let llh = self.graph.log_likelihood();
        let relative_change = relative_change(self.current_llh, llh);
        self.current_llh = llh;
        info!(
            iteration,
            llh,
            relative_change,
            optimized_venues,
            skipped_venues,
            degenerate_users,
            "outer iteration finished"
        );

        let stats = IterationStats {
            iteration,
            llh_after_locations,
            llh_after_scopes: llh,
            relative_change,
            optimized_venues,
            skipped_venues,
            moved_users,
            degenerate_users,
        };
        self.history.push(stats.clone());
        Ok(stats)
    }

    /// Iterate until the relative change of the log-likelihood falls below
    /// `tol_relative` (tested from the second iteration on) or the outer
    /// cap is reached.
    ///
    /// The cap counts every iteration this coordinator has run, including
    /// earlier calls to [`Coordinator::step`].
    ///
    /// # Errors
    /// - [`EstimationError::DidNotConverge`] when the cap is hit; the graph
    ///   keeps the last committed state and [`Coordinator::report`] /
    ///   [`Coordinator::estimates`] remain available.
    /// - Any error of [`Coordinator::step`].
    pub fn run(&mut self) -> EstimationResult<EstimationReport> {
        let mut last_relative_change = f64::INFINITY;
        while self.history.len() < self.options.max_outer_iter {
            let stats = self.step()?;
            last_relative_change = stats.relative_change;
            if stats.iteration > 0 && stats.relative_change < self.options.tol_relative {
                self.converged = true;
                info!(iterations = self.history.len(), llh = self.current_llh, "converged");
                return Ok(self.report());
            }
        }
        warn!(
            iterations = self.history.len(),
            last_relative_change, "outer iteration cap reached"
        );
        Err(EstimationError::DidNotConverge {
            iterations: self.history.len(),
            last_relative_change,
        })
    }
}

/// Optimize every active venue against the committed graph.
fn optimize_scopes(
    graph: &CheckinGraph, opts: &ScopeOptions,
) -> Vec<(VenueId, OptResult<ScopeOutcome>)> {
    graph
        .active_venues()
        .par_iter()
        .map(|&v| {
            let f = VenueLikelihood::new(graph, v);
            (v, maximize_scope(&f, graph.venue(v).scope(), opts))
        })
        .collect()
}

/// `|prev - current| / |current|`, with `0/0 = 0`.
fn relative_change(prev: f64, current: f64) -> f64 {
    let diff = (prev - current).abs();
    if diff == 0.0 {
        return 0.0;
    }
    diff / current.abs()
}
