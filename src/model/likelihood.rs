//! Log-likelihood of the checkin graph.
//!
//! Purpose
//! -------
//! Evaluate the two likelihood components over the current graph state and
//! expose the venue-local restriction used by the scope optimizer.
//!
//! Key behaviors
//! -------------
//! - Attraction: every (user, venue) pair with `w` checkins contributes
//!   `w·(-2 ln S - d²/(2S²))`, with `S` the scope of the venue's area and
//!   `d²` the squared coordinate distance between the user and that area's
//!   centroid. The total always uses raw counts.
//! - Competition: every venue `v` contributes
//!   `w_v · Σ_{n ∈ neighbors(v)} ln P(s_v - s_n)` with `w_v` its raw total
//!   checkin count.
//! - [`VenueLikelihood`] freezes everything except one venue's scope `s`:
//!   for each area containing the venue it keeps the residual squared scope
//!   `R = S² - s_v²` (clamped at 0) and the weighted sums `Σw` and `Σw·d²`
//!   of the users of that area's residents, so evaluating `ℓ(s)` costs
//!   `O(#areas + #neighbors)`. Here `w = f(count)` with the configured
//!   `CheckinWeighting`; value and derivative share the same `f`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Area scopes are consistent with venue scopes (the graph refreshes them
//!   after each commit); residuals are derived from them.
//! - Under `CheckinWeighting::Raw`, `VenueLikelihood` differs from the total
//!   log-likelihood by a constant that does not depend on the venue's scope.
//!
//! Conventions
//! -----------
//! - Totals are computed per user / per venue in parallel and summed in id
//!   order, so repeated evaluations are bit-identical.
use rayon::prelude::*;

use crate::{
    model::{
        competition::CompetitionFn,
        entities::{User, VenueId},
        graph::CheckinGraph,
    },
    optimization::{errors::OptResult, scope_optimizer::ScopeLikelihood},
};

impl CheckinGraph {
    /// Total log-likelihood under the configured components.
    pub fn log_likelihood(&self) -> f64 {
        let mode = self.options().mode;
        let mut total = 0.0;
        if mode.has_attraction() {
            total += attraction_log_likelihood(self);
        }
        if mode.has_competition() {
            total += competition_log_likelihood(self);
        }
        total
    }

    /// Venue-local log-likelihood at a hypothetical scope, without mutation.
    pub fn venue_log_likelihood(&self, venue: VenueId, scope: f64) -> f64 {
        VenueLikelihood::new(self, venue).evaluate(scope)
    }
}

/// Attraction component summed over all users.
pub fn attraction_log_likelihood(graph: &CheckinGraph) -> f64 {
    let parts: Vec<f64> =
        graph.users().par_iter().map(|user| user_attraction(graph, user)).collect();
    parts.into_iter().sum()
}

/// Competition component summed over all venues.
pub fn competition_log_likelihood(graph: &CheckinGraph) -> f64 {
    let competition = graph.options().competition;
    let parts: Vec<f64> = graph
        .venues()
        .par_iter()
        .map(|venue| {
            let own = venue.total_checkins() as f64;
            if own == 0.0 {
                return 0.0;
            }
            let s = venue.scope();
            own * venue
                .neighbors()
                .iter()
                .map(|&n| competition.log_win(s - graph.venue(n).scope()))
                .sum::<f64>()
        })
        .collect();
    parts.into_iter().sum()
}

fn user_attraction(graph: &CheckinGraph, user: &User) -> f64 {
    let location = user.location();
    user.checkins()
        .iter()
        .map(|&(v, count)| {
            let w = f64::from(count);
            let area = graph.area_of(v);
            let sq = area.scope() * area.scope();
            let d2 = location.squared_distance(&area.centroid());
            w * (-sq.ln() - d2 / (2.0 * sq))
        })
        .sum()
}

/// Frozen attraction data of one area seen from one member venue.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AreaTerm {
    residual: f64,
    weight: f64,
    weighted_sq_dist: f64,
}

/// Log-likelihood of one venue's scope with everything else held fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueLikelihood {
    venue: VenueId,
    competition: CompetitionFn,
    own_weight: f64,
    terms: Vec<AreaTerm>,
    rivals: Vec<(f64, f64)>,
}

impl VenueLikelihood {
    /// Snapshot the terms involving `venue` from the current graph state.
    pub fn new(graph: &CheckinGraph, venue: VenueId) -> Self {
        let opts = graph.options();
        let v = graph.venue(venue);
        let own_scope_sq = v.scope() * v.scope();

        let terms = if opts.mode.has_attraction() {
            v.member_of()
                .iter()
                .filter_map(|&a| {
                    let area = graph.area(a);
                    let centroid = area.centroid();
                    let (mut weight, mut weighted_sq_dist) = (0.0, 0.0);
                    for &r in area.residents() {
                        for &u in graph.venue(r).users() {
                            let user = graph.user(u);
                            let w = opts.weighting.weight(user.count_at(r));
                            weight += w;
                            weighted_sq_dist += w * user.location().squared_distance(&centroid);
                        }
                    }
                    let residual = (area.scope() * area.scope() - own_scope_sq).max(0.0);
                    (weight > 0.0).then_some(AreaTerm { residual, weight, weighted_sq_dist })
                })
                .collect()
        } else {
            Vec::new()
        };

        let rivals = if opts.mode.has_competition() {
            v.neighbors()
                .iter()
                .map(|&n| {
                    let rival = graph.venue(n);
                    (rival.scope(), rival.total_checkins() as f64)
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            venue,
            competition: opts.competition,
            own_weight: v.total_checkins() as f64,
            terms,
            rivals,
        }
    }

    pub fn venue(&self) -> VenueId {
        self.venue
    }

    /// `ℓ(s)`.
    pub fn evaluate(&self, scope: f64) -> f64 {
        let s2 = scope * scope;
        let attraction: f64 = self
            .terms
            .iter()
            .map(|t| {
                let sq = t.residual + s2;
                -t.weight * sq.ln() - t.weighted_sq_dist / (2.0 * sq)
            })
            .sum();
        let competition: f64 = self
            .rivals
            .iter()
            .map(|&(s_n, w_n)| {
                self.own_weight * self.competition.log_win(scope - s_n)
                    + w_n * self.competition.log_win(s_n - scope)
            })
            .sum();
        attraction + competition
    }

    /// `dℓ/ds`.
    pub fn derivative(&self, scope: f64) -> f64 {
        let s2 = scope * scope;
        let attraction: f64 = self
            .terms
            .iter()
            .map(|t| {
                let sq = t.residual + s2;
                -2.0 * scope * t.weight / sq + scope * t.weighted_sq_dist / (sq * sq)
            })
            .sum();
        let competition: f64 = self
            .rivals
            .iter()
            .map(|&(s_n, w_n)| {
                self.own_weight * self.competition.dlog_win(scope - s_n)
                    - w_n * self.competition.dlog_win(s_n - scope)
            })
            .sum();
        attraction + competition
    }
}

impl ScopeLikelihood for VenueLikelihood {
    fn value(&self, scope: f64) -> OptResult<f64> {
        Ok(self.evaluate(scope))
    }

    fn grad(&self, scope: f64) -> OptResult<f64> {
        Ok(self.derivative(scope))
    }
}
