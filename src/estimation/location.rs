//! Home-location update for users with an undisclosed home.
//!
//! The new location of user `u` is the inverse-variance weighted centroid of
//! the areas of the venues `u` checked into:
//! `weight_v = f(count(u, v)) / S_area(v)²`. Users are independent, so the
//! whole batch is computed in parallel against the committed graph state.
use rayon::prelude::*;

use crate::{
    estimation::errors::{EstimationError, EstimationResult},
    model::{entities::UserId, graph::CheckinGraph},
    spatial::geometry::{Point, weighted_mean},
};

/// Inverse-variance weighted centroid for one user.
///
/// # Errors
/// - [`EstimationError::DegenerateWeight`] when the weights sum to zero or
///   a non-finite value (for example, `Log` weighting with single checkins).
pub fn estimate_location(graph: &CheckinGraph, user: UserId) -> EstimationResult<Point> {
    let weighting = graph.options().weighting;
    let u = graph.user(user);
    let pairs: Vec<(Point, f64)> = u
        .checkins()
        .iter()
        .map(|&(v, count)| {
            let area = graph.area_of(v);
            (area.centroid(), weighting.weight(count) / (area.scope() * area.scope()))
        })
        .collect();
    weighted_mean(pairs.iter().map(|(p, w)| (p, *w)))
        .ok_or_else(|| EstimationError::DegenerateWeight { user: u.key().to_string() })
}

/// Staged location updates for every unknown-home user, in id order.
pub fn estimate_locations(graph: &CheckinGraph) -> Vec<(UserId, EstimationResult<Point>)> {
    graph.unknown_users().par_iter().map(|&u| (u, estimate_location(graph, u))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{
            inputs::{CheckinData, UserLocation},
            options::ModelOptions,
            weighting::CheckinWeighting,
        },
        spatial::options::{AreaStrategy, CentroidMode, SpatialOptions},
    };
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The weighted centroid on a grid with distinct area scopes.
    // - Degenerate weights under `Log` weighting.
    //
    // They intentionally DO NOT cover:
    // - Commit semantics (see `model::graph`).
    // -------------------------------------------------------------------------

    fn build(weighting: CheckinWeighting, counts: [u32; 2]) -> CheckinGraph {
        let data = CheckinData::new(
            HashMap::from([(
                "u".to_string(),
                HashMap::from([("P".to_string(), counts[0]), ("Q".to_string(), counts[1])]),
            )]),
            HashMap::from([
                ("P".to_string(), Point::new(0.0, 0.0)),
                ("Q".to_string(), Point::new(0.0, 3.0)),
                ("R".to_string(), Point::new(0.0, 3.5)),
            ]),
            HashMap::from([("u".to_string(), UserLocation::Unknown)]),
        )
        .expect("consistent");
        let strategy = AreaStrategy::grid(1.0).expect("valid");
        let spatial = SpatialOptions::new(strategy, CentroidMode::Blended).expect("valid");
        let model = ModelOptions { weighting, ..Default::default() };
        CheckinGraph::new(&data, model, spatial).expect("graph builds")
    }

    #[test]
    // Purpose
    // -------
    // Verify the inverse-variance weights on two areas of different size.
    //
    // Given
    // -----
    // - Cell 0 holds P (scope² 25); cell 3 holds Q and R (scope² 50, blended
    //   centroid lng 3.25). One checkin at each of P and Q, raw weighting.
    //
    // Expect
    // ------
    // - lng = (0·1/25 + 3.25·1/50) / (1/25 + 1/50) = 3.25/3.
    fn location_is_inverse_variance_weighted_centroid() {
        // Arrange
        let g = build(CheckinWeighting::Raw, [1, 1]);
        let u = g.user_id("u").expect("u");

        // Act
        let p = estimate_location(&g, u).expect("non-degenerate");

        // Assert
        assert_relative_eq!(p.lat, 0.0);
        assert_relative_eq!(p.lng, 3.25 / 3.0, max_relative = 1e-12);
        assert_eq!(estimate_locations(&g), vec![(u, Ok(p))]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure all-zero weights are reported instead of producing NaN.
    //
    // Given
    // -----
    // - `Log` weighting and one checkin at each venue (ln 1 = 0).
    //
    // Expect
    // ------
    // - `DegenerateWeight { user: "u" }`.
    fn zero_weights_are_degenerate() {
        // Arrange
        let g = build(CheckinWeighting::Log, [1, 1]);
        let u = g.user_id("u").expect("u");

        // Act
        let err = estimate_location(&g, u).unwrap_err();

        // Assert
        assert_eq!(err, EstimationError::DegenerateWeight { user: "u".to_string() });
    }
}
