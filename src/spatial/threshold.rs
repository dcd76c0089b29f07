//! Threshold neighbor graph over great-circle distance.
//!
//! Two venues are neighbors when their haversine distance is strictly below
//! the threshold. Candidates are scanned along a latitude-sorted order; the
//! scan for a venue stops at the first candidate whose latitude gap alone
//! exceeds the threshold, since the great-circle distance is never shorter
//! than the meridian arc between the two latitudes.
use rayon::prelude::*;

use crate::spatial::geometry::{METRES_PER_DEGREE, Point};

/// Symmetric, sorted neighbor lists (indices into `points`), no self-loops.
pub fn threshold_neighbors(points: &[Point], max_distance_m: f64) -> Vec<Vec<usize>> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| points[a].lat.total_cmp(&points[b].lat).then(a.cmp(&b)));
    let max_dlat = max_distance_m / METRES_PER_DEGREE;

    let pairs: Vec<Vec<(usize, usize)>> = (0..order.len())
        .into_par_iter()
        .map(|pos| {
            let i = order[pos];
            let origin = &points[i];
            let mut found = Vec::new();
            for &j in &order[pos + 1..] {
                if points[j].lat - origin.lat > max_dlat {
                    break;
                }
                if origin.haversine_m(&points[j]) < max_distance_m {
                    found.push((i, j));
                }
            }
            found
        })
        .collect();

    let mut neighbors = vec![Vec::new(); points.len()];
    for (i, j) in pairs.into_iter().flatten() {
        neighbors[i].push(j);
        neighbors[j].push(i);
    }
    for list in &mut neighbors {
        list.sort_unstable();
    }
    neighbors
}
