//! Builds the area partition and venue neighbor graph from raw coordinates.
//!
//! The indexer works on plain indices into a coordinate slice; the model
//! layer maps them to arena ids and external keys. Output is deterministic
//! for a given slice order.
use tracing::debug;

use crate::{
    model::errors::{ModelError, ModelResult},
    spatial::{
        geometry::{Point, mean_point},
        grid::grid_partition,
        options::{AreaStrategy, CentroidMode, SpatialOptions},
        threshold::threshold_neighbors,
    },
};

/// Identity of an area as produced by the indexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AreaKey {
    /// Grid cell code `row * num_lng_cells + col`.
    Cell(i64),
    /// Threshold area anchored at this venue index.
    Anchor(usize),
}

/// One area of the layout.
///
/// - `members`: venues whose scopes aggregate into the area's scope.
/// - `residents`: venues assigned to the area (their `area_id`). In the grid
///   strategy both sets are the cell's venues; in the threshold strategy the
///   only resident is the anchoring venue.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaLayout {
    pub key: AreaKey,
    pub centroid: Point,
    pub members: Vec<usize>,
    pub residents: Vec<usize>,
}

/// Full output of the indexer.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialLayout {
    pub neighbors: Vec<Vec<usize>>,
    pub areas: Vec<AreaLayout>,
}

/// Strategy-dispatching spatial indexer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialIndexer {
    pub options: SpatialOptions,
}

impl SpatialIndexer {
    pub fn new(options: SpatialOptions) -> Self {
        Self { options }
    }

    /// Index `points`.
    ///
    /// # Errors
    /// - [`ModelError::EmptyVenueRegistry`] for an empty slice.
    /// - Strategy validation errors and [`ModelError::GridTooFine`].
    pub fn index(&self, points: &[Point]) -> ModelResult<SpatialLayout> {
        if points.is_empty() {
            return Err(ModelError::EmptyVenueRegistry);
        }
        self.options.strategy.validate()?;
        let layout = match self.options.strategy {
            AreaStrategy::Threshold { max_distance_m } => {
                self.index_threshold(points, max_distance_m)
            }
            AreaStrategy::Grid { scale } => self.index_grid(points, scale)?,
        };
        debug!(
            venues = points.len(),
            areas = layout.areas.len(),
            edges = layout.neighbors.iter().map(Vec::len).sum::<usize>() / 2,
            "spatial index built"
        );
        Ok(layout)
    }

    fn index_threshold(&self, points: &[Point], max_distance_m: f64) -> SpatialLayout {
        let neighbors = threshold_neighbors(points, max_distance_m);
        let areas = neighbors
            .iter()
            .enumerate()
            .map(|(anchor, nb)| {
                let mut members = nb.clone();
                members.push(anchor);
                members.sort_unstable();
                let centroid = self.centroid(points, &members, points[anchor]);
                AreaLayout {
                    key: AreaKey::Anchor(anchor),
                    centroid,
                    members,
                    residents: vec![anchor],
                }
            })
            .collect();
        SpatialLayout { neighbors, areas }
    }

    fn index_grid(&self, points: &[Point], scale: f64) -> ModelResult<SpatialLayout> {
        let partition = grid_partition(points, scale)?;
        let grid = partition.grid;
        let mut areas: Vec<AreaLayout> = partition
            .cells
            .into_iter()
            .map(|(cell, members)| {
                let centroid = self.centroid(points, &members, grid.center(cell));
                AreaLayout {
                    key: AreaKey::Cell(grid.code(cell)),
                    centroid,
                    residents: members.clone(),
                    members,
                }
            })
            .collect();
        areas.sort_by_key(|a| a.key);
        Ok(SpatialLayout { neighbors: partition.neighbors, areas })
    }

    fn centroid(&self, points: &[Point], members: &[usize], fixed: Point) -> Point {
        match self.options.centroid {
            CentroidMode::Fixed => fixed,
            CentroidMode::Blended => {
                mean_point(members.iter().map(|&i| &points[i])).unwrap_or(fixed)
            }
        }
    }
}
