//! Square-cell grid partition over the venue bounding box.
//!
//! Cells have side `scale` in coordinate units and are indexed from the
//! south-west corner of the bounding box. The longitude cell count is
//! `floor((max_lng - min_lng) / scale) + 1`, so venues on the eastern edge
//! still fall inside the grid.
use std::collections::BTreeMap;

use crate::{
    model::errors::{ModelError, ModelResult},
    spatial::geometry::{BoundingBox, Point},
};

/// Integer `(row, column)` index of a grid cell.
pub type CellIndex = (i64, i64);

/// Grid geometry derived from a bounding box and a cell side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub bbox: BoundingBox,
    pub scale: f64,
    pub num_lng_cells: i64,
}

impl Grid {
    /// # Errors
    /// - [`ModelError::GridTooFine`] when the number of cells per row does
    ///   not fit the cell-code arithmetic.
    pub fn new(bbox: BoundingBox, scale: f64) -> ModelResult<Self> {
        let span = ((bbox.max_lng - bbox.min_lng) / scale).floor();
        let rows = ((bbox.max_lat - bbox.min_lat) / scale).floor();
        let limit = i32::MAX as f64;
        if !(span.is_finite() && rows.is_finite()) || span >= limit || rows >= limit {
            return Err(ModelError::GridTooFine { scale });
        }
        Ok(Self { bbox, scale, num_lng_cells: span as i64 + 1 })
    }

    pub fn cell_of(&self, p: &Point) -> CellIndex {
        let row = ((p.lat - self.bbox.min_lat) / self.scale).floor() as i64;
        let col = ((p.lng - self.bbox.min_lng) / self.scale).floor() as i64;
        (row, col)
    }

    /// `row * num_lng_cells + col`.
    pub fn code(&self, cell: CellIndex) -> i64 {
        cell.0 * self.num_lng_cells + cell.1
    }

    pub fn center(&self, cell: CellIndex) -> Point {
        Point::new(
            self.bbox.min_lat + (cell.0 as f64 + 0.5) * self.scale,
            self.bbox.min_lng + (cell.1 as f64 + 0.5) * self.scale,
        )
    }
}

/// Venues grouped by cell, plus the neighbor lists implied by the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPartition {
    pub grid: Grid,
    /// Non-empty cells in ascending cell order, each with sorted members.
    pub cells: BTreeMap<CellIndex, Vec<usize>>,
    pub neighbors: Vec<Vec<usize>>,
}

/// Partition `points` into cells of side `scale`.
///
/// The neighbor set of a venue is every other venue in its own cell and
/// every venue in the eight adjacent cells.
///
/// # Errors
/// - [`ModelError::EmptyVenueRegistry`] for an empty slice.
/// - [`ModelError::GridTooFine`] when cell codes would overflow.
pub fn grid_partition(points: &[Point], scale: f64) -> ModelResult<GridPartition> {
    let bbox = BoundingBox::enclosing(points).ok_or(ModelError::EmptyVenueRegistry)?;
    let grid = Grid::new(bbox, scale)?;

    let mut cells: BTreeMap<CellIndex, Vec<usize>> = BTreeMap::new();
    let assignment: Vec<CellIndex> = points.iter().map(|p| grid.cell_of(p)).collect();
    for (i, &cell) in assignment.iter().enumerate() {
        cells.entry(cell).or_default().push(i);
    }

    let neighbors = assignment
        .iter()
        .enumerate()
        .map(|(i, &(row, col))| {
            let mut list: Vec<usize> = Vec::new();
            for dr in -1..=1 {
                for dc in -1..=1 {
                    if let Some(members) = cells.get(&(row + dr, col + dc)) {
                        list.extend(members.iter().copied().filter(|&j| j != i));
                    }
                }
            }
            list.sort_unstable();
            list
        })
        .collect();

    Ok(GridPartition { grid, cells, neighbors })
}
