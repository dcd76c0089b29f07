//! Configuration of the spatial partition.
use std::str::FromStr;

use crate::model::errors::{ModelError, ModelResult};

/// Default grid cell side, in coordinate units.
pub const DEFAULT_GRID_SCALE: f64 = 0.01;

/// How venues are grouped into areas and linked as neighbors.
///
/// Variants:
/// - `Threshold { max_distance_m }`: venues closer than `max_distance_m`
///   metres (great-circle) are neighbors; every venue anchors its own area
///   made of itself and its neighbors.
/// - `Grid { scale }`: square cells of side `scale` in coordinate units; the
///   venues of one cell form an area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AreaStrategy {
    Threshold { max_distance_m: f64 },
    Grid { scale: f64 },
}

impl AreaStrategy {
    /// # Errors
    /// Returns [`ModelError::InvalidThreshold`] for non-finite or
    /// non-positive distances.
    pub fn threshold(max_distance_m: f64) -> ModelResult<Self> {
        let strategy = AreaStrategy::Threshold { max_distance_m };
        strategy.validate()?;
        Ok(strategy)
    }

    /// # Errors
    /// Returns [`ModelError::InvalidScale`] for non-finite or non-positive
    /// cell sides.
    pub fn grid(scale: f64) -> ModelResult<Self> {
        let strategy = AreaStrategy::Grid { scale };
        strategy.validate()?;
        Ok(strategy)
    }

    pub fn validate(&self) -> ModelResult<()> {
        match *self {
            AreaStrategy::Threshold { max_distance_m: value } => {
                if !value.is_finite() {
                    return Err(ModelError::InvalidThreshold { value, reason: "Must be finite." });
                }
                if value <= 0.0 {
                    return Err(ModelError::InvalidThreshold { value, reason: "Must be positive." });
                }
            }
            AreaStrategy::Grid { scale: value } => {
                if !value.is_finite() {
                    return Err(ModelError::InvalidScale { value, reason: "Must be finite." });
                }
                if value <= 0.0 {
                    return Err(ModelError::InvalidScale { value, reason: "Must be positive." });
                }
            }
        }
        Ok(())
    }
}

/// How an area's centroid is placed.
///
/// - `Fixed`: the grid cell center, or the anchoring venue's coordinate.
/// - `Blended`: the mean coordinate of the area's member venues.
///
/// Parsing is case-insensitive (`"fixed"`, `"blended"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CentroidMode {
    #[default]
    Fixed,
    Blended,
}

impl FromStr for CentroidMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(CentroidMode::Fixed),
            "blended" => Ok(CentroidMode::Blended),
            _ => Err(ModelError::InvalidCentroidMode {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'Fixed' or 'Blended'.",
            }),
        }
    }
}

/// Spatial configuration consumed by the indexer.
///
/// Default: `Grid { scale: 0.01 }` with `Fixed` centroids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialOptions {
    pub strategy: AreaStrategy,
    pub centroid: CentroidMode,
}

impl SpatialOptions {
    /// # Errors
    /// Propagates [`AreaStrategy::validate`].
    pub fn new(strategy: AreaStrategy, centroid: CentroidMode) -> ModelResult<Self> {
        strategy.validate()?;
        Ok(Self { strategy, centroid })
    }
}

impl Default for SpatialOptions {
    fn default() -> Self {
        Self {
            strategy: AreaStrategy::Grid { scale: DEFAULT_GRID_SCALE },
            centroid: CentroidMode::Fixed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Ensure invalid strategy parameters are rejected at construction.
    //
    // Given
    // -----
    // - A zero threshold, a NaN scale, and a struct literal with a negative
    //   scale passed to `SpatialOptions::new`.
    //
    // Expect
    // ------
    // - `InvalidThreshold`, `InvalidScale`, `InvalidScale`.
    fn strategy_rejects_non_positive_parameters() {
        // Act
        let t = AreaStrategy::threshold(0.0).unwrap_err();
        let g = AreaStrategy::grid(f64::NAN).unwrap_err();
        let o = SpatialOptions::new(AreaStrategy::Grid { scale: -1.0 }, CentroidMode::Fixed)
            .unwrap_err();

        // Assert
        assert!(matches!(t, ModelError::InvalidThreshold { .. }), "got {t:?}");
        assert!(matches!(g, ModelError::InvalidScale { .. }), "got {g:?}");
        assert!(matches!(o, ModelError::InvalidScale { .. }), "got {o:?}");
    }

    #[test]
    // Purpose
    // -------
    // Check case-insensitive parsing of the centroid mode.
    //
    // Given
    // -----
    // - "BLENDED", "fixed", "median".
    //
    // Expect
    // ------
    // - Two successes, one `InvalidCentroidMode`.
    fn centroid_mode_parses_case_insensitively() {
        // Act / Assert
        assert_eq!("BLENDED".parse::<CentroidMode>(), Ok(CentroidMode::Blended));
        assert_eq!("fixed".parse::<CentroidMode>(), Ok(CentroidMode::Fixed));
        assert!(matches!(
            "median".parse::<CentroidMode>(),
            Err(ModelError::InvalidCentroidMode { .. })
        ));
    }
}
