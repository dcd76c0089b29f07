//! Top-level configuration of an estimation run.
use crate::{
    estimation::errors::{EstimationError, EstimationResult},
    model::options::ModelOptions,
    optimization::scope_optimizer::ScopeOptions,
    spatial::options::SpatialOptions,
};

/// Default relative-change tolerance of the outer loop.
pub const DEFAULT_TOL_RELATIVE: f64 = 0.01;
/// Default cap on outer iterations.
pub const DEFAULT_MAX_OUTER_ITER: usize = 100;

/// Options for [`crate::estimation::Coordinator`].
///
/// Fields:
/// - `model`: likelihood configuration and initial scope.
/// - `spatial`: area strategy and centroid placement.
/// - `scope`: per-venue descent settings.
/// - `tol_relative`: stop when `|prev - llh| / |llh| < tol_relative`.
/// - `max_outer_iter`: hard cap on outer iterations.
///
/// Default: defaults of every nested option set, `tol_relative = 0.01`,
/// `max_outer_iter = 100`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorOptions {
    pub model: ModelOptions,
    pub spatial: SpatialOptions,
    pub scope: ScopeOptions,
    pub tol_relative: f64,
    pub max_outer_iter: usize,
}

impl EstimatorOptions {
    /// Construct validated estimator options.
    ///
    /// # Errors
    /// - [`EstimationError::Model`] when the model or spatial options are
    ///   invalid.
    /// - [`EstimationError::InvalidTolerance`] for a non-finite or
    ///   non-positive `tol_relative`.
    /// - [`EstimationError::InvalidMaxOuterIter`] when `max_outer_iter` is 0.
    pub fn new(
        model: ModelOptions, spatial: SpatialOptions, scope: ScopeOptions, tol_relative: f64,
        max_outer_iter: usize,
    ) -> EstimationResult<Self> {
        let opts = Self { model, spatial, scope, tol_relative, max_outer_iter };
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> EstimationResult<()> {
        self.model.validate()?;
        self.spatial.strategy.validate()?;
        let tol = self.tol_relative;
        if !tol.is_finite() {
            return Err(EstimationError::InvalidTolerance { tol, reason: "Must be finite." });
        }
        if tol <= 0.0 {
            return Err(EstimationError::InvalidTolerance { tol, reason: "Must be positive." });
        }
        if self.max_outer_iter == 0 {
            return Err(EstimationError::InvalidMaxOuterIter {
                max_outer_iter: 0,
                reason: "Outer iteration cap must be greater than zero.",
            });
        }
        Ok(())
    }
}

impl Default for EstimatorOptions {
    fn default() -> Self {
        Self {
            model: ModelOptions::default(),
            spatial: SpatialOptions::default(),
            scope: ScopeOptions::default(),
            tol_relative: DEFAULT_TOL_RELATIVE,
            max_outer_iter: DEFAULT_MAX_OUTER_ITER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify defaults and the rejection of bad tolerances and caps.
    //
    // Given
    // -----
    // - Default options; tolerances 0 and NaN; a zero outer cap.
    //
    // Expect
    // ------
    // - Defaults validate; each bad value maps to its error variant.
    fn estimator_options_reject_bad_tolerance_and_cap() {
        // Arrange
        let d = EstimatorOptions::default();

        // Act
        let zero = EstimatorOptions::new(d.model, d.spatial, d.scope, 0.0, 10).unwrap_err();
        let nan = EstimatorOptions::new(d.model, d.spatial, d.scope, f64::NAN, 10).unwrap_err();
        let cap = EstimatorOptions::new(d.model, d.spatial, d.scope, 0.01, 0).unwrap_err();

        // Assert
        assert!(d.validate().is_ok());
        assert_eq!(d.tol_relative, 0.01);
        assert_eq!(d.max_outer_iter, 100);
        assert!(matches!(zero, EstimationError::InvalidTolerance { .. }), "got {zero:?}");
        assert!(matches!(nan, EstimationError::InvalidTolerance { .. }), "got {nan:?}");
        assert!(matches!(cap, EstimationError::InvalidMaxOuterIter { .. }), "got {cap:?}");
    }
}
