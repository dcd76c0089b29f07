//! Numerical stability utilities.
//!
//! Provides safe implementations of the nonlinear transforms used by the
//! competition term of the likelihood. The naïve forms overflow or underflow
//! once the scope gap between two venues grows past a few dozen units, so
//! every function here uses an explicit cutoff to keep `f64` arithmetic in a
//! well-conditioned regime.
//!
//! # Provided items
//! - [`safe_softplus(x)`]: stable version of `ln(1 + exp(x))`.
//! - [`safe_logistic(x)`]: stable logistic `σ(x) = 1 / (1 + exp(-x))`.
//! - [`log_logistic(x)`]: `ln σ(x)` evaluated as `-softplus(-x)`.
//! - [`std_normal_cdf(x)`], [`std_normal_pdf(x)`]: Φ and φ via `erfc`.
//! - [`log_std_normal_cdf(x)`]: `ln Φ(x)` with an asymptotic lower tail.
//! - [`std_normal_hazard(x)`]: the ratio `φ(x) / Φ(x)`, i.e. `d/dx ln Φ(x)`.
//!
//! # Rationale
//! `ln σ` and `ln Φ` both tend to `-∞` for large negative inputs. Evaluating
//! them as `ln(σ(x))` or `ln(Φ(x))` hits `ln(0)` long before the true value
//! leaves the representable range.
use std::f64::consts::{PI, SQRT_2};

use statrs::function::erf::erfc;

/// Cutoff above which `softplus(x) ≈ x` to machine precision.
pub const SOFTPLUS_CUTOFF: f64 = 20.0;

/// Below this argument `Φ(x)` is replaced by its asymptotic expansion.
///
/// At `x = -30` the direct `erfc` value is still around `1e-198`, so the
/// switch happens well before underflow.
pub const NORMAL_TAIL_CUTOFF: f64 = -30.0;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// - For sufficiently large `x`, `softplus(x) ≈ x + ln1p(exp(-x)) ≈ x`.
/// - Otherwise, it falls back to `ln1p(exp(x))`.
///
/// # Parameters
/// - `x`: real input
///
/// # Returns
/// - `softplus(x)` as `f64`.
pub fn safe_softplus(x: f64) -> f64 {
    if x > SOFTPLUS_CUTOFF { x } else { x.exp().ln_1p() }
}

/// Numerically stable logistic function `σ(x) = 1 / (1 + exp(-x))`.
///
/// Branches on the sign of `x` so that `exp` is only ever called on a
/// non-positive argument.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// `ln σ(x)`, evaluated as `-softplus(-x)`.
///
/// Finite for every finite `x`; for `x → -∞` it behaves like `x`.
pub fn log_logistic(x: f64) -> f64 {
    -safe_softplus(-x)
}

/// Standard normal density `φ(x)`.
pub fn std_normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Standard normal CDF `Φ(x) = erfc(-x / √2) / 2`.
///
/// Using `erfc` instead of `1 + erf` keeps full relative precision in the
/// lower tail.
pub fn std_normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Correction factor `1 - 1/x² + 3/x⁴` of the Mills-ratio expansion.
fn mills_series(x: f64) -> f64 {
    let inv2 = 1.0 / (x * x);
    1.0 - inv2 + 3.0 * inv2 * inv2
}

/// `ln Φ(x)` without underflow.
///
/// For `x >= NORMAL_TAIL_CUTOFF` the direct value is used. Below it, the
/// expansion `Φ(x) ≈ φ(x)/(-x) · (1 - 1/x² + 3/x⁴)` is taken in log space:
///
/// `ln Φ(x) ≈ -x²/2 - ln(2π)/2 - ln(-x) + ln(1 - 1/x² + 3/x⁴)`.
///
/// # Returns
/// - A finite value for every finite `x`.
pub fn log_std_normal_cdf(x: f64) -> f64 {
    if x >= NORMAL_TAIL_CUTOFF {
        std_normal_cdf(x).ln()
    } else {
        -0.5 * x * x - 0.5 * (2.0 * PI).ln() - (-x).ln() + mills_series(x).ln()
    }
}

/// Ratio `φ(x) / Φ(x)`, the derivative of `ln Φ(x)`.
///
/// In the lower tail the ratio grows like `-x`; the asymptotic form
/// `(-x) / (1 - 1/x² + 3/x⁴)` replaces the `0/0` of the direct quotient.
pub fn std_normal_hazard(x: f64) -> f64 {
    if x >= NORMAL_TAIL_CUTOFF {
        std_normal_pdf(x) / std_normal_cdf(x)
    } else {
        -x / mills_series(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of the guarded transforms with naïve formulas on safe grids.
    // - Finiteness of `ln σ` and `ln Φ` far into the lower tail.
    // - Continuity of the normal tail switch at `NORMAL_TAIL_CUTOFF`.
    //
    // They intentionally DO NOT cover:
    // - How the transforms are combined into the competition likelihood (see
    //   `model::competition`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Check `log_logistic` against `ln(1 / (1 + e^{-x}))` where the naïve form
    // is accurate.
    //
    // Given
    // -----
    // - A grid of moderate inputs in [-10, 10].
    //
    // Expect
    // ------
    // - Both evaluations agree to a tight relative tolerance.
    fn log_logistic_matches_naive_form_on_moderate_grid() {
        // Arrange
        let grid = [-10.0, -3.5, -1.0, 0.0, 0.5, 2.0, 10.0];

        for &x in &grid {
            // Act
            let stable = log_logistic(x);
            let naive = (1.0 / (1.0 + f64::exp(-x))).ln();

            // Assert
            assert_relative_eq!(stable, naive, max_relative = 1e-12, epsilon = 1e-14);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure the logistic transforms stay finite for extreme gaps.
    //
    // Given
    // -----
    // - Inputs of ±800, where `exp` overflows.
    //
    // Expect
    // ------
    // - `safe_logistic` returns values in [0, 1] and `log_logistic(-800)`
    //   is approximately -800.
    fn logistic_transforms_are_finite_for_extreme_inputs() {
        // Arrange
        let big = 800.0;

        // Act
        let hi = safe_logistic(big);
        let lo = safe_logistic(-big);
        let log_lo = log_logistic(-big);

        // Assert
        assert_relative_eq!(hi, 1.0);
        assert!((0.0..=1.0).contains(&lo), "σ(-800) must be a probability, got {lo}");
        assert!(log_lo.is_finite(), "ln σ(-800) must be finite");
        assert_relative_eq!(log_lo, -big, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify Φ and φ at reference points.
    //
    // Given
    // -----
    // - x = 0 and x = 1.96.
    //
    // Expect
    // ------
    // - Φ(0) = 0.5, φ(0) = 1/√(2π), Φ(1.96) ≈ 0.9750021.
    fn normal_cdf_and_pdf_match_reference_values() {
        // Act / Assert
        assert_relative_eq!(std_normal_cdf(0.0), 0.5, epsilon = 1e-15);
        assert_relative_eq!(std_normal_pdf(0.0), 1.0 / (2.0 * PI).sqrt(), epsilon = 1e-15);
        assert_relative_eq!(std_normal_cdf(1.96), 0.975_002_104_851_780, epsilon = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Ensure `ln Φ` and `φ/Φ` are continuous across the tail cutoff and
    // finite far below it.
    //
    // Given
    // -----
    // - Points just above and just below `NORMAL_TAIL_CUTOFF`, and x = -1e3.
    //
    // Expect
    // ------
    // - Both sides of the switch agree to a relative 1e-6.
    // - Values at x = -1e3 are finite; the hazard is close to 1e3.
    fn normal_tail_is_continuous_and_finite() {
        // Arrange
        let above = NORMAL_TAIL_CUTOFF + 1e-9;
        let below = NORMAL_TAIL_CUTOFF - 1e-9;

        // Act
        let log_above = log_std_normal_cdf(above);
        let log_below = log_std_normal_cdf(below);
        let hazard_above = std_normal_hazard(above);
        let hazard_below = std_normal_hazard(below);

        // Assert
        assert_relative_eq!(log_above, log_below, max_relative = 1e-6);
        assert_relative_eq!(hazard_above, hazard_below, max_relative = 1e-6);
        assert!(log_std_normal_cdf(-1e3).is_finite(), "ln Φ(-1000) must be finite");
        assert_relative_eq!(std_normal_hazard(-1e3), 1e3, max_relative = 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // Check that `std_normal_hazard` is the derivative of `log_std_normal_cdf`.
    //
    // Given
    // -----
    // - A central difference of `ln Φ` at several points.
    //
    // Expect
    // ------
    // - The hazard matches the central difference to 1e-6.
    fn normal_hazard_is_derivative_of_log_cdf() {
        // Arrange
        let h = 1e-5;

        for &x in &[-5.0, -1.0, 0.0, 2.0] {
            // Act
            let fd = (log_std_normal_cdf(x + h) - log_std_normal_cdf(x - h)) / (2.0 * h);

            // Assert
            assert_relative_eq!(std_normal_hazard(x), fd, max_relative = 1e-6, epsilon = 1e-9);
        }
    }
}
