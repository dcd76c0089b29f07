//! Pairwise win probabilities between neighboring venues.
//!
//! A venue with scope `s_v` beats a neighbor with scope `s_n` with
//! probability `P(s_v - s_n)`, where `P` is the logistic function or the
//! standard normal CDF. Only `ln P` and its derivative enter the likelihood,
//! both evaluated through the guarded helpers in
//! `optimization::numerical_stability`.
use std::str::FromStr;

use crate::{
    model::errors::ModelError,
    optimization::numerical_stability::{
        log_logistic, log_std_normal_cdf, safe_logistic, std_normal_hazard,
    },
};

/// Win-probability family of the competition term.
///
/// Parsing is case-insensitive (`"sigmoid"`, `"gaussiancdf"`; `"logistic"`
/// and `"probit"` are accepted as aliases).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompetitionFn {
    #[default]
    Sigmoid,
    GaussianCdf,
}

impl CompetitionFn {
    /// `ln P(x)`, finite for finite `x`.
    pub fn log_win(self, x: f64) -> f64 {
        match self {
            CompetitionFn::Sigmoid => log_logistic(x),
            CompetitionFn::GaussianCdf => log_std_normal_cdf(x),
        }
    }

    /// `ψ(x) = d/dx ln P(x)`: `1 - σ(x)` or `φ(x)/Φ(x)`.
    pub fn dlog_win(self, x: f64) -> f64 {
        match self {
            CompetitionFn::Sigmoid => safe_logistic(-x),
            CompetitionFn::GaussianCdf => std_normal_hazard(x),
        }
    }
}

impl FromStr for CompetitionFn {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sigmoid" | "logistic" => Ok(CompetitionFn::Sigmoid),
            "gaussiancdf" | "probit" => Ok(CompetitionFn::GaussianCdf),
            _ => Err(ModelError::InvalidCompetitionFn {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'Sigmoid' or 'GaussianCdf'.",
            }),
        }
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
    // - Symmetry P(x) + P(-x) = 1 for both families, with P = exp(ln P).
    // - ψ as the derivative of ln P (central differences).
    // - Parsing.
    //
    // They intentionally DO NOT cover:
    // - Tail accuracy of the underlying helpers (see `transformations`).
    // -------------------------------------------------------------------------

    const FAMILIES: [CompetitionFn; 2] = [CompetitionFn::Sigmoid, CompetitionFn::GaussianCdf];

    #[test]
    // Purpose
    // -------
    // Verify that winning and losing probabilities of a pair sum to one.
    //
    // Given
    // -----
    // - Gaps in [-4, 4] for both families.
    //
    // Expect
    // ------
    // - P(x) + P(-x) = 1 and P(0) = 0.5.
    fn win_probabilities_are_complementary() {
        for f in FAMILIES {
            assert_relative_eq!(f.log_win(0.0).exp(), 0.5, epsilon = 1e-15);
            for &x in &[-4.0, -0.3, 1.1, 4.0] {
                // Act
                let total = f.log_win(x).exp() + f.log_win(-x).exp();

                // Assert
                assert_relative_eq!(total, 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Check ψ against a central difference of ln P.
    //
    // Given
    // -----
    // - Gaps in [-6, 6] for both families.
    //
    // Expect
    // ------
    // - Agreement to 1e-6.
    fn dlog_win_is_derivative_of_log_win() {
        // Arrange
        let h = 1e-5;

        for f in FAMILIES {
            for &x in &[-6.0, -1.5, 0.0, 2.5, 6.0] {
                // Act
                let fd = (f.log_win(x + h) - f.log_win(x - h)) / (2.0 * h);

                // Assert
                assert_relative_eq!(f.dlog_win(x), fd, max_relative = 1e-6, epsilon = 1e-9);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Check case-insensitive parsing with aliases.
    //
    // Given
    // -----
    // - "SIGMOID", "probit", "cauchy".
    //
    // Expect
    // ------
    // - Sigmoid, GaussianCdf, and an `InvalidCompetitionFn` error.
    fn competition_fn_parses_names() {
        // Act / Assert
        assert_eq!("SIGMOID".parse::<CompetitionFn>(), Ok(CompetitionFn::Sigmoid));
        assert_eq!("probit".parse::<CompetitionFn>(), Ok(CompetitionFn::GaussianCdf));
        assert!(matches!(
            "cauchy".parse::<CompetitionFn>(),
            Err(ModelError::InvalidCompetitionFn { .. })
        ));
    }
}
