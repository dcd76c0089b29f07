//! Transformation of raw checkin counts into likelihood weights.
use std::str::FromStr;

use crate::model::errors::ModelError;

/// Weight `f(count)` given to a (user, venue) pair.
///
/// - `Raw`: `count` (default).
/// - `Log`: `ln(count)`; a single checkin contributes zero weight.
/// - `Binary`: `1` for any positive count.
///
/// The weighting is applied by the venue-local objective, its derivative and
/// the location estimator. The total log-likelihood uses raw counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckinWeighting {
    #[default]
    Raw,
    Log,
    Binary,
}

impl CheckinWeighting {
    /// Weight of a positive count. A zero count always weighs zero.
    pub fn weight(self, count: u32) -> f64 {
        if count == 0 {
            return 0.0;
        }
        match self {
            CheckinWeighting::Raw => f64::from(count),
            CheckinWeighting::Log => f64::from(count).ln(),
            CheckinWeighting::Binary => 1.0,
        }
    }
}

impl FromStr for CheckinWeighting {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw" => Ok(CheckinWeighting::Raw),
            "log" => Ok(CheckinWeighting::Log),
            "binary" => Ok(CheckinWeighting::Binary),
            _ => Err(ModelError::InvalidWeighting {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'Raw', 'Log' or 'Binary'.",
            }),
        }
    }
}
