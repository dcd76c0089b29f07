//! Configuration of the probabilistic model.
use std::str::FromStr;

use crate::model::{
    competition::CompetitionFn,
    errors::{ModelError, ModelResult},
    weighting::CheckinWeighting,
};

/// Default influence scope assigned to every venue at construction.
pub const DEFAULT_INITIAL_SCOPE: f64 = 5.0;

/// Likelihood components included in the total.
///
/// Parsing is case-insensitive (`"distanceonly"`, `"competitiononly"`,
/// `"combined"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LikelihoodMode {
    DistanceOnly,
    CompetitionOnly,
    #[default]
    Combined,
}

impl LikelihoodMode {
    pub fn has_attraction(self) -> bool {
        matches!(self, LikelihoodMode::DistanceOnly | LikelihoodMode::Combined)
    }

    pub fn has_competition(self) -> bool {
        matches!(self, LikelihoodMode::CompetitionOnly | LikelihoodMode::Combined)
    }
}

impl FromStr for LikelihoodMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "distanceonly" => Ok(LikelihoodMode::DistanceOnly),
            "competitiononly" => Ok(LikelihoodMode::CompetitionOnly),
            "combined" => Ok(LikelihoodMode::Combined),
            _ => Err(ModelError::InvalidLikelihoodMode {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'DistanceOnly', 'CompetitionOnly' \
                         or 'Combined'.",
            }),
        }
    }
}

/// Model-level configuration.
///
/// Fields:
/// - `competition`: win-probability family of the competition term.
/// - `mode`: which likelihood components are active.
/// - `weighting`: checkin-count weighting.
/// - `initial_scope`: scope assigned to every venue at construction.
///
/// Default: `(Sigmoid, Combined, Raw, 5.0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelOptions {
    pub competition: CompetitionFn,
    pub mode: LikelihoodMode,
    pub weighting: CheckinWeighting,
    pub initial_scope: f64,
}

impl ModelOptions {
    /// # Errors
    /// Returns [`ModelError::InvalidInitialScope`] when `initial_scope` is
    /// non-finite or not strictly positive.
    pub fn new(
        competition: CompetitionFn, mode: LikelihoodMode, weighting: CheckinWeighting,
        initial_scope: f64,
    ) -> ModelResult<Self> {
        let opts = Self { competition, mode, weighting, initial_scope };
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> ModelResult<()> {
        let value = self.initial_scope;
        if !value.is_finite() {
            return Err(ModelError::InvalidInitialScope { value, reason: "Must be finite." });
        }
        if value <= 0.0 {
            return Err(ModelError::InvalidInitialScope { value, reason: "Must be positive." });
        }
        Ok(())
    }
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            competition: CompetitionFn::Sigmoid,
            mode: LikelihoodMode::Combined,
            weighting: CheckinWeighting::Raw,
            initial_scope: DEFAULT_INITIAL_SCOPE,
        }
    }
}
