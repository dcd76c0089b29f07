//! Error surface of the scope optimizer.
//!
//! Configuration mistakes (`ScopeOptions::new`), numerical failures during a
//! single venue's descent, and errors raised by argmin when the barrier
//! problem is driven through its traits all collapse into [`OptError`].
use argmin::core::{ArgminError, Error};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Gradient needs to be finite.
    InvalidGradient { scope: f64, value: f64, reason: &'static str },

    // ---- ScopeOptions ----
    /// Armijo sufficient-decrease constant must lie in (0, 1).
    InvalidAlpha { value: f64, reason: &'static str },
    /// Step shrink factor must lie in (0, 1).
    InvalidBeta { value: f64, reason: &'static str },
    /// Objective change tolerance needs to be positive and finite.
    InvalidTolObjective { tol: f64, reason: &'static str },
    /// Barrier weight needs to be positive and finite.
    InvalidBarrierWeight { value: f64, reason: &'static str },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter { max_iter: usize, reason: &'static str },
    /// Backtracking budget needs to be positive.
    InvalidMaxBacktracks { max_backtracks: usize, reason: &'static str },

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost { scope: f64, value: f64 },

    // ---- Descent ----
    /// Starting scope must be finite and strictly positive.
    InvalidInitialScope { value: f64 },
    /// No step satisfied the sufficient-decrease condition within budget.
    LineSearchExhausted { scope: f64, attempts: usize },

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter { text: String },
    /// Wrapper for argmin::NotImplemented
    NotImplemented { text: String },
    /// Wrapper for argmin::NotInitialized
    NotInitialized { text: String },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated { text: String },
    /// Wrapper for argmin::PotentialBug
    PotentialBug { text: String },
    /// Wrapper for other argmin::Error types
    BackendError { text: String },

    // ---- Fallback ----
    UnknownError,
}

impl OptError {
    /// `true` for failures caused by the numerics of one venue's problem
    /// rather than by configuration.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            OptError::InvalidGradient { .. }
                | OptError::NonFiniteCost { .. }
                | OptError::LineSearchExhausted { .. }
                | OptError::InvalidInitialScope { .. }
        )
    }
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::InvalidGradient { scope, value, reason } => {
                write!(f, "Invalid gradient at scope {scope}: {value}: {reason}")
            }

            // ---- ScopeOptions ----
            OptError::InvalidAlpha { value, reason } => {
                write!(f, "Invalid Armijo constant {value}: {reason}")
            }
            OptError::InvalidBeta { value, reason } => {
                write!(f, "Invalid step shrink factor {value}: {reason}")
            }
            OptError::InvalidTolObjective { tol, reason } => {
                write!(f, "Invalid objective change tolerance {tol}: {reason}")
            }
            OptError::InvalidBarrierWeight { value, reason } => {
                write!(f, "Invalid barrier weight {value}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::InvalidMaxBacktracks { max_backtracks, reason } => {
                write!(f, "Invalid backtracking budget {max_backtracks}: {reason}")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { scope, value } => {
                write!(f, "Non-finite cost value {value} at scope {scope}")
            }

            // ---- Descent ----
            OptError::InvalidInitialScope { value } => {
                write!(f, "Invalid initial scope {value}: must be finite and > 0")
            }
            OptError::LineSearchExhausted { scope, attempts } => {
                write!(
                    f,
                    "Line search exhausted at scope {scope} after {attempts} step reductions"
                )
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}
