//! Adapter that exposes a [`ScopeLikelihood`] as a log-barrier minimization
//! problem.
//!
//! We convert a *maximization* of `ℓ(s)` subject to `s > 0` into the
//! unconstrained *minimization* of `c(s) = -t·ℓ(s) - ln(s)`. The barrier term
//! is `+∞` on `s <= 0`, which the adapter reports as a non-finite cost so the
//! line search rejects such candidates. The problem implements argmin's
//! `CostFunction` and `Gradient`, so argmin solvers can drive it as well.
use crate::optimization::{
    errors::{OptError, OptResult},
    scope_optimizer::{
        traits::ScopeLikelihood,
        validation::{validate_gradient, validate_value},
    },
};
use argmin::core::{CostFunction, Error, Gradient};

/// Bridges a [`ScopeLikelihood`] to the barrier objective.
///
/// - `objective(s)` returns `-t·ℓ(s) - ln(s)`.
/// - `objective_gradient(s)` returns `-t·ℓ'(s) - 1/s`.
#[derive(Debug, Clone)]
pub struct BarrierProblem<'a, F: ScopeLikelihood> {
    pub f: &'a F,
    pub barrier_weight: f64,
}

impl<'a, F: ScopeLikelihood> BarrierProblem<'a, F> {
    /// Construct a barrier problem over a scope likelihood with weight `t`.
    pub fn new(f: &'a F, barrier_weight: f64) -> Self {
        Self { f, barrier_weight }
    }

    /// Evaluate the barrier cost at `scope`.
    ///
    /// # Errors
    /// - [`OptError::NonFiniteCost`] when `scope <= 0` (outside the barrier's
    ///   domain) or when the cost is `NaN`/`±∞`.
    /// - Propagates any error from the likelihood's `value`.
    pub fn objective(&self, scope: f64) -> OptResult<f64> {
        if scope.is_nan() || scope <= 0.0 {
            return Err(OptError::NonFiniteCost { scope, value: f64::INFINITY });
        }
        let ll = self.f.value(scope)?;
        let cost = -self.barrier_weight * ll - scope.ln();
        validate_value(scope, cost)?;
        Ok(cost)
    }

    /// Evaluate the derivative of the barrier cost at `scope`.
    ///
    /// # Errors
    /// - [`OptError::InvalidGradient`] when the derivative is non-finite.
    /// - Propagates any error from the likelihood's `grad`.
    pub fn objective_gradient(&self, scope: f64) -> OptResult<f64> {
        let g = self.f.grad(scope)?;
        let out = -self.barrier_weight * g - 1.0 / scope;
        validate_gradient(scope, out)?;
        Ok(out)
    }
}

impl<'a, F: ScopeLikelihood> CostFunction for BarrierProblem<'a, F> {
    type Param = f64;
    type Output = f64;

    /// Evaluate the barrier cost; errors travel as `OptError` inside
    /// argmin's error type.
    fn cost(&self, scope: &Self::Param) -> Result<Self::Output, Error> {
        Ok(self.objective(*scope)?)
    }
}

impl<'a, F: ScopeLikelihood> Gradient for BarrierProblem<'a, F> {
    type Param = f64;
    type Gradient = f64;

    fn gradient(&self, scope: &Self::Param) -> Result<Self::Gradient, Error> {
        Ok(self.objective_gradient(*scope)?)
    }
}
