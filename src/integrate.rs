pub mod monte_carlo;
pub mod runner;
pub mod simpson;
pub mod trapezoid;

pub use monte_carlo::{monte_carlo, monte_carlo_with, DEFAULT_SAMPLES};
pub use runner::{
    CurvePoint, IntegrationRequest, IntegrationResult, Integrator, DEFAULT_CURVE_POINTS,
};
pub use simpson::simpson;
pub use trapezoid::trapezoid;

use crate::error::EvalError;
use crate::expr::Function;

/// A real-valued function of one variable, sampled over a batch of
/// points.
///
/// This is the contract every integration method consumes. A compiled
/// [`Function`] implements it, as does any plain closure through
/// [`Pointwise`]. Implementations may fail the whole batch with an
/// [`EvalError`]; on success the output must have the same length as
/// `xs`.
pub trait SampledFunction {
    fn sample(&self, xs: &[f64]) -> Result<Vec<f64>, EvalError>;
}

impl SampledFunction for Function {
    fn sample(&self, xs: &[f64]) -> Result<Vec<f64>, EvalError> {
        Ok(self.eval_many(xs))
    }
}

/// Adapts a plain `f(x)` closure to the batch sampling contract.
///
/// # Examples
///
/// ```
/// use numquad::integrate::{trapezoid, Pointwise};
///
/// let area = trapezoid(&Pointwise(|x: f64| x * x), 0.0, 1.0, 1_000).unwrap();
/// assert!((area - 1.0 / 3.0).abs() < 1e-4);
/// ```
pub struct Pointwise<F>(pub F);

impl<F> SampledFunction for Pointwise<F>
where
    F: Fn(f64) -> f64,
{
    fn sample(&self, xs: &[f64]) -> Result<Vec<f64>, EvalError> {
        Ok(xs.iter().map(|&x| (self.0)(x)).collect())
    }
}

/// Returns the `n + 1` equally spaced nodes partitioning `[a, b]` into
/// `n` subintervals, endpoints included. The last node is exactly `b`.
pub fn nodes(a: f64, b: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return vec![a];
    }
    let mut xs: Vec<f64> = (0..=n)
        .map(|i| a + (b - a) * i as f64 / n as f64)
        .collect();
    xs[n] = b;
    xs
}

#[cfg(test)]
mod tests;
