use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::error::{Error, Method, Result, ValidationError};
use crate::expr::Function;
use crate::integrate::monte_carlo::{monte_carlo_with, DEFAULT_SAMPLES};
use crate::integrate::simpson::simpson;
use crate::integrate::trapezoid::trapezoid;
use crate::integrate::{nodes, SampledFunction};

/// Default number of points in a display curve.
pub const DEFAULT_CURVE_POINTS: usize = 100;

/// One point of a display curve, as `(x, f(x))`.
pub type CurvePoint = (f64, f64);

/// A validated unit of work: integrate `expression` over
/// `[lower, upper]` using `intervals` subintervals.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationRequest {
    /// Expression in the free variable `x`
    pub expression: String,
    /// Lower limit of integration
    pub lower: f64,
    /// Upper limit of integration
    pub upper: f64,
    /// Number of subintervals for the grid-based rules
    pub intervals: usize,
}

impl IntegrationRequest {
    pub fn new(expression: impl Into<String>, lower: f64, upper: f64, intervals: usize) -> Self {
        Self {
            expression: expression.into(),
            lower,
            upper,
            intervals,
        }
    }

    fn validate(&self) -> std::result::Result<(), ValidationError> {
        if !self.lower.is_finite() || !self.upper.is_finite() {
            return Err(ValidationError::NonFiniteLimit);
        }
        if self.lower >= self.upper {
            return Err(ValidationError::EmptyInterval {
                lower: self.lower,
                upper: self.upper,
            });
        }
        if self.intervals == 0 {
            return Err(ValidationError::ZeroIntervals);
        }
        Ok(())
    }
}

/// The three approximations for one request, at full precision.
/// Formatting is the caller's concern.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationResult {
    /// Trapezoidal-rule approximation
    pub trapezoid: f64,
    /// Simpson's-rule approximation
    pub simpson: f64,
    /// Monte Carlo approximation
    pub monte_carlo: f64,
    /// Externally computed reference value, for comparing the three
    /// methods against an adaptive-quadrature routine. Always `None`
    /// when produced here.
    pub reference: Option<f64>,
}

impl IntegrationResult {
    /// Fills the reference slot.
    #[must_use]
    pub fn with_reference(mut self, value: f64) -> Self {
        self.reference = Some(value);
        self
    }
}

/// Runs all three integration methods against one request.
///
/// The expression is validated and compiled once; every method (and the
/// display curve, if requested) sees the identical function. Methods
/// run in sequence and the first failure aborts the request, since a
/// function that cannot be evaluated for one rule cannot be evaluated
/// for the others either.
///
/// # Examples
///
/// ```
/// use numquad::integrate::{IntegrationRequest, Integrator};
///
/// let request = IntegrationRequest::new("x^2", 0.0, 1.0, 100);
/// let result = Integrator::new().with_seed(42).run(&request).unwrap();
/// assert!((result.simpson - 1.0 / 3.0).abs() < 1e-9);
/// assert!((result.monte_carlo - 1.0 / 3.0).abs() < 0.05);
/// ```
#[derive(Debug, Clone)]
pub struct Integrator {
    samples: usize,
    curve_points: usize,
    seed: Option<u64>,
}

impl Default for Integrator {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            curve_points: DEFAULT_CURVE_POINTS,
            seed: None,
        }
    }
}

impl Integrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Monte Carlo sample count (default 10 000).
    #[must_use]
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Sets the number of display-curve points (default 100).
    #[must_use]
    pub fn with_curve_points(mut self, points: usize) -> Self {
        self.curve_points = points;
        self
    }

    /// Seeds the Monte Carlo random stream, making `run` deterministic.
    /// Without a seed each run draws from entropy.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the request, compiles the expression, and runs the
    /// three methods against the one compiled function.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if the limits or interval count are
    /// invalid (the expression is never parsed in that case),
    /// [`Error::Expression`] if the expression does not compile, and
    /// [`Error::Computation`] naming the method if sampling fails
    /// mid-run. No partial results are returned.
    pub fn run(&self, request: &IntegrationRequest) -> Result<IntegrationResult> {
        let f = self.compile(request)?;
        self.methods(&f, request)
    }

    /// Like [`run`](Self::run), but also samples the display curve from
    /// the same compiled function, so the plotted curve is guaranteed
    /// consistent with the computed areas.
    pub fn run_with_curve(
        &self,
        request: &IntegrationRequest,
    ) -> Result<(IntegrationResult, Vec<CurvePoint>)> {
        let f = self.compile(request)?;
        let result = self.methods(&f, request)?;
        let curve = self.sample_curve(&f, request);
        Ok((result, curve))
    }

    /// Samples `(x, f(x))` pairs for display, evenly spaced over the
    /// request's interval.
    pub fn curve(&self, request: &IntegrationRequest) -> Result<Vec<CurvePoint>> {
        let f = self.compile(request)?;
        Ok(self.sample_curve(&f, request))
    }

    fn compile(&self, request: &IntegrationRequest) -> Result<Function> {
        request.validate()?;
        Function::parse(&request.expression).map_err(Error::Expression)
    }

    fn methods<F>(&self, f: &F, request: &IntegrationRequest) -> Result<IntegrationResult>
    where
        F: SampledFunction + ?Sized,
    {
        let IntegrationRequest {
            lower,
            upper,
            intervals,
            ref expression,
        } = *request;

        debug!(
            "integrating '{}' over [{}, {}] with {} intervals, {} samples",
            expression, lower, upper, intervals, self.samples
        );

        let trapezoid = trapezoid(f, lower, upper, intervals)
            .map_err(|source| Error::Computation {
                method: Method::Trapezoid,
                source,
            })?;
        let simpson = simpson(f, lower, upper, intervals).map_err(|source| Error::Computation {
            method: Method::Simpson,
            source,
        })?;

        let mut rng = match self.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        let monte_carlo = monte_carlo_with(f, lower, upper, self.samples, &mut rng).map_err(
            |source| Error::Computation {
                method: Method::MonteCarlo,
                source,
            },
        )?;

        debug!(
            "trapezoid={} simpson={} monte_carlo={}",
            trapezoid, simpson, monte_carlo
        );

        Ok(IntegrationResult {
            trapezoid,
            simpson,
            monte_carlo,
            reference: None,
        })
    }

    fn sample_curve(&self, f: &Function, request: &IntegrationRequest) -> Vec<CurvePoint> {
        if self.curve_points == 0 {
            return Vec::new();
        }
        let xs = nodes(request.lower, request.upper, self.curve_points - 1);
        let ys = f.eval_many(&xs);
        xs.into_iter().zip(ys).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;
    use std::cell::Cell;

    #[test]
    fn test_run_square() {
        let request = IntegrationRequest::new("x**2", 0.0, 1.0, 1_000);
        let result = Integrator::new().with_seed(3).run(&request).unwrap();

        assert!((result.trapezoid - 1.0 / 3.0).abs() < 1e-4);
        assert!((result.simpson - 1.0 / 3.0).abs() < 1e-9);
        assert!((result.monte_carlo - 1.0 / 3.0).abs() < 0.05);
        assert_eq!(result.reference, None);
    }

    #[test]
    fn test_run_rejects_reversed_limits_before_parsing() {
        // the expression is unparseable; validation must win, proving
        // the evaluator was never consulted
        let request = IntegrationRequest::new("$$$", 5.0, 2.0, 100);
        let err = Integrator::new().run(&request).unwrap_err();
        assert_eq!(
            err,
            Error::Validation(ValidationError::EmptyInterval {
                lower: 5.0,
                upper: 2.0
            })
        );
    }

    #[test]
    fn test_run_rejects_zero_intervals() {
        let request = IntegrationRequest::new("$$$", 0.0, 1.0, 0);
        let err = Integrator::new().run(&request).unwrap_err();
        assert_eq!(err, Error::Validation(ValidationError::ZeroIntervals));
    }

    #[test]
    fn test_run_rejects_non_finite_limits() {
        let request = IntegrationRequest::new("x", f64::NAN, 1.0, 10);
        let err = Integrator::new().run(&request).unwrap_err();
        assert_eq!(err, Error::Validation(ValidationError::NonFiniteLimit));
    }

    #[test]
    fn test_run_surfaces_parse_failure() {
        let request = IntegrationRequest::new("import os", 0.0, 1.0, 10);
        let err = Integrator::new().run(&request).unwrap_err();
        assert!(matches!(err, Error::Expression(_)));
    }

    #[test]
    fn test_methods_fail_fast() {
        // a sampler that always fails must be consulted exactly once
        struct Broken(Cell<usize>);
        impl SampledFunction for Broken {
            fn sample(&self, _xs: &[f64]) -> std::result::Result<Vec<f64>, EvalError> {
                self.0.set(self.0.get() + 1);
                Err(EvalError::Malformed)
            }
        }

        let broken = Broken(Cell::new(0));
        let request = IntegrationRequest::new("x", 0.0, 1.0, 10);
        let err = Integrator::new()
            .methods(&broken, &request)
            .unwrap_err();

        assert_eq!(
            err,
            Error::Computation {
                method: Method::Trapezoid,
                source: EvalError::Malformed
            }
        );
        assert_eq!(broken.0.get(), 1);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let request = IntegrationRequest::new("sin(x)", 0.0, 3.0, 50);
        let integrator = Integrator::new().with_seed(99);
        assert_eq!(
            integrator.run(&request).unwrap(),
            integrator.run(&request).unwrap()
        );
    }

    #[test]
    fn test_curve_matches_function() {
        let request = IntegrationRequest::new("x*x", 0.0, 2.0, 10);
        let curve = Integrator::new().curve(&request).unwrap();

        assert_eq!(curve.len(), DEFAULT_CURVE_POINTS);
        assert_eq!(curve[0], (0.0, 0.0));
        assert_eq!(curve[curve.len() - 1], (2.0, 4.0));
        for &(x, y) in &curve {
            assert_eq!(y, x * x);
        }
    }

    #[test]
    fn test_run_with_curve_is_consistent() {
        let request = IntegrationRequest::new("exp(x)", 0.0, 1.0, 100);
        let integrator = Integrator::new().with_seed(5).with_curve_points(25);
        let (result, curve) = integrator.run_with_curve(&request).unwrap();

        assert_eq!(result, integrator.run(&request).unwrap());
        assert_eq!(curve.len(), 25);
    }

    #[test]
    fn test_with_reference_fills_slot() {
        let request = IntegrationRequest::new("x", 0.0, 1.0, 10);
        let result = Integrator::new().with_seed(1).run(&request).unwrap();
        assert_eq!(result.clone().with_reference(0.5).reference, Some(0.5));
    }
}
