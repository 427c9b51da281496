use crate::error::EvalError;
use crate::integrate::{nodes, SampledFunction};

/// Approximates the definite integral of `f` over `[a, b]` with the
/// composite trapezoidal rule on `n` equal subintervals.
///
/// The function is sampled once at the `n + 1` grid nodes (both
/// endpoints included) and the area is `h * (sum(y) - 0.5*(y[0] + y[n]))`
/// with `h = (b - a) / n`. The error is O(h²) for smooth integrands.
/// `n = 1` is the smallest valid grid (a single panel).
///
/// # Arguments
///
/// * `f` - The integrand
/// * `a` - Lower limit of integration
/// * `b` - Upper limit of integration
/// * `n` - Number of subintervals, must be positive
///
/// # Errors
///
/// Fails with the sampler's [`EvalError`] if the integrand cannot be
/// evaluated; no partial result is produced.
///
/// # Examples
///
/// ```
/// use numquad::expr::Function;
/// use numquad::integrate::trapezoid;
///
/// let f = Function::parse("x^2").unwrap();
/// let area = trapezoid(&f, 0.0, 1.0, 1_000).unwrap();
/// assert!((area - 1.0 / 3.0).abs() < 1e-4);
/// ```
pub fn trapezoid<F>(f: &F, a: f64, b: f64, n: usize) -> Result<f64, EvalError>
where
    F: SampledFunction + ?Sized,
{
    let xs = nodes(a, b, n);
    let ys = f.sample(&xs)?;
    let h = (b - a) / n as f64;
    let sum: f64 = ys.iter().sum();
    Ok(h * (sum - 0.5 * (ys[0] + ys[n])))
}
