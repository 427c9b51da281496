use log::debug;

use crate::error::EvalError;
use crate::integrate::{nodes, SampledFunction};

/// Approximates the definite integral of `f` over `[a, b]` with the
/// composite Simpson's 1/3 rule.
///
/// Simpson's rule needs an even number of subintervals; an odd `n` is
/// silently incremented to `n + 1`, so the effective grid may be one
/// interval finer than requested. The area is
/// `(h/3) * (y[0] + 4*Σ y_odd + 2*Σ y_even + y[n])` over the 0-based
/// node index, with `h = (b - a) / n`. The error is O(h⁴) for smooth
/// integrands, and the rule is exact for polynomials up to degree 3.
///
/// # Arguments
///
/// * `f` - The integrand
/// * `a` - Lower limit of integration
/// * `b` - Upper limit of integration
/// * `n` - Requested number of subintervals, must be positive
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
/// use numquad::integrate::simpson;
///
/// let f = Function::parse("x^2").unwrap();
/// let area = simpson(&f, 0.0, 1.0, 10).unwrap();
/// assert!((area - 1.0 / 3.0).abs() < 1e-9);
/// ```
pub fn simpson<F>(f: &F, a: f64, b: f64, n: usize) -> Result<f64, EvalError>
where
    F: SampledFunction + ?Sized,
{
    let n = if n % 2 == 1 {
        debug!("simpson: adjusted interval count from {} to {}", n, n + 1);
        n + 1
    } else {
        n
    };

    let xs = nodes(a, b, n);
    let ys = f.sample(&xs)?;
    let h = (b - a) / n as f64;

    let odd: f64 = ys[1..n].iter().step_by(2).sum();
    let even: f64 = ys[2..n].iter().step_by(2).sum();
    Ok(h / 3.0 * (ys[0] + 4.0 * odd + 2.0 * even + ys[n]))
}
