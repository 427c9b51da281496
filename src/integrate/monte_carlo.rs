use rand::Rng;

use crate::error::EvalError;
use crate::integrate::SampledFunction;

/// Default number of Monte Carlo samples.
pub const DEFAULT_SAMPLES: usize = 10_000;

/// Estimates the definite integral of `f` over `[a, b]` by rejection
/// sampling, drawing from the thread-local generator.
///
/// See [`monte_carlo_with`] for the estimator itself and its
/// non-negativity assumption. Results vary run to run; inject a seeded
/// generator through `monte_carlo_with` for reproducibility.
pub fn monte_carlo<F>(f: &F, a: f64, b: f64, samples: usize) -> Result<f64, EvalError>
where
    F: SampledFunction + ?Sized,
{
    monte_carlo_with(f, a, b, samples, &mut rand::thread_rng())
}

/// Estimates the definite integral of `f` over `[a, b]` by rejection
/// sampling with a caller-supplied random source.
///
/// Draws `samples` uniform x-coordinates in `[a, b)`, evaluates `f`
/// once over that draw, and bounds the region with `M`, the largest
/// sampled value. One uniform y-coordinate in `[0, M)` is then drawn
/// per x, and the estimate is `(b - a) * M * count / samples` where
/// `count` is the number of pairs with `y < f(x)`.
///
/// The geometric interpretation assumes a non-negative integrand; for
/// functions that go negative on `[a, b]` the area below the axis is
/// invisible to the estimator and the result is not meaningful. When
/// the sampled maximum is not strictly positive the bounding band is
/// empty and the estimate is 0.0; when it is infinite the estimate is
/// NaN. NaN samples do not contribute to the bound.
///
/// # Arguments
///
/// * `f` - The integrand, assumed non-negative on `[a, b]`
/// * `a` - Lower limit of integration
/// * `b` - Upper limit of integration
/// * `samples` - Number of (x, y) pairs to draw
/// * `rng` - Random source; each concurrent caller should own its own
///
/// # Errors
///
/// Fails with the sampler's [`EvalError`] if the integrand cannot be
/// evaluated; no partial result is produced.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
/// use numquad::expr::Function;
/// use numquad::integrate::monte_carlo_with;
///
/// let f = Function::parse("x^2").unwrap();
/// let mut rng = ChaCha20Rng::seed_from_u64(7);
/// let area = monte_carlo_with(&f, 0.0, 1.0, 100_000, &mut rng).unwrap();
/// assert!((area - 1.0 / 3.0).abs() < 0.05);
/// ```
pub fn monte_carlo_with<F, R>(
    f: &F,
    a: f64,
    b: f64,
    samples: usize,
    rng: &mut R,
) -> Result<f64, EvalError>
where
    F: SampledFunction + ?Sized,
    R: Rng,
{
    let xs: Vec<f64> = (0..samples).map(|_| rng.gen_range(a..b)).collect();
    let ys = f.sample(&xs)?;

    // f64::max skips NaN operands, so an undefined sample cannot poison
    // the bound
    let max = ys.iter().fold(f64::NEG_INFINITY, |m, &y| m.max(y));
    if max <= 0.0 {
        // empty band: nothing can land under the curve
        return Ok(0.0);
    }
    if !max.is_finite() {
        // the integrand blew up at a sampled node
        return Ok(f64::NAN);
    }

    let mut below = 0usize;
    for &y in &ys {
        if rng.gen_range(0.0..max) < y {
            below += 1;
        }
    }

    Ok((b - a) * max * below as f64 / samples as f64)
}
