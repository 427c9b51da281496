use approx::assert_relative_eq;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::expr::Function;
use crate::integrate::{
    monte_carlo_with, nodes, simpson, trapezoid, IntegrationRequest, Integrator, Pointwise,
    SampledFunction,
};

#[test]
fn test_nodes_include_exact_endpoints() {
    let xs = nodes(0.1, 0.3, 7);
    assert_eq!(xs.len(), 8);
    assert_eq!(xs[0], 0.1);
    assert_eq!(xs[7], 0.3);
}

#[test]
fn test_nodes_are_evenly_spaced() {
    let xs = nodes(0.0, 1.0, 4);
    assert_eq!(xs, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
}

#[test]
fn test_pointwise_preserves_length() {
    let ys = Pointwise(|x: f64| 2.0 * x)
        .sample(&[1.0, 2.0, 3.0])
        .unwrap();
    assert_eq!(ys, vec![2.0, 4.0, 6.0]);
}

#[test]
fn test_square_convergence() {
    // ∫ x² over [0,1] = 1/3
    let f = Function::parse("x**2").unwrap();

    let trap = trapezoid(&f, 0.0, 1.0, 1_000).unwrap();
    assert!((trap - 1.0 / 3.0).abs() < 1e-4);

    // Simpson is exact for polynomials up to degree 3
    let simp = simpson(&f, 0.0, 1.0, 10).unwrap();
    assert_relative_eq!(simp, 1.0 / 3.0, epsilon = 1e-9);
}

#[test]
fn test_sine_convergence() {
    // ∫ sin over [0,π] = 2
    let f = Function::parse("sin(x)").unwrap();
    let pi = std::f64::consts::PI;

    let trap = trapezoid(&f, 0.0, pi, 100).unwrap();
    assert!((trap - 2.0).abs() < 1e-2);

    let simp = simpson(&f, 0.0, pi, 100).unwrap();
    assert!((simp - 2.0).abs() < 1e-6);

    // the O(h⁴) rule beats the O(h²) rule on the same grid
    assert!((simp - 2.0).abs() < (trap - 2.0).abs());
}

#[test]
fn test_odd_interval_count_matches_explicit_even() {
    let f = Function::parse("sin(x)").unwrap();
    let pi = std::f64::consts::PI;

    let odd = simpson(&f, 0.0, pi, 9).unwrap();
    let even = simpson(&f, 0.0, pi, 10).unwrap();
    assert_eq!(odd, even);
    assert!((odd - 2.0).abs() < 1e-5);
}

#[test]
fn test_monte_carlo_constant_across_seeds() {
    // ∫ 1 over [0,2] = 2; repeat across independent streams
    let f = Pointwise(|_: f64| 1.0);
    for seed in 0..10 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let estimate = monte_carlo_with(&f, 0.0, 2.0, 100_000, &mut rng).unwrap();
        assert!((estimate - 2.0).abs() < 0.05, "seed {seed}: {estimate}");
    }
}

#[test]
fn test_methods_agree_on_exponential() {
    // ∫ eˣ over [0,1] = e - 1
    let exact = std::f64::consts::E - 1.0;
    let request = IntegrationRequest::new("exp(x)", 0.0, 1.0, 200);
    let result = Integrator::new()
        .with_seed(11)
        .with_samples(200_000)
        .run(&request)
        .unwrap();

    assert!((result.trapezoid - exact).abs() < 1e-3);
    assert_relative_eq!(result.simpson, exact, epsilon = 1e-9);
    assert!((result.monte_carlo - exact).abs() < 0.05);
}
