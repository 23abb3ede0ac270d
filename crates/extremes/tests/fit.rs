//! Recovery of known GEV parameters from seeded synthetic annual maxima.

use approx::assert_relative_eq;
use clima_extremes::{DEFAULT_RETURN_PERIODS, GevParams, fit_gev, return_levels};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Gumbel};

/// Inverse-CDF sample from a GEV.
fn sample_gev(truth: &GevParams, n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let u: f64 = rng.random();
            truth.quantile(u.clamp(1e-12, 1.0 - 1e-12))
        })
        .collect()
}

#[test]
fn recovers_heavy_tailed_parameters() {
    let truth = GevParams::new(30.0, 4.0, 0.15).unwrap();
    let sample = sample_gev(&truth, 3000, 42);

    let fit = fit_gev(&sample).unwrap();
    assert_relative_eq!(fit.location(), 30.0, epsilon = 0.4);
    assert_relative_eq!(fit.scale(), 4.0, epsilon = 0.3);
    assert_relative_eq!(fit.shape(), 0.15, epsilon = 0.06);
}

#[test]
fn recovers_bounded_parameters() {
    let truth = GevParams::new(12.0, 1.5, -0.2).unwrap();
    let sample = sample_gev(&truth, 3000, 7);

    let fit = fit_gev(&sample).unwrap();
    assert_relative_eq!(fit.location(), 12.0, epsilon = 0.15);
    assert_relative_eq!(fit.scale(), 1.5, epsilon = 0.15);
    assert_relative_eq!(fit.shape(), -0.2, epsilon = 0.06);
}

#[test]
fn gumbel_sample_gives_small_shape() {
    let mut rng = StdRng::seed_from_u64(2024);
    let gumbel = Gumbel::new(20.0, 3.0).unwrap();
    let sample: Vec<f64> = (0..3000).map(|_| gumbel.sample(&mut rng)).collect();

    let fit = fit_gev(&sample).unwrap();
    assert!(fit.shape().abs() < 0.06, "shape={}", fit.shape());
    assert_relative_eq!(fit.location(), 20.0, epsilon = 0.3);
    assert_relative_eq!(fit.scale(), 3.0, epsilon = 0.3);
}

#[test]
fn default_return_levels_are_ordered() {
    let truth = GevParams::new(15.0, 2.0, 0.05).unwrap();
    let sample = sample_gev(&truth, 60, 11);

    let levels = return_levels(&sample, &DEFAULT_RETURN_PERIODS).unwrap();
    assert_eq!(levels.keys().copied().collect::<Vec<_>>(), vec![10, 20, 50]);
    assert!(levels[&10] < levels[&20]);
    assert!(levels[&20] < levels[&50]);
    assert!(levels[&10] > 15.0);
}

#[test]
fn nan_values_are_dropped() {
    let truth = GevParams::new(0.0, 1.0, 0.0).unwrap();
    let mut sample = sample_gev(&truth, 200, 3);
    let clean = fit_gev(&sample).unwrap();
    sample.insert(10, f64::NAN);
    sample.push(f64::NAN);
    let dirty = fit_gev(&sample).unwrap();
    assert_relative_eq!(clean.location(), dirty.location(), epsilon = 1e-12);
    assert_relative_eq!(clean.scale(), dirty.scale(), epsilon = 1e-12);
    assert_relative_eq!(clean.shape(), dirty.shape(), epsilon = 1e-12);
}
