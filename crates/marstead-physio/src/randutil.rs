//! Random sampling helpers shared by colonist generation and the engine.
//!
//! All functions take the RNG as a parameter so callers control seeding.

use rand::Rng;
use std::f64::consts::PI;

/// Sample a standard normal via the Box-Muller transform.
/// Avoids pulling in a distributions crate for one curve.
pub fn gaussian(rng: &mut impl Rng) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Gaussian sample around `mean` with the given deviation, reflected to be
/// non-negative. Used for per-colonist thresholds that must stay positive.
pub fn gaussian_positive(rng: &mut impl Rng, mean: f64, sigma: f64) -> f64 {
    (mean + gaussian(rng) * sigma).abs()
}

/// Uniform draw in `[0, ceiling)` biased toward the low end (min of two
/// uniforms). Used for initial health indices so most colonists start close
/// to nominal.
pub fn random_regression(rng: &mut impl Rng, ceiling: f64) -> f64 {
    let a = rng.gen_range(0.0..ceiling);
    let b = rng.gen_range(0.0..ceiling);
    a.min(b)
}
