//! Seedable random sampling.
//!
//! Every sampler takes its generator explicitly. A run is reproducible when
//! it is given a seed; without one the seed is drawn from system entropy.
//! Batched runs derive one independent stream per batch with
//! [`derive_seed`], so the result of a seeded run does not depend on how
//! batches are scheduled across threads.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Resolves an optional seed, drawing one from system entropy when absent.
#[must_use]
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

/// Creates a generator from an optional seed.
#[must_use]
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Derives the seed of stream `stream` from a base seed (SplitMix64 mix).
#[must_use]
pub fn derive_seed(base: u64, stream: u64) -> u64 {
    let mut z = base
        .wrapping_add(stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Normal variate generator using the Box–Muller transform.
///
/// Each transform yields two independent standard normals; the second is
/// cached and returned by the next call.
#[derive(Debug, Clone)]
pub struct BoxMuller {
    mean: f64,
    std_dev: f64,
    spare: Option<f64>,
}

impl BoxMuller {
    /// Creates a generator for `N(mean, std_dev²)`.
    #[must_use]
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self {
            mean,
            std_dev,
            spare: None,
        }
    }

    /// Draws a standard normal variate.
    pub fn standard<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        if let Some(z) = self.spare.take() {
            return z;
        }
        // u1 in (0, 1] keeps ln finite
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = rng.gen::<f64>();
        let radius = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * PI * u2;
        self.spare = Some(radius * theta.sin());
        radius * theta.cos()
    }

    /// Draws a variate from `N(mean, std_dev²)`.
    pub fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        self.mean + self.std_dev * self.standard(rng)
    }
}

/// Draws `count` normal variates with the given mean and standard deviation.
pub fn normal_samples<R: Rng + ?Sized>(
    rng: &mut R,
    mean: f64,
    std_dev: f64,
    count: usize,
) -> Vec<f64> {
    let mut generator = BoxMuller::new(mean, std_dev);
    (0..count).map(|_| generator.sample(rng)).collect()
}

/// Draws a long-only weight vector summing to 1.
///
/// Independent uniforms normalized by their sum. Falls back to equal
/// weights in the (measure-zero) case where every uniform is 0.
pub fn random_weights<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let raw: Vec<f64> = (0..n).map(|_| rng.gen::<f64>()).collect();
    let total: f64 = raw.iter().sum();
    if total <= 0.0 {
        return vec![1.0 / n as f64; n];
    }
    raw.into_iter().map(|w| w / total).collect()
}
