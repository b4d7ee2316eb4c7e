//! Value at Risk and Conditional VaR over periodic returns.
//!
//! All estimators take fractional returns (`-0.01` for −1%) and report a
//! positive loss in percent. Below the minimum sample size every estimator
//! returns `0.0`.

use quiver_math::sampling::normal_samples;
use quiver_math::statistics::{mean, sorted_ascending, std_dev, tail_index, z_score_for_confidence};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default minimum number of returns for tail estimators.
pub const DEFAULT_MIN_SAMPLE_SIZE: usize = 30;

/// VaR estimation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VarMethod {
    /// Normal approximation from the sample mean and standard deviation.
    Parametric,
    /// Empirical percentile of the observed returns.
    Historical,
    /// Empirical percentile of simulated normal returns.
    MonteCarlo,
}

/// Parametric (variance-covariance) VaR.
///
/// ## Formula
///
/// ```text
/// VaR = |μ − z(confidence) × σ| × 100
/// ```
///
/// `z` comes from the fixed table {0.90, 0.95, 0.99, 0.999}; other levels
/// use the 95% value.
#[must_use]
pub fn parametric_var(returns: &[f64], confidence_level: f64, min_sample_size: usize) -> f64 {
    if returns.len() < min_sample_size {
        return 0.0;
    }
    let z = z_score_for_confidence(confidence_level);
    (mean(returns) - z * std_dev(returns)).abs() * 100.0
}

/// Historical VaR: the tail observation of the sorted sample.
///
/// The tail index is `ceil((1 − confidence) × n)`, clamped to `n − 1`.
#[must_use]
pub fn historical_var(returns: &[f64], confidence_level: f64, min_sample_size: usize) -> f64 {
    if returns.is_empty() || returns.len() < min_sample_size {
        return 0.0;
    }
    let sorted = sorted_ascending(returns);
    sorted[tail_index(confidence_level, sorted.len())].abs() * 100.0
}

/// Monte Carlo VaR from `simulations` normal draws.
///
/// Draws use the sample mean and standard deviation (Box–Muller) and take
/// the same percentile as [`historical_var`]. The generator is supplied by
/// the caller, so a seeded generator gives a reproducible result.
pub fn monte_carlo_var<R: Rng + ?Sized>(
    returns: &[f64],
    confidence_level: f64,
    simulations: usize,
    min_sample_size: usize,
    rng: &mut R,
) -> f64 {
    if simulations == 0 || returns.is_empty() || returns.len() < min_sample_size {
        return 0.0;
    }
    let simulated = normal_samples(rng, mean(returns), std_dev(returns), simulations);
    let sorted = sorted_ascending(&simulated);
    sorted[tail_index(confidence_level, sorted.len())].abs() * 100.0
}

/// Conditional VaR (expected shortfall).
///
/// Mean of the returns strictly below the historical VaR threshold,
/// reported as a positive percent. Falls back to the historical VaR when no
/// return lies below the threshold, and is never reported below it.
#[must_use]
pub fn conditional_var(returns: &[f64], confidence_level: f64, min_sample_size: usize) -> f64 {
    if returns.is_empty() || returns.len() < min_sample_size {
        return 0.0;
    }
    let sorted = sorted_ascending(returns);
    let threshold = sorted[tail_index(confidence_level, sorted.len())];
    let var = threshold.abs() * 100.0;

    let tail: Vec<f64> = sorted.iter().copied().take_while(|&r| r < threshold).collect();
    if tail.is_empty() {
        return var;
    }
    (mean(&tail).abs() * 100.0).max(var)
}
