//! Portfolio optimizer configuration.

use serde::{Deserialize, Serialize};

use crate::error::{check_finite, check_positive, Validate, ValidationError};
use crate::risk::{default_risk_free_rate, default_trading_days};

/// Configuration for sampling-based portfolio optimization.
///
/// Controls sample counts, frontier resolution, batching, parallelism and
/// run limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Annual risk-free rate used for Sharpe ratios and the capital
    /// allocation line.
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,

    /// Periods per year used to annualize return series.
    #[serde(default = "default_trading_days")]
    pub trading_days_per_year: u32,

    /// Random portfolios drawn by tangency, minimum-variance and
    /// constrained searches.
    #[serde(default = "default_samples")]
    pub samples: usize,

    /// Default number of efficient-frontier points.
    #[serde(default = "default_frontier_points")]
    pub frontier_points: usize,

    /// Draws per frontier target.
    #[serde(default = "default_frontier_draws")]
    pub frontier_draws: usize,

    /// Maximum distance between a draw's return and the frontier target.
    #[serde(default = "default_return_tolerance")]
    pub return_tolerance: f64,

    /// Draws per batch. Each batch owns an RNG derived from the base seed.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Random seed for reproducibility (None = system entropy).
    #[serde(default)]
    pub seed: Option<u64>,

    /// Wall-clock limit for one optimization run, in milliseconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Enable parallel batch sampling (requires the 'parallel' feature).
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Minimum batch count to trigger parallel sampling.
    /// Below this threshold, sequential is faster due to thread overhead.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_samples() -> usize {
    10_000
}

fn default_frontier_points() -> usize {
    20
}

fn default_frontier_draws() -> usize {
    1_000
}

fn default_return_tolerance() -> f64 {
    0.001
}

fn default_batch_size() -> usize {
    1_000
}

fn default_parallel() -> bool {
    true
}

fn default_parallel_threshold() -> usize {
    4
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: default_risk_free_rate(),
            trading_days_per_year: default_trading_days(),
            samples: default_samples(),
            frontier_points: default_frontier_points(),
            frontier_draws: default_frontier_draws(),
            return_tolerance: default_return_tolerance(),
            batch_size: default_batch_size(),
            seed: None,
            timeout_ms: None,
            parallel: default_parallel(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl OptimizerConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always samples sequentially.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the annual risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Sets the number of periods per year.
    #[must_use]
    pub fn with_trading_days(mut self, days: u32) -> Self {
        self.trading_days_per_year = days;
        self
    }

    /// Sets the sample count for tangency/min-variance/constrained searches.
    #[must_use]
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Sets the default number of frontier points.
    #[must_use]
    pub fn with_frontier_points(mut self, points: usize) -> Self {
        self.frontier_points = points;
        self
    }

    /// Sets the draws per frontier target.
    #[must_use]
    pub fn with_frontier_draws(mut self, draws: usize) -> Self {
        self.frontier_draws = draws;
        self
    }

    /// Sets the frontier return tolerance.
    #[must_use]
    pub fn with_return_tolerance(mut self, tolerance: f64) -> Self {
        self.return_tolerance = tolerance;
        self
    }

    /// Sets the batch size.
    #[must_use]
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Fixes the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets a wall-clock limit per run.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Sets whether to use parallel sampling.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the batch-count threshold for parallel sampling.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Periods per year as a float.
    #[must_use]
    pub fn periods_per_year(&self) -> f64 {
        f64::from(self.trading_days_per_year)
    }

    /// Returns true if parallel sampling should be used for `batches` batches.
    #[must_use]
    pub fn should_parallelize(&self, batches: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && batches >= self.parallel_threshold
    }
}

impl Validate for OptimizerConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        check_finite(&mut errors, "risk_free_rate", self.risk_free_rate);
        if self.trading_days_per_year == 0 {
            errors.push(ValidationError::with_rule(
                "trading_days_per_year",
                "must be greater than zero",
                "positive",
            ));
        }
        check_positive(&mut errors, "samples", self.samples);
        check_positive(&mut errors, "frontier_points", self.frontier_points);
        check_positive(&mut errors, "frontier_draws", self.frontier_draws);
        check_positive(&mut errors, "batch_size", self.batch_size);

        if !(self.return_tolerance.is_finite() && self.return_tolerance > 0.0) {
            errors.push(ValidationError::with_rule(
                "return_tolerance",
                "Return tolerance must be a positive number",
                "positive_tolerance",
            ));
        }

        if self.timeout_ms == Some(0) {
            errors.push(ValidationError::with_rule(
                "timeout_ms",
                "Timeout must be greater than zero when set",
                "positive",
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = OptimizerConfig::default();
        assert_eq!(config.samples, 10_000);
        assert_eq!(config.frontier_points, 20);
        assert_eq!(config.frontier_draws, 1_000);
        assert_eq!(config.return_tolerance, 0.001);
        assert_eq!(config.batch_size, 1_000);
        assert!(config.parallel);
        assert!(config.seed.is_none());
        assert!(config.timeout_ms.is_none());
        assert!(config.is_valid());
    }

    #[test]
    fn test_sequential() {
        assert!(!OptimizerConfig::sequential().parallel);
        assert!(!OptimizerConfig::sequential().should_parallelize(1_000));
    }

    #[test]
    fn test_builder_pattern() {
        let config = OptimizerConfig::new()
            .with_samples(2_000)
            .with_batch_size(250)
            .with_seed(42)
            .with_timeout_ms(500)
            .with_threshold(2);

        assert_eq!(config.samples, 2_000);
        assert_eq!(config.batch_size, 250);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.timeout_ms, Some(500));
        assert_eq!(config.parallel_threshold, 2);
    }

    #[test]
    fn test_should_parallelize() {
        let config = OptimizerConfig::new().with_threshold(4);

        #[cfg(feature = "parallel")]
        {
            assert!(!config.should_parallelize(3));
            assert!(config.should_parallelize(4));
        }

        #[cfg(not(feature = "parallel"))]
        {
            assert!(!config.should_parallelize(3));
            assert!(!config.should_parallelize(4));
        }
    }

    #[test]
    fn test_validation() {
        let config = OptimizerConfig::new()
            .with_batch_size(0)
            .with_return_tolerance(-1.0)
            .with_timeout_ms(0);
        let errors = config.validate();
        assert_eq!(errors.len(), 3);
    }
}
