//! Portfolio optimizer service object.

use log::{debug, warn};
use quiver_config::{OptimizerConfig, Validate};
use quiver_math::sampling::{derive_seed, random_weights, resolve_seed, rng_from_seed};

use super::cal::{capital_allocation_line, CalPoint};
use super::candidate::{CandidateKind, PortfolioCandidate};
use super::constraints::{Objective, WeightConstraints};
use super::sampler::Sampler;
use super::universe::AssetUniverse;
use crate::cancel::{CancellationToken, RunControl};
use crate::error::{PortfolioError, PortfolioResult};

fn sharpe(expected_return: f64, volatility: f64, risk_free_rate: f64) -> f64 {
    if volatility > 0.0 {
        (expected_return - risk_free_rate) / volatility
    } else {
        0.0
    }
}

fn require_assets(universe: &AssetUniverse) -> PortfolioResult<()> {
    if universe.is_empty() {
        return Err(PortfolioError::validation(
            "universe",
            "at least one asset is required",
        ));
    }
    Ok(())
}

/// Random-sampling portfolio optimizer.
///
/// Holds only configuration and an optional cancellation token. Each call
/// starts its own deadline from `timeout_ms` and resolves its own seed, so
/// a seeded optimizer returns identical candidates on every call.
///
/// # Example
///
/// ```rust
/// use nalgebra::DMatrix;
/// use quiver_config::OptimizerConfig;
/// use quiver_portfolio::optimization::{AssetUniverse, PortfolioOptimizer};
///
/// let universe = AssetUniverse::new(
///     vec!["Stocks".into(), "Bonds".into()],
///     vec![0.08, 0.03],
///     DMatrix::from_row_slice(2, 2, &[0.04, 0.002, 0.002, 0.0025]),
/// )
/// .unwrap();
///
/// let optimizer =
///     PortfolioOptimizer::new(OptimizerConfig::sequential().with_seed(7).with_samples(2_000))
///         .unwrap();
/// let best = optimizer.tangency_portfolio(&universe).unwrap();
/// assert!((best.weight_sum() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PortfolioOptimizer {
    config: OptimizerConfig,
    token: Option<CancellationToken>,
}

impl PortfolioOptimizer {
    /// Creates an optimizer.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::Config` if the configuration is invalid.
    pub fn new(config: OptimizerConfig) -> PortfolioResult<Self> {
        config.validate_or_error()?;
        Ok(Self {
            config,
            token: None,
        })
    }

    /// Attaches a cancellation token checked between sampling batches.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    fn control(&self) -> RunControl {
        RunControl::start(self.token.clone(), self.config.timeout_ms)
    }

    fn sampler<'a>(&'a self, universe: &'a AssetUniverse, control: &'a RunControl) -> Sampler<'a> {
        Sampler {
            universe,
            config: &self.config,
            control,
        }
    }

    /// Deterministic `1/N` portfolio.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty universe.
    pub fn equal_weight_portfolio(
        &self,
        universe: &AssetUniverse,
    ) -> PortfolioResult<PortfolioCandidate> {
        require_assets(universe)?;
        let n = universe.len();
        universe.evaluate(
            vec![1.0 / n as f64; n],
            self.config.risk_free_rate,
            CandidateKind::EqualWeight,
        )
    }

    /// Lowest-volatility portfolio among `samples` long-only draws.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty universe, or `Cancelled` /
    /// `TimedOut` if the run is interrupted.
    pub fn minimum_variance_portfolio(
        &self,
        universe: &AssetUniverse,
    ) -> PortfolioResult<PortfolioCandidate> {
        self.search(universe, CandidateKind::MinimumVariance, |_, vol| vol)
    }

    /// Highest-Sharpe portfolio among `samples` long-only draws.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty universe, or `Cancelled` /
    /// `TimedOut` if the run is interrupted.
    pub fn tangency_portfolio(
        &self,
        universe: &AssetUniverse,
    ) -> PortfolioResult<PortfolioCandidate> {
        let rf = self.config.risk_free_rate;
        self.search(universe, CandidateKind::Tangency, move |ret, vol| {
            -sharpe(ret, vol, rf)
        })
    }

    fn search<F>(
        &self,
        universe: &AssetUniverse,
        kind: CandidateKind,
        score: F,
    ) -> PortfolioResult<PortfolioCandidate>
    where
        F: Fn(f64, f64) -> f64 + Sync + Send,
    {
        require_assets(universe)?;
        let n = universe.len();
        let control = self.control();
        let seed = resolve_seed(self.config.seed);

        let winner = self
            .sampler(universe, &control)
            .best(
                seed,
                self.config.samples,
                |rng| random_weights(rng, n),
                |_, ret, vol| Some(score(ret, vol)),
            )?
            .ok_or_else(|| PortfolioError::validation("samples", "must be > 0"))?;

        debug!("{kind:?} search (seed {seed}) picked draw {}", winner.index);
        universe.evaluate(winner.weights, self.config.risk_free_rate, kind)
    }

    /// Efficient frontier with `frontier_points` targets.
    ///
    /// # Errors
    ///
    /// Same conditions as [`PortfolioOptimizer::frontier_with_points`].
    pub fn efficient_frontier(
        &self,
        universe: &AssetUniverse,
    ) -> PortfolioResult<Vec<PortfolioCandidate>> {
        self.frontier_with_points(universe, self.config.frontier_points)
    }

    /// Efficient frontier with `num_points` target returns.
    ///
    /// Targets are evenly spaced from the lowest to the highest single-asset
    /// expected return (one point yields the lowest). For each target,
    /// `frontier_draws` random portfolios are sampled and the
    /// lowest-volatility one within `return_tolerance` of the target is
    /// kept. A target no draw reaches falls back to one random portfolio,
    /// tagged [`CandidateKind::Random`].
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty universe, or `Cancelled` /
    /// `TimedOut` if the run is interrupted.
    pub fn frontier_with_points(
        &self,
        universe: &AssetUniverse,
        num_points: usize,
    ) -> PortfolioResult<Vec<PortfolioCandidate>> {
        require_assets(universe)?;
        let Some((lo, hi)) = universe.return_range() else {
            return Ok(Vec::new());
        };

        let n = universe.len();
        let rf = self.config.risk_free_rate;
        let tolerance = self.config.return_tolerance;
        let control = self.control();
        let sampler = self.sampler(universe, &control);
        let seed = resolve_seed(self.config.seed);
        let step = if num_points > 1 {
            (hi - lo) / (num_points - 1) as f64
        } else {
            0.0
        };

        let mut frontier = Vec::with_capacity(num_points);
        for k in 0..num_points {
            let target = lo + step * k as f64;
            let target_seed = derive_seed(seed, k as u64);

            let winner = sampler.best(
                target_seed,
                self.config.frontier_draws,
                |rng| random_weights(rng, n),
                |_, ret, vol| ((ret - target).abs() <= tolerance).then_some(vol),
            )?;

            let candidate = match winner {
                Some(winner) => universe.evaluate(winner.weights, rf, CandidateKind::Frontier)?,
                None => {
                    warn!(
                        "no sampled portfolio within {tolerance} of target return {target:.6}; \
                         using a random portfolio"
                    );
                    let mut rng = rng_from_seed(Some(derive_seed(target_seed, u64::MAX)));
                    universe.evaluate(random_weights(&mut rng, n), rf, CandidateKind::Random)?
                }
            };
            frontier.push(candidate);
        }

        debug!(
            "efficient frontier (seed {seed}): {} points between {lo:.6} and {hi:.6}",
            frontier.len()
        );
        Ok(frontier)
    }

    /// Best portfolio under per-asset weight bounds.
    ///
    /// Each draw is scaled to `total_weight` and clamped into
    /// `[min_weight, max_weight]`; clamping can leave the sum slightly off
    /// the total. The objective picks the winner.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty universe or unsatisfiable
    /// constraints, or `Cancelled` / `TimedOut` if the run is interrupted.
    pub fn constrained_portfolio(
        &self,
        universe: &AssetUniverse,
        constraints: &WeightConstraints,
        objective: Objective,
    ) -> PortfolioResult<PortfolioCandidate> {
        require_assets(universe)?;
        let n = universe.len();
        constraints.validate(n)?;

        let rf = self.config.risk_free_rate;
        let control = self.control();
        let seed = resolve_seed(self.config.seed);

        let winner = self
            .sampler(universe, &control)
            .best(
                seed,
                self.config.samples,
                |rng| constraints.apply(&random_weights(rng, n)),
                |_, ret, vol| {
                    Some(match objective {
                        Objective::MaxSharpe => -sharpe(ret, vol, rf),
                        Objective::MinVariance => vol,
                    })
                },
            )?
            .ok_or_else(|| PortfolioError::validation("samples", "must be > 0"))?;

        debug!(
            "constrained {objective:?} search (seed {seed}) picked draw {}",
            winner.index
        );
        universe.evaluate(winner.weights, rf, CandidateKind::Constrained)
    }

    /// Capital allocation line through `portfolio` at the configured
    /// risk-free rate.
    #[must_use]
    pub fn capital_allocation_line(
        &self,
        portfolio: &PortfolioCandidate,
        points: usize,
    ) -> Vec<CalPoint> {
        capital_allocation_line(portfolio, self.config.risk_free_rate, points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;

    fn universe() -> AssetUniverse {
        AssetUniverse::new(
            vec!["Equity".into(), "Bond".into(), "Cash".into()],
            vec![0.09, 0.04, 0.02],
            DMatrix::from_row_slice(
                3,
                3,
                &[0.04, 0.002, 0.0, 0.002, 0.0036, 0.0, 0.0, 0.0, 0.0001],
            ),
        )
        .unwrap()
    }

    fn optimizer() -> PortfolioOptimizer {
        PortfolioOptimizer::new(
            OptimizerConfig::sequential()
                .with_seed(11)
                .with_samples(3_000)
                .with_frontier_draws(500)
                .with_batch_size(250),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let err = PortfolioOptimizer::new(OptimizerConfig::new().with_samples(0)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_equal_weight() {
        let candidate = optimizer().equal_weight_portfolio(&universe()).unwrap();
        assert_eq!(candidate.kind, CandidateKind::EqualWeight);
        for w in &candidate.weights {
            assert_relative_eq!(*w, 1.0 / 3.0, epsilon = 1e-15);
        }
        assert_relative_eq!(candidate.expected_return, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_universe_is_rejected() {
        let empty = AssetUniverse::new(vec![], vec![], DMatrix::zeros(0, 0)).unwrap();
        let opt = optimizer();
        assert!(opt.equal_weight_portfolio(&empty).unwrap_err().is_validation());
        assert!(opt.tangency_portfolio(&empty).unwrap_err().is_validation());
        assert!(opt.efficient_frontier(&empty).unwrap_err().is_validation());
    }

    #[test]
    fn test_min_variance_beats_equal_weight() {
        let opt = optimizer();
        let u = universe();
        let min_var = opt.minimum_variance_portfolio(&u).unwrap();
        let equal = opt.equal_weight_portfolio(&u).unwrap();
        assert!(min_var.volatility <= equal.volatility);
        assert_relative_eq!(min_var.weight_sum(), 1.0, epsilon = 1e-9);
        // Cash dominates the low-volatility corner
        assert!(min_var.weights[2] > min_var.weights[0]);
    }

    #[test]
    fn test_tangency_has_highest_sharpe_of_the_named_portfolios() {
        let opt = optimizer();
        let u = universe();
        let tangency = opt.tangency_portfolio(&u).unwrap();
        let equal = opt.equal_weight_portfolio(&u).unwrap();
        assert_eq!(tangency.kind, CandidateKind::Tangency);
        assert!(tangency.sharpe_ratio >= equal.sharpe_ratio);
    }

    #[test]
    fn test_seeded_calls_repeat() {
        let opt = optimizer();
        let u = universe();
        assert_eq!(
            opt.tangency_portfolio(&u).unwrap(),
            opt.tangency_portfolio(&u).unwrap()
        );
        assert_eq!(
            opt.frontier_with_points(&u, 4).unwrap(),
            opt.frontier_with_points(&u, 4).unwrap()
        );
    }

    #[test]
    fn test_frontier_targets() {
        let opt = optimizer();
        let u = universe();
        let frontier = opt.frontier_with_points(&u, 5).unwrap();
        assert_eq!(frontier.len(), 5);
        for candidate in &frontier {
            assert_relative_eq!(candidate.weight_sum(), 1.0, epsilon = 1e-9);
            if candidate.kind == CandidateKind::Frontier {
                assert!(candidate.expected_return >= 0.02 - 0.001 - 1e-12);
                assert!(candidate.expected_return <= 0.09 + 0.001 + 1e-12);
            }
        }
        assert!(opt.frontier_with_points(&u, 0).unwrap().is_empty());
        assert_eq!(opt.frontier_with_points(&u, 1).unwrap().len(), 1);
    }

    #[test]
    fn test_unreachable_target_falls_back_to_random() {
        let opt = PortfolioOptimizer::new(
            OptimizerConfig::sequential()
                .with_seed(3)
                .with_frontier_draws(50)
                .with_return_tolerance(1e-12),
        )
        .unwrap();
        let frontier = opt.frontier_with_points(&universe(), 3).unwrap();
        assert!(frontier.iter().all(|c| c.kind == CandidateKind::Random));
        assert!(frontier
            .iter()
            .all(|c| (c.weight_sum() - 1.0).abs() < 1e-9));
    }

    #[test]
    fn test_constrained_respects_bounds() {
        let opt = optimizer();
        let constraints = WeightConstraints::new(0.1, 0.5);
        for objective in [Objective::MaxSharpe, Objective::MinVariance] {
            let candidate = opt
                .constrained_portfolio(&universe(), &constraints, objective)
                .unwrap();
            assert_eq!(candidate.kind, CandidateKind::Constrained);
            assert!(candidate
                .weights
                .iter()
                .all(|&w| (0.1..=0.5).contains(&w)));
        }

        let impossible = WeightConstraints::new(0.5, 0.9);
        assert!(opt
            .constrained_portfolio(&universe(), &impossible, Objective::MaxSharpe)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_cancelled_optimizer() {
        let token = CancellationToken::new();
        let opt = optimizer().with_cancellation(token.clone());
        token.cancel();
        let err = opt.minimum_variance_portfolio(&universe()).unwrap_err();
        assert!(matches!(err, PortfolioError::Cancelled));
        // Deterministic methods do not sample and ignore the token
        assert!(opt.equal_weight_portfolio(&universe()).is_ok());
    }

    #[test]
    fn test_long_run_times_out() {
        let opt = PortfolioOptimizer::new(
            OptimizerConfig::sequential()
                .with_samples(50_000_000)
                .with_timeout_ms(1),
        )
        .unwrap();
        let err = opt.tangency_portfolio(&universe()).unwrap_err();
        assert!(matches!(err, PortfolioError::TimedOut { timeout_ms: 1 }));
    }

    #[test]
    fn test_cal_uses_configured_rate() {
        let opt = PortfolioOptimizer::new(OptimizerConfig::sequential().with_risk_free_rate(0.03))
            .unwrap();
        let tangency = opt.tangency_portfolio(&universe()).unwrap();
        let line = opt.capital_allocation_line(&tangency, 3);
        assert_eq!(line[0].expected_return, 0.03);
        assert_relative_eq!(line[1].expected_return, tangency.expected_return, epsilon = 1e-12);
    }
}
