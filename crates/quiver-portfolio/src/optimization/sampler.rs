//! Batched random search over weight vectors.
//!
//! A run of `draws` samples is split into batches of `batch_size`. Batch
//! `b` draws from its own `StdRng` seeded with `derive_seed(base, b)`, so a
//! seeded run gives the same winner whether batches execute sequentially or
//! on the rayon pool. Cancellation and deadlines are checked before each
//! batch.

use log::debug;
use quiver_config::OptimizerConfig;
use quiver_math::sampling::derive_seed;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::universe::AssetUniverse;
use crate::cancel::RunControl;
use crate::error::PortfolioResult;
use crate::parallel::maybe_parallel_try_map;

/// A scored draw. Lower scores win; ties go to the lower draw index.
#[derive(Debug, Clone)]
pub(crate) struct Scored {
    pub(crate) index: usize,
    pub(crate) score: f64,
    pub(crate) weights: Vec<f64>,
}

impl Scored {
    fn beats(&self, other: &Scored) -> bool {
        self.score < other.score || (self.score == other.score && self.index < other.index)
    }
}

fn better(a: Option<Scored>, b: Option<Scored>) -> Option<Scored> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if b.beats(&a) { b } else { a }),
        (a, None) => a,
        (None, b) => b,
    }
}

/// One sampling run over a universe.
pub(crate) struct Sampler<'a> {
    pub(crate) universe: &'a AssetUniverse,
    pub(crate) config: &'a OptimizerConfig,
    pub(crate) control: &'a RunControl,
}

impl Sampler<'_> {
    /// Draws `draws` weight vectors and keeps the best-scoring one.
    ///
    /// `draw` produces a weight vector from a batch RNG. `score` returns
    /// `None` for ineligible draws and a score (lower is better) otherwise.
    pub(crate) fn best<D, S>(
        &self,
        base_seed: u64,
        draws: usize,
        draw: D,
        score: S,
    ) -> PortfolioResult<Option<Scored>>
    where
        D: Fn(&mut StdRng) -> Vec<f64> + Sync + Send,
        S: Fn(&[f64], f64, f64) -> Option<f64> + Sync + Send,
    {
        let batch_size = self.config.batch_size.max(1);
        let batches = draws.div_ceil(batch_size);

        let winners = maybe_parallel_try_map(batches, self.config, |batch| {
            self.control.check()?;
            let start = batch * batch_size;
            let end = (start + batch_size).min(draws);
            let seed = derive_seed(base_seed, batch as u64);
            self.run_batch(seed, start..end, &draw, &score)
        })?;

        let winner = winners.into_iter().fold(None, better);
        debug!(
            "sampled {draws} portfolios in {batches} batches over {} assets; winner: {:?}",
            self.universe.len(),
            winner.as_ref().map(|w| w.index)
        );
        Ok(winner)
    }

    fn run_batch<D, S>(
        &self,
        seed: u64,
        indices: std::ops::Range<usize>,
        draw: &D,
        score: &S,
    ) -> PortfolioResult<Option<Scored>>
    where
        D: Fn(&mut StdRng) -> Vec<f64>,
        S: Fn(&[f64], f64, f64) -> Option<f64>,
    {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut best: Option<Scored> = None;
        for index in indices {
            let weights = draw(&mut rng);
            let ret = self.universe.portfolio_return(&weights)?;
            let vol = self.universe.portfolio_volatility(&weights)?;
            if let Some(score) = score(&weights, ret, vol) {
                best = better(
                    best,
                    Some(Scored {
                        index,
                        score,
                        weights,
                    }),
                );
            }
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::CancellationToken;
    use crate::error::PortfolioError;
    use nalgebra::DMatrix;
    use quiver_math::sampling::random_weights;

    fn universe() -> AssetUniverse {
        AssetUniverse::new(
            vec!["A".into(), "B".into(), "C".into()],
            vec![0.05, 0.08, 0.12],
            DMatrix::from_row_slice(
                3,
                3,
                &[0.01, 0.002, 0.001, 0.002, 0.04, 0.006, 0.001, 0.006, 0.09],
            ),
        )
        .unwrap()
    }

    #[test]
    fn test_seeded_run_is_reproducible() {
        let universe = universe();
        let control = RunControl::default();
        let run = |batch_size: usize| {
            let config = OptimizerConfig::sequential().with_batch_size(batch_size);
            let sampler = Sampler {
                universe: &universe,
                config: &config,
                control: &control,
            };
            sampler
                .best(9, 2_000, |rng| random_weights(rng, 3), |_, _, vol| Some(vol))
                .unwrap()
                .unwrap()
        };

        let a = run(500);
        let b = run(500);
        assert_eq!(a.index, b.index);
        assert_eq!(a.weights, b.weights);
    }

    #[test]
    fn test_ineligible_draws_are_skipped() {
        let universe = universe();
        let config = OptimizerConfig::sequential();
        let control = RunControl::default();
        let sampler = Sampler {
            universe: &universe,
            config: &config,
            control: &control,
        };
        let none = sampler
            .best(1, 100, |rng| random_weights(rng, 3), |_, _, _| None)
            .unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn test_cancelled_before_first_batch() {
        let universe = universe();
        let config = OptimizerConfig::sequential();
        let token = CancellationToken::new();
        token.cancel();
        let control = RunControl::start(Some(token), None);
        let sampler = Sampler {
            universe: &universe,
            config: &config,
            control: &control,
        };
        let err = sampler
            .best(1, 100, |rng| random_weights(rng, 3), |_, _, vol| Some(vol))
            .unwrap_err();
        assert!(matches!(err, PortfolioError::Cancelled));
    }

    #[test]
    fn test_tie_break_prefers_lower_index() {
        let a = Scored {
            index: 4,
            score: 1.0,
            weights: vec![],
        };
        let b = Scored {
            index: 2,
            score: 1.0,
            weights: vec![],
        };
        assert_eq!(better(Some(a), Some(b)).unwrap().index, 2);
    }
}
