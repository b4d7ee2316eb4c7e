//! Parallel processing utilities for batch sampling.
//!
//! Provides conditional parallel iteration based on configuration
//! and batch count. Uses rayon when the `parallel` feature is enabled.

use quiver_config::OptimizerConfig;

/// Maps a fallible function over `0..count`, conditionally in parallel.
///
/// Uses parallel iteration when:
/// - The `parallel` feature is enabled
/// - `config.parallel` is true
/// - `count` reaches `config.parallel_threshold`
///
/// Results are returned in index order either way. The first error stops
/// the remaining work (rayon short-circuits `collect` into `Result`).
#[allow(unused_variables)]
pub fn maybe_parallel_try_map<U, E, F>(
    count: usize,
    config: &OptimizerConfig,
    f: F,
) -> Result<Vec<U>, E>
where
    U: Send,
    E: Send,
    F: Fn(usize) -> Result<U, E> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(count) {
            return (0..count).into_par_iter().map(f).collect();
        }
    }

    (0..count).map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_order() {
        let config = OptimizerConfig::new().with_threshold(1);
        let out: Result<Vec<usize>, ()> = maybe_parallel_try_map(100, &config, |i| Ok(i * 2));
        assert_eq!(out.unwrap(), (0..100).map(|i| i * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_stops_on_error() {
        let config = OptimizerConfig::sequential();
        let out: Result<Vec<usize>, String> = maybe_parallel_try_map(10, &config, |i| {
            if i == 3 {
                Err(format!("batch {i}"))
            } else {
                Ok(i)
            }
        });
        assert_eq!(out.unwrap_err(), "batch 3");
    }
}
