//! Return analytics over dated value series.
//!
//! All functions treat "not computable" as `None`, never as an error:
//! too few points, non-positive starting values and zero elapsed time all
//! yield `None`.

mod period;

pub use period::{cumulative_return, period_returns};

use quiver_core::types::DAYS_PER_YEAR;
use quiver_core::ValueSeries;

/// Compound annual growth rate between the first and last points.
///
/// ## Formula
///
/// ```text
/// years = days(first, last) / 365.25
/// CAGR  = (V_last / V_first)^(1 / years) − 1
/// ```
///
/// Intermediate points are ignored.
///
/// # Returns
///
/// `None` with fewer than 2 points, a non-positive first or last value, or
/// a last date that is not strictly after the first.
#[must_use]
pub fn annualized_return(series: &ValueSeries) -> Option<f64> {
    let (first, last) = (series.first()?, series.last()?);
    if series.len() < 2 || first.value <= 0.0 || last.value <= 0.0 {
        return None;
    }

    let days = first.date.days_between(&last.date);
    if days <= 0 {
        return None;
    }

    let years = days as f64 / DAYS_PER_YEAR;
    Some((last.value / first.value).powf(1.0 / years) - 1.0)
}

/// Time-weighted average of interval returns.
///
/// Each interval return `r_i = (V_i − V_{i−1}) / V_{i−1}` is weighted by
/// its length in days over the total length of the valid intervals.
/// Intervals starting at a non-positive value are skipped.
///
/// # Returns
///
/// `None` when no interval is valid or the valid intervals span zero days.
#[must_use]
pub fn weighted_average_return(series: &ValueSeries) -> Option<f64> {
    let (weighted, total_days, valid) = series.windows(2).fold(
        (0.0, 0.0, 0usize),
        |(weighted, total_days, valid), pair| {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.value <= 0.0 {
                return (weighted, total_days, valid);
            }
            let days = prev.date.days_between(&next.date) as f64;
            let r = (next.value - prev.value) / prev.value;
            (weighted + r * days, total_days + days, valid + 1)
        },
    );

    if valid == 0 || total_days <= 0.0 {
        None
    } else {
        Some(weighted / total_days)
    }
}
