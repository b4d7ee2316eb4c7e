//! Covariance and correlation matrices.
//!
//! Matrices are `nalgebra::DMatrix<f64>`, one row/column per asset, in the
//! order the return series were supplied.

use crate::error::{MathError, MathResult};
use crate::statistics::mean;
use nalgebra::{DMatrix, DVector};

/// Builds the sample covariance matrix (`n − 1` denominator) of per-asset
/// return series.
///
/// All series must have the same length and at least two observations.
/// An empty asset list yields a 0×0 matrix.
///
/// # Errors
///
/// - `MathError::DimensionMismatch` if the series lengths differ.
/// - `MathError::InsufficientData` if the series have fewer than 2 points.
pub fn covariance_matrix(series: &[Vec<f64>]) -> MathResult<DMatrix<f64>> {
    let n_assets = series.len();
    if n_assets == 0 {
        return Ok(DMatrix::zeros(0, 0));
    }

    let n_obs = series[0].len();
    if let Some(bad) = series.iter().find(|s| s.len() != n_obs) {
        return Err(MathError::dimension_mismatch(n_obs, bad.len()));
    }
    if n_obs < 2 {
        return Err(MathError::insufficient_data(2, n_obs));
    }

    let means: Vec<f64> = series.iter().map(|s| mean(s)).collect();
    let denom = (n_obs - 1) as f64;

    let mut cov = DMatrix::zeros(n_assets, n_assets);
    for i in 0..n_assets {
        for j in i..n_assets {
            let sum: f64 = series[i]
                .iter()
                .zip(&series[j])
                .map(|(a, b)| (a - means[i]) * (b - means[j]))
                .sum();
            let value = sum / denom;
            cov[(i, j)] = value;
            cov[(j, i)] = value;
        }
    }

    Ok(cov)
}

/// Converts a covariance matrix into a correlation matrix.
///
/// The diagonal is always 1.0. Off-diagonal entries involving an asset with
/// zero standard deviation are 0 rather than NaN.
///
/// # Errors
///
/// Returns `MathError::InvalidInput` if the matrix is not square.
pub fn correlation_matrix(covariance: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
    let n = covariance.nrows();
    if n != covariance.ncols() {
        return Err(MathError::invalid_input(
            "Covariance matrix must be square",
        ));
    }

    let std_devs: Vec<f64> = (0..n).map(|i| covariance[(i, i)].max(0.0).sqrt()).collect();

    Ok(DMatrix::from_fn(n, n, |i, j| {
        if i == j {
            1.0
        } else {
            let denom = std_devs[i] * std_devs[j];
            if denom == 0.0 {
                0.0
            } else {
                covariance[(i, j)] / denom
            }
        }
    }))
}

/// Correlation matrix straight from per-asset return series.
///
/// # Errors
///
/// Same conditions as [`covariance_matrix`].
pub fn correlation_from_returns(series: &[Vec<f64>]) -> MathResult<DMatrix<f64>> {
    correlation_matrix(&covariance_matrix(series)?)
}

/// Portfolio variance `wᵀ Σ w`.
///
/// # Errors
///
/// Returns `MathError::DimensionMismatch` if `weights` does not match the
/// matrix size.
pub fn quadratic_form(weights: &[f64], matrix: &DMatrix<f64>) -> MathResult<f64> {
    let n = matrix.nrows();
    if weights.len() != n || matrix.ncols() != n {
        return Err(MathError::dimension_mismatch(n, weights.len()));
    }
    let w = DVector::from_column_slice(weights);
    Ok((w.transpose() * matrix * &w)[(0, 0)])
}

/// Dot product of two equal-length vectors.
///
/// # Errors
///
/// Returns `MathError::DimensionMismatch` if the lengths differ.
pub fn dot(a: &[f64], b: &[f64]) -> MathResult<f64> {
    if a.len() != b.len() {
        return Err(MathError::dimension_mismatch(a.len(), b.len()));
    }
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::{covariance, variance};
    use approx::assert_relative_eq;

    fn sample_returns() -> Vec<Vec<f64>> {
        vec![
            vec![0.01, -0.02, 0.015, 0.003, -0.007],
            vec![0.004, -0.01, 0.01, 0.002, -0.001],
            vec![-0.005, 0.012, -0.008, 0.001, 0.004],
        ]
    }

    #[test]
    fn test_covariance_matrix_matches_pairwise() {
        let series = sample_returns();
        let cov = covariance_matrix(&series).unwrap();

        assert_eq!(cov.shape(), (3, 3));
        for i in 0..3 {
            assert_relative_eq!(cov[(i, i)], variance(&series[i]), epsilon = 1e-15);
            for j in 0..3 {
                assert_relative_eq!(cov[(i, j)], cov[(j, i)]);
                assert_relative_eq!(
                    cov[(i, j)],
                    covariance(&series[i], &series[j]).unwrap(),
                    epsilon = 1e-15
                );
            }
        }
    }

    #[test]
    fn test_covariance_matrix_errors() {
        let ragged = vec![vec![0.1, 0.2, 0.3], vec![0.1, 0.2]];
        assert!(matches!(
            covariance_matrix(&ragged),
            Err(MathError::DimensionMismatch { .. })
        ));

        let short = vec![vec![0.1], vec![0.2]];
        assert!(matches!(
            covariance_matrix(&short),
            Err(MathError::InsufficientData { .. })
        ));

        assert_eq!(covariance_matrix(&[]).unwrap().shape(), (0, 0));
    }

    #[test]
    fn test_correlation_matrix() {
        let corr = correlation_from_returns(&sample_returns()).unwrap();
        for i in 0..3 {
            assert_relative_eq!(corr[(i, i)], 1.0);
            for j in 0..3 {
                assert!(corr[(i, j)] <= 1.0 + 1e-12 && corr[(i, j)] >= -1.0 - 1e-12);
            }
        }
        // Asset 2 moves against asset 0
        assert!(corr[(0, 2)] < 0.0);
    }

    #[test]
    fn test_correlation_zero_variance_asset() {
        let series = vec![vec![0.01, 0.02, -0.01], vec![0.0, 0.0, 0.0]];
        let corr = correlation_from_returns(&series).unwrap();
        assert_eq!(corr[(0, 1)], 0.0);
        assert_eq!(corr[(1, 0)], 0.0);
        assert_eq!(corr[(1, 1)], 1.0);
    }

    #[test]
    fn test_quadratic_form() {
        let cov = DMatrix::from_row_slice(2, 2, &[0.04, 0.006, 0.006, 0.09]);
        let w = [0.5, 0.5];
        // 0.25*0.04 + 2*0.25*0.006 + 0.25*0.09
        assert_relative_eq!(quadratic_form(&w, &cov).unwrap(), 0.0355, epsilon = 1e-15);
        assert!(quadratic_form(&[1.0], &cov).is_err());
    }

    #[test]
    fn test_dot() {
        assert_relative_eq!(dot(&[0.2, 0.8], &[0.1, 0.05]).unwrap(), 0.06, epsilon = 1e-15);
        assert!(dot(&[1.0], &[1.0, 2.0]).is_err());
    }
}
