//! Confidence-level lookups for tail estimators.

/// One-sided z-score at 90% confidence.
pub const Z_SCORE_90: f64 = 1.282;
/// One-sided z-score at 95% confidence.
pub const Z_SCORE_95: f64 = 1.645;
/// One-sided z-score at 99% confidence.
pub const Z_SCORE_99: f64 = 2.326;
/// One-sided z-score at 99.9% confidence.
pub const Z_SCORE_999: f64 = 3.09;

/// Z-score for a confidence level from the fixed lookup table.
///
/// Recognized levels are 0.90, 0.95, 0.99 and 0.999 (matched within 1e-6).
/// Any other level falls back to the 95% z-score.
#[must_use]
pub fn z_score_for_confidence(confidence: f64) -> f64 {
    const TABLE: [(f64, f64); 4] = [
        (0.90, Z_SCORE_90),
        (0.95, Z_SCORE_95),
        (0.99, Z_SCORE_99),
        (0.999, Z_SCORE_999),
    ];

    TABLE
        .iter()
        .find(|(level, _)| (level - confidence).abs() < 1e-6)
        .map_or(Z_SCORE_95, |(_, z)| *z)
}

/// Index of the tail observation in an ascending sample of length `n`.
///
/// ```text
/// index = ceil((1 − confidence) × n), clamped to n − 1
/// ```
///
/// Unlike a literal float `ceil`, the product is lowered by 1e-9 first.
/// In binary `(1 − 0.95) × 100` is `5.000000000000004`, which a plain
/// `ceil` sends to 6; here it lands on 5. Products more than 1e-9 above an
/// integer still round up. Returns 0 for an empty sample.
#[must_use]
pub fn tail_index(confidence: f64, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let raw = ((1.0 - confidence) * n as f64 - 1e-9).ceil().max(0.0) as usize;
    raw.min(n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_z_score_table() {
        assert_eq!(z_score_for_confidence(0.90), Z_SCORE_90);
        assert_eq!(z_score_for_confidence(0.95), Z_SCORE_95);
        assert_eq!(z_score_for_confidence(0.99), Z_SCORE_99);
        assert_eq!(z_score_for_confidence(0.999), Z_SCORE_999);
    }

    #[test]
    fn test_unrecognized_confidence_defaults_to_95() {
        assert_eq!(z_score_for_confidence(0.975), Z_SCORE_95);
        assert_eq!(z_score_for_confidence(0.5), Z_SCORE_95);
    }

    #[test]
    fn test_tail_index() {
        assert_eq!(((1.0 - 0.95) * 100.0_f64).ceil() as usize, 6);
        assert_eq!(tail_index(0.95, 100), 5);
        assert_eq!(tail_index(0.99, 100), 1);
        assert_eq!(tail_index(0.95, 30), 2); // ceil(1.5)
        assert_eq!(tail_index(0.90, 30), 3);
        assert_eq!(tail_index(0.0, 10), 9); // clamped
        assert_eq!(tail_index(0.95, 0), 0);
    }
}
