//! Weighted final-grade computation.

/// Weight of each corte in the final grade.
pub const CORTE1_WEIGHT: f64 = 0.30;
pub const CORTE2_WEIGHT: f64 = 0.35;
pub const CORTE3_WEIGHT: f64 = 0.35;

/// Inclusive score range for a corte.
pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 5.0;

/// Compute the weighted final grade, rounded to 2 decimal places.
///
/// Returns `None` unless all three cortes are present.
pub fn compute_final(
    corte1: Option<f64>,
    corte2: Option<f64>,
    corte3: Option<f64>,
) -> Option<f64> {
    match (corte1, corte2, corte3) {
        (Some(c1), Some(c2), Some(c3)) => {
            let raw = c1 * CORTE1_WEIGHT + c2 * CORTE2_WEIGHT + c3 * CORTE3_WEIGHT;
            Some((raw * 100.0).round() / 100.0)
        }
        _ => None,
    }
}

/// Whether a corte score lies in the allowed range [0.0, 5.0].
pub fn score_in_range(score: f64) -> bool {
    (MIN_SCORE..=MAX_SCORE).contains(&score)
}
