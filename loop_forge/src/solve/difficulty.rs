//! Weighted difficulty scorer. Grounded on `calculate_difficulty`: each rule
//! level's fired-count is turned into a 0..1 ratio relative to neighboring
//! levels, capped, then weighted and summed.

use super::NUM_LEVELS;

const WEIGHTS: [f64; NUM_LEVELS] = [0.25, 0.25, 1.5, 2.0, 0.5, 2.5, 3.0];

/// `counts[L]` is how many times rule level `L` fired while solving.
pub fn calculate(counts: &[u32; NUM_LEVELS]) -> f64 {
    let total: u32 = counts.iter().sum();
    let mut score = 0.0;
    for (i, &weight) in WEIGHTS.iter().enumerate() {
        let ratio = if i == 0 || i == 1 {
            if total > 0 {
                counts[i] as f64 / (total as f64 / 2.0)
            } else {
                0.0
            }
        } else if i == 2 {
            ratio_against(counts[2] as f64, counts[0] as f64 / 10.0, counts[0] > 0)
        } else if i == 6 {
            ratio_against(counts[6] as f64, counts[5] as f64, counts[5] > 0) * 4.0
        } else {
            ratio_against(counts[i] as f64, counts[i - 1] as f64, counts[i - 1] > 0)
        };
        score += ratio.min(1.0) * weight;
    }
    score
}

/// `numerator / denominator`, with the source's zero-denominator fallback:
/// 1.0 if the numerator fired anyway, 0.0 otherwise. `denominator_nonzero`
/// carries the source's own zero check on the *integer* count behind
/// `denominator`, since `denominator` itself may already be a scaled-down
/// float (e.g. `counts[0] as f64 / 10.0`) that rounds to zero even when
/// `counts[0]` didn't.
fn ratio_against(numerator: f64, denominator: f64, denominator_nonzero: bool) -> f64 {
    if denominator_nonzero {
        numerator / denominator
    } else if numerator > 0.0 {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn all_zero_counts_score_zero() {
        assert_eq!(calculate(&[0; NUM_LEVELS]), 0.0);
    }

    #[test]
    fn each_ratio_is_capped_at_one() {
        // L3 firing with no L2 denominator falls back to a capped ratio of 1.
        let counts = [0, 0, 0, 5, 0, 0, 0];
        let score = calculate(&counts);
        assert_eq!(score, WEIGHTS[3]);
    }
}
