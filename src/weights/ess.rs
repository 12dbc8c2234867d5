/// Effective sample size `N * mean(w)^2 / mean(w^2)` of a weight vector.
///
/// Invariant under positive rescaling of `w`, so the weights are divided by
/// their maximum first to keep the squares in range. Returns 0 for an empty or
/// all-zero vector; otherwise the value lies in `[1, N]`.
pub fn effective_sample_size(weights: &[f64]) -> f64 {
    let max = weights.iter().copied().fold(0.0, f64::max);
    if max <= 0.0 { return 0.0 }

    let (sum, sum_sq) = weights.iter()
        .map(|&w| w / max)
        .fold((0.0, 0.0), |(s, ss), w| (s + w, ss + w * w));

    sum * sum / sum_sq
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_weights_give_full_size() {
        assert!((effective_sample_size(&[0.25; 4]) - 4.0).abs() < 1e-12);
        assert!((effective_sample_size(&[7.0; 10]) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn single_nonzero_weight_gives_one() {
        assert!((effective_sample_size(&[0.0, 0.0, 3.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn matches_textbook_formula() {
        let w = [1.0, 2.0, 3.0, 4.0];
        let n = w.len() as f64;
        let mean = w.iter().sum::<f64>() / n;
        let mean_sq = w.iter().map(|x| x * x).sum::<f64>() / n;
        assert!((effective_sample_size(&w) - n * mean * mean / mean_sq).abs() < 1e-12);
    }

    #[test]
    fn huge_weights_do_not_overflow() {
        let n_eff = effective_sample_size(&[1e300, 1e300]);
        assert!((n_eff - 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(effective_sample_size(&[]), 0.0);
    }
}
