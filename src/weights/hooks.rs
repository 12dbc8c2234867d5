use crate::plan::PlanMatrix;

/// Extra log-weight contributed by each plan, e.g. a soft constraint the
/// target distribution should favour. Must return one value per plan; `-inf`
/// removes a plan from the weighted ensemble.
pub trait PlanScorer {
    fn score(&self, plans: &PlanMatrix) -> Vec<f64>;
}

impl<F> PlanScorer for F
where
    F: Fn(&PlanMatrix) -> Vec<f64>,
{
    fn score(&self, plans: &PlanMatrix) -> Vec<f64> { self(plans) }
}

/// Default scorer: every plan contributes 0.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoScore;

impl PlanScorer for NoScore {
    fn score(&self, plans: &PlanMatrix) -> Vec<f64> { vec![0.0; plans.num_plans()] }
}

/// Caps extreme importance weights, trading bias for lower variance.
///
/// Receives weights normalized to mean 1 and must return as many
/// non-negative, finite weights.
pub trait WeightTruncation {
    fn truncate(&self, weights: &[f64]) -> Vec<f64>;
}

impl<F> WeightTruncation for F
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    fn truncate(&self, weights: &[f64]) -> Vec<f64> { self(weights) }
}

/// Clip every weight at `0.01 * N^0.4`, where `N` is the ensemble size.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultTruncation;

impl DefaultTruncation {
    /// Cap applied to an ensemble of `n` plans.
    #[inline] pub fn cap(n: usize) -> f64 { 0.01 * (n as f64).powf(0.4) }
}

impl WeightTruncation for DefaultTruncation {
    fn truncate(&self, weights: &[f64]) -> Vec<f64> {
        ClipTruncation { cap: Self::cap(weights.len()) }.truncate(weights)
    }
}

/// Clip every weight at a fixed cap.
#[derive(Clone, Copy, Debug)]
pub struct ClipTruncation {
    pub cap: f64,
}

impl WeightTruncation for ClipTruncation {
    fn truncate(&self, weights: &[f64]) -> Vec<f64> {
        weights.iter().map(|&w| w.min(self.cap)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn no_score_is_all_zero() {
        let plans = PlanMatrix::new(Array2::from_elem((3, 5), 1u32));
        assert_eq!(NoScore.score(&plans), vec![0.0; 5]);
    }

    #[test]
    fn closures_are_scorers() {
        let plans = PlanMatrix::new(Array2::from_elem((2, 3), 1u32));
        let scorer = |plans: &PlanMatrix| (0..plans.num_plans()).map(|j| j as f64).collect::<Vec<_>>();
        assert_eq!(scorer.score(&plans), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn default_cap_scales_with_ensemble_size() {
        assert!((DefaultTruncation::cap(1) - 0.01).abs() < 1e-15);
        assert!((DefaultTruncation::cap(100_000) - 0.01 * 100_000f64.powf(0.4)).abs() < 1e-12);
    }

    #[test]
    fn default_truncation_never_raises_weights() {
        // N = 10^5 puts the cap near 1.0, between the small and large weights.
        let n = 100_000;
        let cap = DefaultTruncation::cap(n);
        let weights = (0..n).map(|i| if i % 1000 == 0 { 50.0 } else { 0.5 }).collect::<Vec<_>>();
        let truncated = DefaultTruncation.truncate(&weights);

        let max_before = weights.iter().copied().fold(0.0, f64::max);
        let max_after = truncated.iter().copied().fold(0.0, f64::max);
        assert!(max_after <= max_before);
        assert!((max_after - cap).abs() < 1e-12);

        for (before, after) in weights.iter().zip(&truncated) {
            assert!(after <= before);
            if *before < cap { assert_eq!(after, before) }
        }
    }

    #[test]
    fn clip_truncation_uses_fixed_cap() {
        assert_eq!(ClipTruncation { cap: 2.0 }.truncate(&[0.5, 2.0, 3.5]), vec![0.5, 2.0, 2.0]);
    }
}
