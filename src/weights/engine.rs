use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    error::{DegeneracyWarning, EnsembleError, Result, ensure_config},
    plan::PlanMatrix,
    weights::{DefaultTruncation, NoScore, PlanScorer, WeightTruncation, effective_sample_size},
};

/// Largest exponent allowed after centering. Keeps `exp` and the subsequent
/// sum well inside `f64` range for any realistic ensemble size.
const MAX_CENTERED_LOG_WEIGHT: f64 = 600.0;

/// Which weights the reported effective sample size is computed from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EssBasis {
    /// Weights before truncation.
    #[default]
    Original,
    /// Weights after truncation (identical to `Original` when not truncating).
    Truncated,
}

/// Output of the importance weight engine, aligned with the plan columns.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImportanceWeights {
    /// `-log_prob + score` for each plan.
    pub log_ratio: Vec<f64>,
    /// Weights normalized to mean 1, before truncation.
    pub original: Vec<f64>,
    /// Final weights, summing to 1.
    pub normalized: Vec<f64>,
    /// Effective sample size on the configured basis.
    pub n_eff: f64,
    pub n_eff_original: f64,
    pub n_eff_truncated: f64,
    /// Whether the truncation hook was applied.
    pub truncated: bool,
    pub warning: Option<DegeneracyWarning>,
}

impl ImportanceWeights {
    /// Number of plans.
    #[inline] pub fn len(&self) -> usize { self.normalized.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.normalized.is_empty() }
}

/// Turns sampler log-probabilities into calibrated importance weights.
///
/// The scoring and truncation hooks default to [`NoScore`] and
/// [`DefaultTruncation`]; truncation itself is off unless enabled.
pub struct WeightEngine {
    scorer: Box<dyn PlanScorer>,
    truncation: Box<dyn WeightTruncation>,
    truncate: bool,
    ess_basis: EssBasis,
}

impl Default for WeightEngine {
    fn default() -> Self {
        Self {
            scorer: Box::new(NoScore),
            truncation: Box::new(DefaultTruncation),
            truncate: false,
            ess_basis: EssBasis::default(),
        }
    }
}

impl fmt::Debug for WeightEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightEngine")
            .field("truncate", &self.truncate)
            .field("ess_basis", &self.ess_basis)
            .finish_non_exhaustive()
    }
}

impl WeightEngine {
    pub fn new() -> Self { Self::default() }

    /// Replace the scoring hook.
    pub fn with_scorer(mut self, scorer: impl PlanScorer + 'static) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    /// Replace the truncation hook (only used when truncation is enabled).
    pub fn with_truncation(mut self, truncation: impl WeightTruncation + 'static) -> Self {
        self.truncation = Box::new(truncation);
        self
    }

    /// Enable or disable truncation. Inside `run_smc` an explicit
    /// `SmcParams::truncate` takes precedence over this setting.
    pub fn with_truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    /// Choose which weights the effective sample size is reported on.
    /// `run_smc` replaces this with `SmcParams::ess_basis`.
    pub fn with_ess_basis(mut self, ess_basis: EssBasis) -> Self {
        self.ess_basis = ess_basis;
        self
    }

    #[inline] pub fn truncate(&self) -> bool { self.truncate }

    #[inline] pub fn ess_basis(&self) -> EssBasis { self.ess_basis }

    /// Compute importance weights for `plans` from their log-selection-probabilities.
    ///
    /// The log-ratio is `-log_prob + score`, so infinities are not symmetric:
    /// a `log_prob` of `+inf` (or a score of `-inf`) gives the plan weight
    /// exactly 0, while a `log_prob` of `-inf` means the plan could never have
    /// been drawn and fails with [`EnsembleError::InvalidLogRatio`]. NaN in
    /// either input fails the same way.
    pub fn compute(&self, log_prob: &[f64], plans: &PlanMatrix) -> Result<ImportanceWeights> {
        let n = log_prob.len();
        ensure_config!(n >= 1, "cannot weight an empty ensemble");
        ensure_config!(plans.num_plans() == n,
            "{} plans but {} log-probabilities", plans.num_plans(), n);

        let score = self.scorer.score(plans);
        ensure_config!(score.len() == n,
            "scoring function returned {} values for {} plans", score.len(), n);

        let log_ratio = log_prob.iter().zip(&score)
            .map(|(&lp, &s)| -lp + s)
            .collect::<Vec<_>>();
        if let Some((index, &value)) = log_ratio.iter().enumerate()
            .find(|&(_, v)| v.is_nan() || *v == f64::INFINITY)
        {
            return Err(EnsembleError::InvalidLogRatio { index, value });
        }

        let original = mean_normalize(exp_centered(&log_ratio)?)?;

        let truncated = if self.truncate {
            let truncated = self.truncation.truncate(&original);
            ensure_config!(truncated.len() == n,
                "truncation function returned {} weights for {} plans", truncated.len(), n);
            ensure_config!(truncated.iter().all(|w| w.is_finite() && *w >= 0.0),
                "truncation function returned negative or non-finite weights");
            truncated
        } else {
            original.clone()
        };

        let total = truncated.iter().sum::<f64>();
        if !(total > 0.0) { return Err(EnsembleError::ZeroWeights) }
        let normalized = truncated.iter().map(|w| w / total).collect::<Vec<_>>();

        let n_eff_original = effective_sample_size(&original);
        let n_eff_truncated = effective_sample_size(&truncated);
        let n_eff = match self.ess_basis {
            EssBasis::Original => n_eff_original,
            EssBasis::Truncated => n_eff_truncated,
        };

        debug!(nsims = n, n_eff_original, n_eff_truncated, truncated = self.truncate, "computed importance weights");

        let warning = DegeneracyWarning::check(n_eff, n);
        if let Some(warning) = &warning {
            warn!("{warning}");
        }

        Ok(ImportanceWeights {
            log_ratio,
            original,
            normalized,
            n_eff,
            n_eff_original,
            n_eff_truncated,
            truncated: self.truncate,
            warning,
        })
    }
}

/// `exp(lr - c)` for a centering constant `c`.
///
/// `c` is the mean of the finite log-ratios, raised when needed so the largest
/// exponent stays below [`MAX_CENTERED_LOG_WEIGHT`]. Entries at `-inf` map to
/// exactly 0. The constant cancels once the weights are normalized.
fn exp_centered(log_ratio: &[f64]) -> Result<Vec<f64>> {
    let finite = log_ratio.iter().copied().filter(|v| v.is_finite()).collect::<Vec<_>>();
    if finite.is_empty() { return Err(EnsembleError::ZeroWeights) }

    let count = finite.len() as f64;
    let mean = finite.iter().map(|v| v / count).sum::<f64>();
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let center = mean.max(max - MAX_CENTERED_LOG_WEIGHT);

    Ok(log_ratio.iter().map(|&v| (v - center).exp()).collect())
}

/// Rescale weights to mean 1.
fn mean_normalize(weights: Vec<f64>) -> Result<Vec<f64>> {
    let mean = weights.iter().sum::<f64>() / weights.len() as f64;
    if !(mean > 0.0 && mean.is_finite()) { return Err(EnsembleError::ZeroWeights) }
    Ok(weights.into_iter().map(|w| w / mean).collect())
}
