use std::sync::Arc;

use serde::Serialize;

use crate::{
    constraints::Constraints,
    error::{DegeneracyWarning, Result, ensure_config},
    estimate::importance_ci,
    graph::Graph,
    plan::PlanMatrix,
};

/// Tag identifying the sampling algorithm in serialized results.
pub const ALGORITHM: &str = "smc";

/// Output of one SMC run. Immutable once built.
///
/// `plans`, `wgt`, `orig_wgt` and `maxdev` are aligned by column: entry `j`
/// of each vector describes plan `j`.
#[derive(Clone, Debug, Serialize)]
pub struct SmcResult {
    pub(super) algorithm: &'static str,
    pub(super) adjacency: Arc<Graph>,
    pub(super) plans: PlanMatrix,
    pub(super) wgt: Vec<f64>,
    pub(super) orig_wgt: Vec<f64>,
    pub(super) nsims: usize,
    pub(super) ndists: u32,
    pub(super) n_eff: f64,
    pub(super) n_eff_original: f64,
    pub(super) n_eff_truncated: f64,
    pub(super) pct_dev: f64,
    pub(super) compactness: f64,
    pub(super) constraints: Constraints,
    pub(super) maxdev: Vec<f64>,
    pub(super) pop: Vec<u64>,
    pub(super) counties: Option<Vec<u32>>,
    pub(super) adapt_k_thresh: f64,
    pub(super) seq_alpha: f64,
    pub(super) pop_temper: f64,
    pub(super) resampled: bool,
    pub(super) truncated: bool,
    pub(super) seed: u64,
    pub(super) warnings: Vec<DegeneracyWarning>,
}

impl SmcResult {
    #[inline] pub fn algorithm(&self) -> &str { self.algorithm }

    #[inline] pub fn adjacency(&self) -> &Graph { &self.adjacency }

    /// Get the final plans, one column per plan.
    #[inline] pub fn plans(&self) -> &PlanMatrix { &self.plans }

    /// Get the final weights. Uniform `1/N` after resampling.
    #[inline] pub fn wgt(&self) -> &[f64] { &self.wgt }

    /// Get the pre-truncation weights of the final plans.
    #[inline] pub fn orig_wgt(&self) -> &[f64] { &self.orig_wgt }

    #[inline] pub fn nsims(&self) -> usize { self.nsims }

    #[inline] pub fn ndists(&self) -> u32 { self.ndists }

    /// Get the effective sample size on the configured basis.
    #[inline] pub fn n_eff(&self) -> f64 { self.n_eff }

    #[inline] pub fn n_eff_original(&self) -> f64 { self.n_eff_original }

    #[inline] pub fn n_eff_truncated(&self) -> f64 { self.n_eff_truncated }

    #[inline] pub fn pct_dev(&self) -> f64 { self.pct_dev }

    #[inline] pub fn compactness(&self) -> f64 { self.compactness }

    #[inline] pub fn constraints(&self) -> &Constraints { &self.constraints }

    /// Get each plan's largest relative deviation from the ideal district population.
    #[inline] pub fn maxdev(&self) -> &[f64] { &self.maxdev }

    #[inline] pub fn pop(&self) -> &[u64] { &self.pop }

    /// Get the county labels, or `None` when the run had no county structure.
    #[inline] pub fn counties(&self) -> Option<&[u32]> { self.counties.as_deref() }

    #[inline] pub fn adapt_k_thresh(&self) -> f64 { self.adapt_k_thresh }

    #[inline] pub fn seq_alpha(&self) -> f64 { self.seq_alpha }

    #[inline] pub fn pop_temper(&self) -> f64 { self.pop_temper }

    #[inline] pub fn resampled(&self) -> bool { self.resampled }

    #[inline] pub fn truncated(&self) -> bool { self.truncated }

    #[inline] pub fn seed(&self) -> u64 { self.seed }

    #[inline] pub fn warnings(&self) -> &[DegeneracyWarning] { &self.warnings }

    /// Weighted mean of a per-plan quantity under the final weights.
    pub fn weighted_mean(&self, x: &[f64]) -> Result<f64> {
        ensure_config!(x.len() == self.wgt.len(), "{} values but {} plans", x.len(), self.wgt.len());
        let total = self.wgt.iter().sum::<f64>();
        Ok(x.iter().zip(&self.wgt).map(|(x, w)| x * w).sum::<f64>() / total)
    }

    /// Confidence interval for the mean of a per-plan quantity under the final weights.
    pub fn confidence_interval(&self, x: &[f64], conf: f64) -> Result<[f64; 2]> {
        importance_ci(x, &self.wgt, conf)
    }
}
