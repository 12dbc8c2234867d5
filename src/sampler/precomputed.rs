use std::path::Path;

use anyhow::{Context, Result, ensure};
use rand::RngCore;

use crate::{
    io::csv::{read_column_vec, read_plan_matrix},
    sampler::{Ensemble, PartitionSampler, SamplerConfig},
};

/// Replays an ensemble generated elsewhere, e.g. by an external SMC run whose
/// plans and log-probabilities were exported to disk.
///
/// The stored ensemble is handed out as-is; the random stream is not used.
#[derive(Clone, Debug)]
pub struct PrecomputedSampler {
    ensemble: Ensemble,
}

impl PrecomputedSampler {
    pub fn new(ensemble: Ensemble) -> Self {
        Self { ensemble }
    }

    /// Load plans (one CSV column per plan) and log-probabilities (first CSV column).
    pub fn from_csv(plans_path: &Path, log_prob_path: &Path) -> Result<Self> {
        let plans = read_plan_matrix(plans_path)
            .with_context(|| format!("[PrecomputedSampler] reading plans from {}", plans_path.display()))?;
        let log_prob = read_column_vec(log_prob_path)
            .with_context(|| format!("[PrecomputedSampler] reading log-probabilities from {}", log_prob_path.display()))?;

        Ok(Self::new(Ensemble::new(plans, log_prob)?))
    }

    /// Number of stored plans.
    #[inline] pub fn len(&self) -> usize { self.ensemble.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.ensemble.is_empty() }
}

impl PartitionSampler for PrecomputedSampler {
    fn sample(&mut self, config: &SamplerConfig<'_>, _rng: &mut dyn RngCore) -> Result<Ensemble> {
        ensure!(self.ensemble.len() == config.nsims,
            "[PrecomputedSampler] holds {} plans but {} were requested", self.ensemble.len(), config.nsims);
        ensure!(self.ensemble.plans.num_units() == config.num_units(),
            "[PrecomputedSampler] plans cover {} units but the map has {}",
            self.ensemble.plans.num_units(), config.num_units());

        Ok(self.ensemble.clone())
    }
}
