use anyhow::{Result, ensure};
use rand::RngCore;

use crate::{plan::PlanMatrix, sampler::SamplerConfig};

/// Raw output of one sampler run: plans and the log-probability with which
/// the sampler proposed each of them, aligned by column.
#[derive(Clone, Debug, PartialEq)]
pub struct Ensemble {
    pub plans: PlanMatrix,
    pub log_prob: Vec<f64>,
}

impl Ensemble {
    /// Pair plans with their log-probabilities, checking the counts agree.
    pub fn new(plans: PlanMatrix, log_prob: Vec<f64>) -> Result<Self> {
        ensure!(plans.num_plans() == log_prob.len(),
            "[Ensemble::new] {} plans but {} log-probabilities", plans.num_plans(), log_prob.len());
        Ok(Self { plans, log_prob })
    }

    /// Number of plans.
    #[inline] pub fn len(&self) -> usize { self.log_prob.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.log_prob.is_empty() }
}

/// A generator of contiguous, population-balanced plans.
///
/// Implementations must be deterministic given the random stream they are
/// handed, return exactly `config.nsims` plans over `config.num_units()`
/// units, and respect contiguity, the population tolerance, and county
/// splitting limits. Nothing downstream re-checks those properties.
pub trait PartitionSampler {
    fn sample(&mut self, config: &SamplerConfig<'_>, rng: &mut dyn RngCore) -> Result<Ensemble>;
}

impl<F> PartitionSampler for F
where
    F: FnMut(&SamplerConfig<'_>, &mut dyn RngCore) -> Result<Ensemble>,
{
    fn sample(&mut self, config: &SamplerConfig<'_>, rng: &mut dyn RngCore) -> Result<Ensemble> {
        self(config, rng)
    }
}

/// Check an ensemble has the shape the config asked for.
pub(crate) fn check_shape(ensemble: &Ensemble, config: &SamplerConfig<'_>) -> Result<()> {
    ensure!(ensemble.plans.num_units() == config.num_units(),
        "sampler returned plans over {} units, expected {}", ensemble.plans.num_units(), config.num_units());
    ensure!(ensemble.plans.num_plans() == config.nsims,
        "sampler returned {} plans, expected {}", ensemble.plans.num_plans(), config.nsims);
    ensure!(ensemble.log_prob.len() == config.nsims,
        "sampler returned {} log-probabilities, expected {}", ensemble.log_prob.len(), config.nsims);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn ensemble_requires_matching_lengths() {
        let plans = PlanMatrix::new(array![[1u32, 2], [2, 1]]);
        assert!(Ensemble::new(plans.clone(), vec![0.0, -1.0]).is_ok());
        assert!(Ensemble::new(plans, vec![0.0]).is_err());
    }
}
