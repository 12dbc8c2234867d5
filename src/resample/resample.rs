use rand::{Rng, distr::{Distribution, weighted::WeightedIndex}};

use crate::{
    error::{EnsembleError, Result, ensure_config},
    plan::PlanMatrix,
};

/// Plans together with their final weights.
///
/// The two are only ever changed together, so column `j` of `plans` always
/// carries `weights[j]`.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedEnsemble {
    plans: PlanMatrix,
    weights: Vec<f64>,
}

impl WeightedEnsemble {
    pub fn new(plans: PlanMatrix, weights: Vec<f64>) -> Result<Self> {
        ensure_config!(plans.num_plans() == weights.len(),
            "{} plans but {} weights", plans.num_plans(), weights.len());
        Ok(Self { plans, weights })
    }

    #[inline] pub fn plans(&self) -> &PlanMatrix { &self.plans }

    #[inline] pub fn weights(&self) -> &[f64] { &self.weights }

    #[inline] pub fn len(&self) -> usize { self.weights.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.weights.is_empty() }

    #[inline] pub fn into_parts(self) -> (PlanMatrix, Vec<f64>) { (self.plans, self.weights) }

    /// Draw `N` plans with replacement, each with probability proportional to
    /// its weight, and give every drawn plan weight `1/N`.
    pub fn resample<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Self> {
        Ok(self.resample_with_indices(rng)?.0)
    }

    /// Like [`WeightedEnsemble::resample`], also returning which original
    /// column each new column was drawn from.
    pub fn resample_with_indices<R: Rng + ?Sized>(self, rng: &mut R) -> Result<(Self, Vec<usize>)> {
        let n = self.len();
        let indices = draw_indices(&self.weights, n, rng)?;

        let resampled = Self {
            plans: self.plans.select(&indices),
            weights: vec![1.0 / n as f64; n],
        };
        Ok((resampled, indices))
    }

    /// Resample when `resample` is set, otherwise pass through unchanged.
    pub fn resample_if<R: Rng + ?Sized>(self, resample: bool, rng: &mut R) -> Result<Self> {
        if resample { self.resample(rng) } else { Ok(self) }
    }
}

/// `count` independent categorical draws from `0..weights.len()`.
pub fn draw_indices<R: Rng + ?Sized>(weights: &[f64], count: usize, rng: &mut R) -> Result<Vec<usize>> {
    if count == 0 { return Ok(vec![]) }

    let dist = WeightedIndex::new(weights).map_err(|err| match err {
        rand::distr::weighted::Error::InsufficientNonZero => EnsembleError::ZeroWeights,
        err => EnsembleError::Config(format!("cannot resample with these weights: {err}")),
    })?;

    Ok((0..count).map(|_| dist.sample(rng)).collect())
}
