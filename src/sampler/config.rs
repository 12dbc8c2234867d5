use serde::{Deserialize, Serialize};

use crate::{constraints::Constraints, graph::Graph};

/// How much progress output the sampler and the pipeline produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Silent,
    #[default]
    Minimal,
    Verbose,
}

/// Everything the partition sampler needs to generate one ensemble.
///
/// Built by the pipeline after validation and constraint normalization; the
/// sampler may trust every field to be in range.
#[derive(Clone, Copy, Debug)]
pub struct SamplerConfig<'a> {
    pub graph: &'a Graph,
    /// County label per unit (all 1 when counties are not used).
    pub counties: &'a [u32],
    pub pop: &'a [u64],
    pub ndists: u32,
    /// Allowed relative deviation from the ideal district population.
    pub pop_tol: f64,
    pub compactness: f64,
    pub constraints: &'a Constraints,
    /// Number of plans to generate.
    pub nsims: usize,
    /// Quantile of spanning-tree cut candidates kept at each split.
    pub adapt_k_thresh: f64,
    /// Step size of sequential tempering.
    pub seq_alpha: f64,
    /// Strength of the population tempering term.
    pub pop_temper: f64,
    pub verbosity: Verbosity,
}

impl SamplerConfig<'_> {
    /// Number of geographic units.
    #[inline] pub fn num_units(&self) -> usize { self.pop.len() }

    /// Largest population a district may have.
    pub fn max_district_pop(&self) -> f64 {
        self.ideal_district_pop() * (1.0 + self.pop_tol)
    }

    /// Smallest population a district may have.
    pub fn min_district_pop(&self) -> f64 {
        self.ideal_district_pop() * (1.0 - self.pop_tol)
    }

    /// Total population divided evenly across districts.
    pub fn ideal_district_pop(&self) -> f64 {
        self.pop.iter().sum::<u64>() as f64 / self.ndists as f64
    }
}
