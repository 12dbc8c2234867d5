use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, ensure_config},
    sampler::Verbosity,
    weights::EssBasis,
};

/// Control parameters of one SMC run.
///
/// `ndists` and `nsims` must always be given; every other field has a
/// default, so a configuration file only needs to name what it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SmcParams {
    /// Number of districts.
    pub ndists: u32,
    /// Number of plans to sample.
    pub nsims: usize,
    /// Allowed relative deviation from the ideal district population.
    #[serde(default = "default_pop_tol")]
    pub pop_tol: f64,
    /// Compactness strength; 1 is the sampler's native proposal.
    #[serde(default = "default_compactness")]
    pub compactness: f64,
    /// Quantile of cut candidates the sampler keeps at each split.
    #[serde(default = "default_adapt_k_thresh")]
    pub adapt_k_thresh: f64,
    /// Sequential tempering step size.
    #[serde(default = "default_seq_alpha")]
    pub seq_alpha: f64,
    /// Strength of population tempering toward the ideal district size.
    #[serde(default)]
    pub pop_temper: f64,
    /// Convert the weighted ensemble into an equal-weight one.
    #[serde(default = "default_resample")]
    pub resample: bool,
    /// Truncate weights; `None` truncates exactly when `compactness != 1`.
    #[serde(default)]
    pub truncate: Option<bool>,
    #[serde(default)]
    pub ess_basis: EssBasis,
    #[serde(default)]
    pub verbosity: Verbosity,
    /// Seed of the run's random stream.
    #[serde(default)]
    pub seed: u64,
}

fn default_pop_tol() -> f64 { 0.01 }

fn default_compactness() -> f64 { 1.0 }

fn default_adapt_k_thresh() -> f64 { 0.975 }

fn default_seq_alpha() -> f64 { 0.2 }

fn default_resample() -> bool { true }

impl SmcParams {
    /// Default parameters for `nsims` plans with `ndists` districts.
    pub fn new(ndists: u32, nsims: usize) -> Self {
        Self {
            ndists,
            nsims,
            pop_tol: default_pop_tol(),
            compactness: default_compactness(),
            adapt_k_thresh: default_adapt_k_thresh(),
            seq_alpha: default_seq_alpha(),
            pop_temper: 0.0,
            resample: default_resample(),
            truncate: None,
            ess_basis: EssBasis::default(),
            verbosity: Verbosity::default(),
            seed: 0,
        }
    }

    /// Whether the weight engine should truncate.
    pub fn should_truncate(&self) -> bool {
        self.truncate.unwrap_or(self.compactness != 1.0)
    }

    /// Check every scalar is in range for a map of `num_units` units.
    pub fn validate(&self, num_units: usize) -> Result<()> {
        ensure_config!(self.nsims >= 1, "nsims must be at least 1, got {}", self.nsims);
        ensure_config!(self.ndists >= 2, "ndists must be at least 2, got {}", self.ndists);
        ensure_config!(self.ndists as usize <= num_units,
            "ndists ({}) cannot exceed the number of units ({num_units})", self.ndists);
        ensure_config!(self.pop_tol.is_finite() && self.pop_tol > 0.0,
            "pop_tol must be positive, got {}", self.pop_tol);
        ensure_config!(self.compactness.is_finite() && self.compactness >= 0.0,
            "compactness must be non-negative, got {}", self.compactness);
        ensure_config!((0.0..=1.0).contains(&self.adapt_k_thresh),
            "adapt_k_thresh must be in [0, 1], got {}", self.adapt_k_thresh);
        ensure_config!(self.seq_alpha > 0.0 && self.seq_alpha <= 1.0,
            "seq_alpha must be in (0, 1], got {}", self.seq_alpha);
        ensure_config!(self.pop_temper.is_finite() && self.pop_temper >= 0.0,
            "pop_temper must be non-negative, got {}", self.pop_temper);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnsembleError;

    #[test]
    fn defaults_are_valid() {
        let params = SmcParams::new(2, 100);
        assert!(params.validate(10).is_ok());
        assert!(params.resample);
        assert!(!params.should_truncate());
    }

    #[test]
    fn truncation_defaults_to_non_native_compactness() {
        let mut params = SmcParams::new(2, 100);
        params.compactness = 0.5;
        assert!(params.should_truncate());

        params.truncate = Some(false);
        assert!(!params.should_truncate());
    }

    #[test]
    fn out_of_range_scalars_are_config_errors() {
        let cases: Vec<fn(&mut SmcParams)> = vec![
            |p| p.nsims = 0,
            |p| p.ndists = 1,
            |p| p.ndists = 11,
            |p| p.pop_tol = 0.0,
            |p| p.compactness = -0.1,
            |p| p.adapt_k_thresh = 1.5,
            |p| p.seq_alpha = 0.0,
            |p| p.seq_alpha = 1.01,
            |p| p.pop_temper = -1.0,
        ];

        for mutate in cases {
            let mut params = SmcParams::new(2, 100);
            mutate(&mut params);
            assert!(matches!(params.validate(10), Err(EnsembleError::Config(_))), "{params:?}");
        }
    }

    #[test]
    fn boundary_values_are_accepted() {
        let mut params = SmcParams::new(10, 1);
        params.adapt_k_thresh = 0.0;
        params.seq_alpha = 1.0;
        params.compactness = 0.0;
        assert!(params.validate(10).is_ok());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let params: SmcParams = serde_json::from_str(r#"{ "ndists": 3, "nsims": 50, "verbosity": "silent" }"#).unwrap();
        assert_eq!(params.ndists, 3);
        assert_eq!(params.nsims, 50);
        assert_eq!(params.pop_tol, 0.01);
        assert_eq!(params.verbosity, Verbosity::Silent);
        assert_eq!(params.truncate, None);
        assert!(params.resample);
        assert_eq!(params.adapt_k_thresh, 0.975);
    }

    #[test]
    fn ensemble_size_is_required() {
        let err = serde_json::from_str::<SmcParams>(r#"{ "ndists": 2 }"#).unwrap_err();
        assert!(err.to_string().contains("missing field `nsims`"), "{err}");
    }

    #[test]
    fn district_count_is_required() {
        let err = serde_json::from_str::<SmcParams>(r#"{ "nsims": 100 }"#).unwrap_err();
        assert!(err.to_string().contains("missing field `ndists`"), "{err}");
    }
}
