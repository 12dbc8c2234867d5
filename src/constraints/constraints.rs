use serde::{Deserialize, Serialize};

/// Default target minority share in opportunity districts.
pub const DEFAULT_TGT_VRA_MIN: f64 = 0.55;
/// Default target minority share in all other districts.
pub const DEFAULT_TGT_VRA_OTHER: f64 = 0.25;
/// Default tolerance exponent for the VRA penalty.
pub const DEFAULT_POW_VRA: f64 = 1.5;

/// Partially specified soft constraints, as read from configuration.
///
/// Every group and every field is optional; [`normalize_constraints`](super::normalize_constraints)
/// fills in whatever is missing.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConstraintSpec {
    pub status_quo: Option<StatusQuoSpec>,
    pub vra: Option<VraSpec>,
    pub incumbency: Option<IncumbencySpec>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatusQuoSpec {
    pub strength: Option<f64>,
    /// Reference plan, one district label per unit. May be 0-based.
    pub current: Option<Vec<u32>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VraSpec {
    pub strength: Option<f64>,
    pub tgt_vra_min: Option<f64>,
    pub tgt_vra_other: Option<f64>,
    pub pow_vra: Option<f64>,
    /// Minority population of each unit.
    pub min_pop: Option<Vec<u64>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IncumbencySpec {
    pub strength: Option<f64>,
    /// 0-based indices of units containing an incumbent's residence.
    pub incumbents: Option<Vec<usize>>,
}

/// Fully populated soft constraints, threaded through to the partition sampler.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Constraints {
    pub status_quo: StatusQuo,
    pub vra: Vra,
    pub incumbency: Incumbency,
}

/// Similarity to an existing plan.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatusQuo {
    pub strength: f64,
    /// Reference plan with 1-based labels.
    pub current: Vec<u32>,
    /// Number of districts in the reference plan (largest label).
    pub n_current: u32,
}

/// Voting-Rights-Act-style minority opportunity targets.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Vra {
    pub strength: f64,
    pub tgt_vra_min: f64,
    pub tgt_vra_other: f64,
    pub pow_vra: f64,
    pub min_pop: Vec<u64>,
}

/// Avoidance of pairing incumbents in the same district.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Incumbency {
    pub strength: f64,
    pub incumbents: Vec<usize>,
}

impl Constraints {
    /// True if any constraint has a non-zero strength.
    pub fn any_active(&self) -> bool {
        self.status_quo.strength > 0.0 || self.vra.strength > 0.0 || self.incumbency.strength > 0.0
    }
}
