#![doc = "Importance-sampling calibration and resampling of redistricting ensembles"]
mod constraints;
mod error;
mod estimate;
mod graph;
mod plan;
mod resample;
mod sampler;
mod smc;
mod weights;

pub mod io;

#[doc(inline)]
pub use constraints::{
    ConstraintSpec, Constraints, DEFAULT_POW_VRA, DEFAULT_TGT_VRA_MIN, DEFAULT_TGT_VRA_OTHER, Incumbency,
    IncumbencySpec, StatusQuo, StatusQuoSpec, Vra, VraSpec, normalize_constraints, normalize_counties,
};

#[doc(inline)]
pub use error::{DEGENERACY_THRESHOLD, DegeneracyWarning, EnsembleError, Result};

#[doc(inline)]
pub use estimate::importance_ci;

#[doc(inline)]
pub use graph::Graph;

#[doc(inline)]
pub use plan::{PlanMatrix, district_totals, max_deviation};

#[doc(inline)]
pub use resample::{WeightedEnsemble, draw_indices};

#[doc(inline)]
pub use sampler::{Ensemble, PartitionSampler, PrecomputedSampler, SamplerConfig, Verbosity};

#[doc(inline)]
pub use smc::{DistrictMap, RunConfig, SmcParams, SmcResult, run_smc};

#[doc(inline)]
pub use weights::{
    ClipTruncation, DefaultTruncation, EssBasis, ImportanceWeights, NoScore, PlanScorer, WeightEngine,
    WeightTruncation, effective_sample_size,
};
