mod constraints;
mod counties;
mod normalize;

pub use constraints::{
    ConstraintSpec, Constraints, Incumbency, IncumbencySpec, StatusQuo, StatusQuoSpec, Vra, VraSpec,
    DEFAULT_POW_VRA, DEFAULT_TGT_VRA_MIN, DEFAULT_TGT_VRA_OTHER,
};
pub use counties::{normalize_counties, num_counties};
pub use normalize::normalize_constraints;
