use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Ratio `n_eff / N` at or below which an ensemble is flagged as degenerate.
pub const DEGENERACY_THRESHOLD: f64 = 0.05;

/// Fatal failures of the calibration pipeline.
///
/// None of these leave a partial result behind: a run either produces a full
/// [`SmcResult`](crate::SmcResult) or one of these errors.
#[derive(Debug, Error)]
pub enum EnsembleError {
    /// Missing, malformed or out-of-range input.
    #[error("configuration error: {0}")]
    Config(String),

    /// Failure raised by the partition sampler, passed through untouched.
    #[error(transparent)]
    Sampler(anyhow::Error),

    /// A log-ratio that cannot be turned into a weight (NaN or +inf).
    #[error("invalid log-ratio {value} for plan {index}")]
    InvalidLogRatio { index: usize, value: f64 },

    /// Every plan ended up with zero weight.
    #[error("all importance weights are zero")]
    ZeroWeights,
}

pub type Result<T> = std::result::Result<T, EnsembleError>;

/// Return early with [`EnsembleError::Config`] unless the condition holds.
macro_rules! ensure_config {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::error::EnsembleError::Config(format!($($arg)+)));
        }
    };
}

pub(crate) use ensure_config;

/// Non-fatal diagnostic: the weighted ensemble is too concentrated to trust.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DegeneracyWarning {
    pub n_eff: f64,
    pub nsims: usize,
}

impl DegeneracyWarning {
    /// Build a warning if `n_eff / nsims` is at or below [`DEGENERACY_THRESHOLD`].
    pub(crate) fn check(n_eff: f64, nsims: usize) -> Option<Self> {
        (n_eff / nsims as f64 <= DEGENERACY_THRESHOLD).then_some(Self { n_eff, nsims })
    }

    /// Effective sample size as a fraction of the ensemble size.
    #[inline] pub fn ratio(&self) -> f64 { self.n_eff / self.nsims as f64 }
}

impl fmt::Display for DegeneracyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
            "effective sample size is {:.1} ({:.1}% of {} plans); weights are degenerate. \
             Consider stronger truncation, weaker constraints, or a smaller tempering step",
            self.n_eff, 100.0 * self.ratio(), self.nsims,
        )
    }
}
