use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::{EnsembleError, Result, ensure_config};

/// Normal-approximation confidence interval for the weighted mean of `x`.
///
/// Weights may be on any positive scale; they are normalized to sum 1 first.
/// The spread is `sqrt(sum((x - mu)^2 * w^2))`, with squared weights, not the
/// usual `sum((x - mu)^2 * w)` form.
///
/// Returns `[lower, upper]`.
pub fn importance_ci(x: &[f64], wgt: &[f64], conf: f64) -> Result<[f64; 2]> {
    ensure_config!(!x.is_empty(), "cannot estimate an interval from an empty sample");
    ensure_config!(x.len() == wgt.len(), "{} values but {} weights", x.len(), wgt.len());
    ensure_config!(conf > 0.0 && conf < 1.0, "conf must be in (0, 1), got {conf}");
    ensure_config!(wgt.iter().all(|w| w.is_finite() && *w >= 0.0), "weights must be non-negative and finite");

    let total = wgt.iter().sum::<f64>();
    ensure_config!(total > 0.0, "weights must not all be zero");
    let w = wgt.iter().map(|w| w / total).collect::<Vec<_>>();

    let mu = x.iter().zip(&w).map(|(x, w)| x * w).sum::<f64>();
    let sig = x.iter().zip(&w)
        .map(|(x, w)| (x - mu).powi(2) * w * w)
        .sum::<f64>()
        .sqrt();

    let normal = Normal::new(0.0, 1.0)
        .map_err(|err| EnsembleError::Config(format!("standard normal: {err}")))?;
    let alpha = (1.0 - conf) / 2.0;
    let z_lo = normal.inverse_cdf(alpha);
    let z_hi = normal.inverse_cdf(1.0 - alpha);

    Ok([mu + z_lo * sig, mu + z_hi * sig])
}
