use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::{
    constraints::{ConstraintSpec, normalize_constraints, normalize_counties, num_counties},
    error::{EnsembleError, Result},
    plan::max_deviation,
    resample::WeightedEnsemble,
    sampler::{PartitionSampler, SamplerConfig, Verbosity, check_shape},
    smc::{ALGORITHM, DistrictMap, SmcParams, SmcResult},
    weights::WeightEngine,
};

/// Sample an ensemble of `params.nsims` plans, calibrate it with importance
/// weights, optionally resample it, and bundle everything into a result.
///
/// The engine supplies the scoring and truncation hooks. An explicit
/// `params.truncate` decides truncation; otherwise the engine truncates when it
/// was built with truncation on or when `compactness != 1`. The `n_eff` basis
/// always comes from `params.ess_basis`.
///
/// One random stream seeded from `params.seed` drives both sampling and
/// resampling, so a fixed seed and a deterministic sampler reproduce the
/// result exactly.
pub fn run_smc(
    map: &DistrictMap,
    params: &SmcParams,
    constraints: &ConstraintSpec,
    sampler: &mut dyn PartitionSampler,
    engine: WeightEngine,
) -> Result<SmcResult> {
    let num_units = map.num_units();
    params.validate(num_units)?;
    let constraints = normalize_constraints(constraints, num_units)?;
    let counties = normalize_counties(map.counties(), num_units)?;

    let config = SamplerConfig {
        graph: map.graph(),
        counties: &counties,
        pop: map.pop(),
        ndists: params.ndists,
        pop_tol: params.pop_tol,
        compactness: params.compactness,
        constraints: &constraints,
        nsims: params.nsims,
        adapt_k_thresh: params.adapt_k_thresh,
        seq_alpha: params.seq_alpha,
        pop_temper: params.pop_temper,
        verbosity: params.verbosity,
    };

    if params.verbosity >= Verbosity::Minimal {
        info!("[smc] sampling {} plans of {} districts over {} units", params.nsims, params.ndists, num_units);
    }
    if params.verbosity >= Verbosity::Verbose {
        info!("[smc] district population {:.1} to {:.1} (ideal {:.1}), {} counties, constraints active: {}",
            config.min_district_pop(), config.max_district_pop(), config.ideal_district_pop(),
            num_counties(&counties), constraints.any_active());
    }

    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
    let ensemble = sampler.sample(&config, &mut rng).map_err(EnsembleError::Sampler)?;
    check_shape(&ensemble, &config).map_err(EnsembleError::Sampler)?;
    ensemble.plans.validate_labels(params.ndists)
        .map_err(|err| EnsembleError::Sampler(anyhow::anyhow!("sampler returned invalid labels: {err}")))?;
    debug!("[smc] sampler returned {} plans", ensemble.len());

    let truncate = params.truncate.unwrap_or(engine.truncate() || params.should_truncate());
    let engine = engine
        .with_truncate(truncate)
        .with_ess_basis(params.ess_basis);
    let weights = engine.compute(&ensemble.log_prob, &ensemble.plans)?;

    let weighted = WeightedEnsemble::new(ensemble.plans, weights.normalized.clone())?;
    let (weighted, orig_wgt) = if params.resample {
        let (resampled, indices) = weighted.resample_with_indices(&mut rng)?;
        let orig_wgt = indices.iter().map(|&i| weights.original[i]).collect();
        (resampled, orig_wgt)
    } else {
        (weighted, weights.original.clone())
    };
    let (plans, wgt) = weighted.into_parts();

    let maxdev = max_deviation(&plans, map.pop(), params.ndists);

    if params.verbosity >= Verbosity::Minimal {
        info!("[smc] n_eff = {:.1} ({:.1}%), resampled: {}, truncated: {}",
            weights.n_eff, 100.0 * weights.n_eff / params.nsims as f64, params.resample, weights.truncated);
    }
    if params.verbosity >= Verbosity::Verbose {
        let worst = maxdev.iter().copied().fold(0.0, f64::max);
        info!("[smc] largest population deviation {:.4}", worst);
    }

    Ok(SmcResult {
        algorithm: ALGORITHM,
        adjacency: map.graph().clone(),
        plans,
        wgt,
        orig_wgt,
        nsims: params.nsims,
        ndists: params.ndists,
        n_eff: weights.n_eff,
        n_eff_original: weights.n_eff_original,
        n_eff_truncated: weights.n_eff_truncated,
        pct_dev: params.pop_tol,
        compactness: params.compactness,
        constraints,
        maxdev,
        pop: map.pop().to_vec(),
        counties: (num_counties(&counties) > 1).then_some(counties),
        adapt_k_thresh: params.adapt_k_thresh,
        seq_alpha: params.seq_alpha,
        pop_temper: params.pop_temper,
        resampled: params.resample,
        truncated: weights.truncated,
        seed: params.seed,
        warnings: weights.warning.into_iter().collect(),
    })
}
