use anyhow::Result;
use openmander_ensemble::{
    PrecomputedSampler, RunConfig, Verbosity, WeightEngine,
    io::{csv::write_plan_matrix, json::write_json},
    run_smc,
};
use tracing::{debug, info};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::CalibrateArgs) -> Result<()> {
    let out_path = args.output.clone().unwrap_or("./result.json".into());

    info!("[calibrate] loading configuration from {}", args.config.display());
    let mut config = RunConfig::from_json_file(&args.config)?;
    if let Some(seed) = args.seed { config.params.seed = seed }
    if args.no_resample { config.params.resample = false }
    if args.truncate { config.params.truncate = Some(true) }
    if args.no_truncate { config.params.truncate = Some(false) }
    if cli.verbose > 0 { config.params.verbosity = Verbosity::Verbose }
    let map = config.district_map()?;

    info!("[calibrate] loading ensemble from {} and {}", args.plans.display(), args.log_prob.display());
    let mut sampler = PrecomputedSampler::from_csv(&args.plans, &args.log_prob)?;
    debug!("[calibrate] loaded {} plans", sampler.len());

    let result = run_smc(&map, &config.params, &config.constraints, &mut sampler, WeightEngine::new())?;

    info!("[calibrate] writing result to {}", out_path.display());
    write_json(&result, &out_path)?;

    if let Some(plans_path) = &args.plans_out {
        info!("[calibrate] writing plans to {}", plans_path.display());
        write_plan_matrix(result.plans(), plans_path)?;
    }

    Ok(())
}
