use std::path::PathBuf;

/// Calibrate and resample redistricting ensembles
#[derive(clap::Parser, Debug)]
#[command(name = "openmander-ensemble", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Weight a sampled ensemble and write the result bundle
    Calibrate(CalibrateArgs),

    /// Confidence interval for the mean of a per-plan quantity
    Interval(IntervalArgs),
}

#[derive(clap::Args, Debug)]
pub struct CalibrateArgs {
    /// Run configuration (adjacency, population, parameters, constraints)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Sampled plans, one column per plan
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub plans: PathBuf,

    /// Log-probability of each sampled plan, one row per plan
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub log_prob: PathBuf,

    /// Output result bundle, defaults to "./result.json"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Also write the final plans as CSV
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub plans_out: Option<PathBuf>,

    /// Override the configured seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Keep the weighted ensemble instead of resampling it
    #[arg(long)]
    pub no_resample: bool,

    /// Truncate weights even at native compactness
    #[arg(long, conflicts_with = "no_truncate")]
    pub truncate: bool,

    /// Never truncate weights
    #[arg(long)]
    pub no_truncate: bool,
}

#[derive(clap::Args, Debug)]
pub struct IntervalArgs {
    /// Result bundle written by `calibrate`
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub result: PathBuf,

    /// Per-plan values of the quantity, one row per plan
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub values: PathBuf,

    /// Confidence level
    #[arg(long, default_value_t = 0.99)]
    pub conf: f64,
}
