use anyhow::{Result, ensure};
use openmander_ensemble::{
    importance_ci,
    io::{csv::read_column_vec, json::read_json},
};
use serde::Deserialize;
use tracing::info;

/// The part of a result bundle the interval needs.
#[derive(Deserialize)]
struct Weights {
    wgt: Vec<f64>,
}

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::IntervalArgs) -> Result<()> {
    info!("[interval] loading weights from {}", args.result.display());
    let Weights { wgt } = read_json::<Weights>(&args.result)?;
    let values = read_column_vec(&args.values)?;
    ensure!(values.len() == wgt.len(),
        "[interval] {} has {} values but the result has {} plans", args.values.display(), values.len(), wgt.len());

    let [lo, hi] = importance_ci(&values, &wgt, args.conf)?;
    println!("{lo}\t{hi}");

    Ok(())
}
