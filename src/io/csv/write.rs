//! CSV writing operations.

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerWriter, prelude::{Column, CsvWriter, NamedFrom}, series::Series};

use crate::plan::PlanMatrix;

/// Write a DataFrame to a CSV file.
pub(crate) fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("[io::csv::write] Failed to create CSV file: {}", path.display()))?;
    CsvWriter::new(file)
        .finish(df)
        .with_context(|| format!("[io::csv::write] Failed to write CSV to {:?}", path))
}

/// Write a DataFrame to a CSV string.
#[cfg(test)]
pub(crate) fn write_csv_string(df: &mut DataFrame) -> Result<String> {
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .finish(df)
        .with_context(|| "[io::csv::write] Failed to write CSV to string")?;
    String::from_utf8(buffer)
        .with_context(|| "[io::csv::write] CSV output is not valid UTF-8")
}

/// One column per plan, named `plan_1`, `plan_2`, ...
pub(crate) fn plan_matrix_to_df(plans: &PlanMatrix) -> Result<DataFrame> {
    let columns = plans.plans().enumerate()
        .map(|(j, plan)| Column::from(Series::new(format!("plan_{}", j + 1).into(), plan.to_vec())))
        .collect::<Vec<_>>();

    Ok(DataFrame::new(columns)?)
}

/// Write a plan matrix to a CSV file (header row, one column per plan).
pub fn write_plan_matrix(plans: &PlanMatrix, path: &Path) -> Result<()> {
    write_csv(&mut plan_matrix_to_df(plans)?, path)
}

/// Write a single named column of reals to a CSV file.
pub fn write_column_vec(name: &str, values: &[f64], path: &Path) -> Result<()> {
    let mut df = DataFrame::new(vec![Series::new(name.into(), values.to_vec()).into()])?;
    write_csv(&mut df, path)
}
