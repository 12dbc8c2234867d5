//! CSV reading operations.

use std::{fs::File, path::Path};

use anyhow::{Context, Result, ensure};
use polars::{frame::DataFrame, io::SerReader, prelude::{Column, CsvReader, DataType}};

use crate::plan::PlanMatrix;

/// Reads a CSV file from `path` into a Polars DataFrame.
pub(crate) fn read_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)
        .with_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;
    CsvReader::new(file)
        .finish()
        .with_context(|| format!("[io::csv::read] Failed to read CSV from {:?}", path))
}

/// Reads a CSV from a string.
#[cfg(test)]
pub(crate) fn read_csv_string(csv: &str) -> Result<DataFrame> {
    CsvReader::new(std::io::Cursor::new(csv.as_bytes()))
        .finish()
        .with_context(|| "[io::csv::read] Failed to read CSV from string")
}

/// Cast a column to u32 district labels, rejecting nulls and negative values.
fn column_to_labels(column: &Column) -> Result<Vec<u32>> {
    let labels = column.cast(&DataType::UInt32)
        .with_context(|| format!("[io::csv::read] Column '{}' is not numeric", column.name()))?;
    ensure!(labels.null_count() == 0,
        "[io::csv::read] Column '{}' has missing or negative district labels", column.name());
    Ok(labels.u32()?.into_no_null_iter().collect())
}

/// Interpret a DataFrame as a plan matrix: one row per unit, one column per plan.
pub(crate) fn plan_matrix_from_df(df: &DataFrame) -> Result<PlanMatrix> {
    ensure!(df.width() > 0, "[io::csv::read] Plan CSV has no columns");

    let plans = df.get_columns().iter()
        .map(column_to_labels)
        .collect::<Result<Vec<_>>>()?;

    Ok(PlanMatrix::from_plans(&plans)?)
}

/// Read a plan matrix from a CSV file (header row, one column per plan).
pub fn read_plan_matrix(path: &Path) -> Result<PlanMatrix> {
    plan_matrix_from_df(&read_csv(path)?)
}

/// Interpret the first column of a DataFrame as a vector of reals.
pub(crate) fn column_vec_from_df(df: &DataFrame) -> Result<Vec<f64>> {
    ensure!(df.width() > 0, "[io::csv::read] CSV has no columns");

    let column = &df.get_columns()[0];
    let values = column.cast(&DataType::Float64)
        .with_context(|| format!("[io::csv::read] Column '{}' is not numeric", column.name()))?;
    ensure!(values.null_count() == 0, "[io::csv::read] Column '{}' has missing values", column.name());
    Ok(values.f64()?.into_no_null_iter().collect())
}

/// Read the first column of a CSV file as a vector of reals.
pub fn read_column_vec(path: &Path) -> Result<Vec<f64>> {
    column_vec_from_df(&read_csv(path)?)
}
