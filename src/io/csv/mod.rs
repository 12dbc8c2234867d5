//! CSV format reading and writing operations.

mod read;
mod write;

pub use read::{read_column_vec, read_plan_matrix};
pub use write::{write_column_vec, write_plan_matrix};
#[cfg(test)]
pub(crate) use read::{plan_matrix_from_df, read_csv_string};
