//! Reading and writing ensembles, configurations and results.
//!
//! - `csv` - plan matrices and single-column vectors (log-probabilities, quantities of interest)
//! - `json` - run configurations and result bundles

pub mod csv;
pub mod json;
