use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{EnsembleError, Result, ensure_config};

/// An ensemble of districting plans stored column-wise.
///
/// Row `i` is unit `i`, column `j` is plan `j`, and every entry is a district
/// label in `1..=ndists`. Plans and their weights are matched by column index,
/// so any reordering must go through [`PlanMatrix::select`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanMatrix {
    assignments: Array2<u32>,
}

impl PlanMatrix {
    /// Wrap an assignment matrix of shape (units, plans).
    pub fn new(assignments: Array2<u32>) -> Self {
        Self { assignments }
    }

    /// Build a matrix from one assignment vector per plan.
    pub fn from_plans(plans: &[Vec<u32>]) -> Result<Self> {
        let num_units = plans.first().map_or(0, Vec::len);
        ensure_config!(plans.iter().all(|plan| plan.len() == num_units),
            "every plan must assign the same number of units ({num_units})");

        let assignments = Array2::from_shape_fn((num_units, plans.len()), |(i, j)| plans[j][i]);
        Ok(Self { assignments })
    }

    /// Number of geographic units (rows).
    #[inline] pub fn num_units(&self) -> usize { self.assignments.nrows() }

    /// Number of plans (columns).
    #[inline] pub fn num_plans(&self) -> usize { self.assignments.ncols() }

    /// Borrow the raw (units, plans) matrix.
    #[inline] pub fn assignments(&self) -> &Array2<u32> { &self.assignments }

    /// Borrow the assignments of a single plan.
    #[inline] pub fn plan(&self, j: usize) -> ArrayView1<'_, u32> { self.assignments.column(j) }

    /// Iterate over plans in column order.
    pub fn plans(&self) -> impl Iterator<Item = ArrayView1<'_, u32>> + '_ {
        self.assignments.axis_iter(Axis(1))
    }

    /// New matrix holding the given plans in the given order (duplicates allowed).
    pub fn select(&self, indices: &[usize]) -> Self {
        Self { assignments: self.assignments.select(Axis(1), indices) }
    }

    /// Check every label of every plan lies in `1..=ndists`.
    pub(crate) fn validate_labels(&self, ndists: u32) -> Result<()> {
        match self.assignments.indexed_iter().find(|&(_, &label)| label == 0 || label > ndists) {
            Some(((unit, plan), &label)) => Err(EnsembleError::Config(format!(
                "plan {plan} assigns unit {unit} to district {label}, outside 1..={ndists}"
            ))),
            None => Ok(()),
        }
    }
}

/// Sum `pop` over the units of each district of a single plan.
/// Index `d - 1` holds the total of district `d`; labels above `ndists` are ignored.
pub fn district_totals(plan: ArrayView1<'_, u32>, pop: &[u64], ndists: u32) -> Vec<u64> {
    let mut totals = vec![0u64; ndists as usize];
    for (&label, &p) in plan.iter().zip(pop) {
        if label >= 1 && label <= ndists {
            totals[label as usize - 1] += p;
        }
    }
    totals
}
