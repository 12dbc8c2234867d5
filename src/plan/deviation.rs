use ndarray::{Axis, parallel::prelude::*};

use crate::plan::{PlanMatrix, district_totals};

/// Maximum relative population deviation of each plan.
///
/// For a plan with district totals `p_d` and ideal size `T / ndists`, the
/// deviation is `max_d |p_d / (T / ndists) - 1|`. Plans are independent, so
/// the columns are processed in parallel.
pub fn max_deviation(plans: &PlanMatrix, pop: &[u64], ndists: u32) -> Vec<f64> {
    let target = pop.iter().sum::<u64>() as f64 / ndists as f64;

    plans.assignments().axis_iter(Axis(1))
        .into_par_iter()
        .map(|plan| {
            district_totals(plan, pop, ndists).into_iter()
                .map(|total| (total as f64 / target - 1.0).abs())
                .fold(0.0, f64::max)
        })
        .collect()
}
