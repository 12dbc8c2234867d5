mod deviation;
mod plans;

pub use deviation::max_deviation;
pub use plans::{PlanMatrix, district_totals};
