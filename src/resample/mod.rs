mod resample;

pub use resample::{WeightedEnsemble, draw_indices};
